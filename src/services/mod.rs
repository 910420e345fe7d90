pub mod identity;
pub mod intake;
pub mod lifecycle;
pub mod scanner;
pub mod storage;
