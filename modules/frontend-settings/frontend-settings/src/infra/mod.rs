pub mod storage;
pub mod sweeper;
