pub mod log;
pub mod records;
