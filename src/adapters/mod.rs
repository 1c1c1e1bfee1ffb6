// Adapters layer: concrete implementations of the domain ports.

pub mod outline;
pub mod pdf;
pub mod storage;
pub mod workbook;
