pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use self::config::CliConfig;
pub use self::config::TomlConfig;

pub use self::adapters::{
    pdf::PdfRenderer,
    storage::LocalStorage,
    workbook::{CalamineWorkbook, InMemoryWorkbook},
};
pub use self::core::{composer::MenuComposer, engine::MenuEngine, pipeline::MenuPipeline};
pub use self::utils::error::{MenuError, Result};
