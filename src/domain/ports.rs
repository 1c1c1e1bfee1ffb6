use crate::domain::model::{MenuDocument, MenuSource, Table};
use crate::domain::settings::MenuSettings;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read access to named tables of a workbook-like file.
pub trait WorkbookSource: Send + Sync {
    fn read_table(&self, name: &str) -> Result<Table>;
}

/// Turns composed sections into document bytes.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, document: &MenuDocument) -> Result<Vec<u8>>;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn recipes_table(&self) -> &str;
    fn ingredients_table(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
    fn menu_settings(&self) -> MenuSettings;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<MenuSource>;
    async fn transform(&self, source: MenuSource) -> Result<MenuDocument>;
    async fn load(&self, document: MenuDocument) -> Result<String>;
}
