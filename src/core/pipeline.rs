use crate::adapters::pdf::PdfRenderer;
use crate::core::availability::AvailabilityLoader;
use crate::core::composer::MenuComposer;
use crate::core::recipes::RecipeLoader;
use crate::core::{
    ConfigProvider, DocumentRenderer, MenuDocument, MenuSource, Pipeline, Storage, WorkbookSource,
};
use crate::utils::error::Result;

/// Workbook → menu sections → PDF.
pub struct MenuPipeline<W, S, C, R = PdfRenderer>
where
    W: WorkbookSource,
    S: Storage,
    C: ConfigProvider,
    R: DocumentRenderer,
{
    workbook: W,
    storage: S,
    config: C,
    renderer: R,
}

impl<W: WorkbookSource, S: Storage, C: ConfigProvider> MenuPipeline<W, S, C> {
    pub fn new(workbook: W, storage: S, config: C) -> Self {
        Self {
            workbook,
            storage,
            config,
            renderer: PdfRenderer::default(),
        }
    }
}

impl<W, S, C, R> MenuPipeline<W, S, C, R>
where
    W: WorkbookSource,
    S: Storage,
    C: ConfigProvider,
    R: DocumentRenderer,
{
    pub fn with_renderer<R2: DocumentRenderer>(self, renderer: R2) -> MenuPipeline<W, S, C, R2> {
        MenuPipeline {
            workbook: self.workbook,
            storage: self.storage,
            config: self.config,
            renderer,
        }
    }
}

#[async_trait::async_trait]
impl<W, S, C, R> Pipeline for MenuPipeline<W, S, C, R>
where
    W: WorkbookSource,
    S: Storage,
    C: ConfigProvider,
    R: DocumentRenderer,
{
    async fn extract(&self) -> Result<MenuSource> {
        tracing::debug!("Reading recipes from '{}'", self.config.recipes_table());
        let recipes = self.workbook.read_table(self.config.recipes_table())?;
        let cocktails = RecipeLoader::load(&recipes)?;

        tracing::debug!(
            "Reading availability from '{}'",
            self.config.ingredients_table()
        );
        let ingredients = self.workbook.read_table(self.config.ingredients_table())?;
        let availability = AvailabilityLoader::load(&ingredients);

        Ok(MenuSource {
            cocktails,
            availability,
        })
    }

    async fn transform(&self, source: MenuSource) -> Result<MenuDocument> {
        let composer = MenuComposer::new(self.config.menu_settings());
        Ok(composer.compose(&source.cocktails, &source.availability))
    }

    async fn load(&self, document: MenuDocument) -> Result<String> {
        let output_file = self.config.output_file();
        let output_path = std::path::Path::new(self.config.output_path())
            .join(output_file)
            .display()
            .to_string();

        let bytes = self.renderer.render(&document)?;

        tracing::debug!("Writing PDF ({} bytes) to storage", bytes.len());
        self.storage.write_file(output_file, &bytes).await?;

        Ok(output_path)
    }
}
