use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct MenuEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> MenuEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting menu generation...");

        // Extract
        tracing::info!("Reading workbook...");
        let source = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} cocktails and {} available ingredients",
            source.cocktails.len(),
            source.availability.len()
        );
        self.monitor.log_stats("Extract");

        // Transform
        tracing::info!("Composing menu...");
        let document = self.pipeline.transform(source).await?;
        tracing::info!(
            "{} cocktails available in {} sections",
            document.cocktail_count,
            document.sections.len()
        );
        if document.cocktail_count == 0 {
            tracing::warn!("No cocktail has all of its ingredients available; the menu will be empty");
        }
        self.monitor.log_stats("Transform");

        // Load
        tracing::info!("Rendering PDF...");
        let output_path = self.pipeline.load(document).await?;
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(output_path)
    }

    /// Runs extract and transform only; nothing is rendered or written.
    pub async fn dry_run(&self) -> Result<usize> {
        let source = self.pipeline.extract().await?;
        let document = self.pipeline.transform(source).await?;
        Ok(document.cocktail_count)
    }
}
