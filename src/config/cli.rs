use crate::core::ConfigProvider;
use crate::domain::settings::{MenuSettings, DEFAULT_TITLE};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate, OUTPUT_EXTENSIONS, WORKBOOK_EXTENSIONS};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "cocktail-menu")]
#[command(about = "Print a PDF menu of the cocktails you can make right now")]
pub struct CliConfig {
    /// Workbook with the recipes and ingredients sheets
    #[arg(long, default_value = "cocktails.xlsx")]
    pub input: String,

    #[arg(long, default_value = "Receitas")]
    pub recipes_table: String,

    #[arg(long, default_value = "Ingredientes")]
    pub ingredients_table: String,

    #[arg(long, default_value = ".")]
    pub output_dir: String,

    #[arg(long, default_value = "menu.pdf")]
    pub output_file: String,

    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process CPU and memory usage per stage")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn recipes_table(&self) -> &str {
        &self.recipes_table
    }

    fn ingredients_table(&self) -> &str {
        &self.ingredients_table
    }

    fn output_path(&self) -> &str {
        &self.output_dir
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn menu_settings(&self) -> MenuSettings {
        MenuSettings {
            title: self.title.clone(),
            ..MenuSettings::default()
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_file_extension("input", &self.input, WORKBOOK_EXTENSIONS)?;
        validation::validate_non_empty_string("recipes_table", &self.recipes_table)?;
        validation::validate_non_empty_string("ingredients_table", &self.ingredients_table)?;
        validation::validate_path("output_dir", &self.output_dir)?;
        validation::validate_path("output_file", &self.output_file)?;
        validation::validate_file_extension("output_file", &self.output_file, OUTPUT_EXTENSIONS)?;
        validation::validate_non_empty_string("title", &self.title)
    }
}
