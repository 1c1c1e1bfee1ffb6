use crate::core::ConfigProvider;
use crate::domain::settings::MenuSettings;
use crate::utils::error::{MenuError, Result};
use crate::utils::validation::{self, Validate, OUTPUT_EXTENSIONS, WORKBOOK_EXTENSIONS};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid")
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub menu: MenuSettings,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub path: String,
    #[serde(default = "default_recipes_table")]
    pub recipes_table: String,
    #[serde(default = "default_ingredients_table")]
    pub ingredients_table: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            recipes_table: default_recipes_table(),
            ingredients_table: default_ingredients_table(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
    #[serde(default = "default_output_file")]
    pub filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            filename: default_output_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    /// `compact` (default) or `json`
    pub log_format: Option<String>,
}

fn default_recipes_table() -> String {
    "Receitas".to_string()
}

fn default_ingredients_table() -> String {
    "Ingredientes".to_string()
}

fn default_output_path() -> String {
    ".".to_string()
}

fn default_output_file() -> String {
    "menu.pdf".to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MenuError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let config: Self =
            toml::from_str(&processed_content).map_err(|e| MenuError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        // 沒有預設的工作簿位置，必須明確指定
        if config.source.path.trim().is_empty() {
            return Err(MenuError::MissingConfigError {
                field: "source.path".to_string(),
            });
        }

        Ok(config)
    }

    /// 替換環境變數 (例如 ${MENU_TITLE})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
            .is_some_and(|format| format.eq_ignore_ascii_case("json"))
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.path
    }

    fn recipes_table(&self) -> &str {
        &self.source.recipes_table
    }

    fn ingredients_table(&self) -> &str {
        &self.source.ingredients_table
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_file(&self) -> &str {
        &self.output.filename
    }

    fn menu_settings(&self) -> MenuSettings {
        self.menu.clone()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("source.path", &self.source.path)?;
        validation::validate_file_extension("source.path", &self.source.path, WORKBOOK_EXTENSIONS)?;
        validation::validate_non_empty_string("source.recipes_table", &self.source.recipes_table)?;
        validation::validate_non_empty_string(
            "source.ingredients_table",
            &self.source.ingredients_table,
        )?;
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_file_extension("output.filename", &self.output.filename, OUTPUT_EXTENSIONS)?;
        validation::validate_non_empty_string("menu.title", &self.menu.title)?;

        if let Some(format) = self.monitoring.as_ref().and_then(|m| m.log_format.as_deref()) {
            if !["compact", "json"].contains(&format.to_ascii_lowercase().as_str()) {
                return Err(MenuError::InvalidConfigValueError {
                    field: "monitoring.log_format".to_string(),
                    value: format.to_string(),
                    reason: "Valid formats: compact, json".to_string(),
                });
            }
        }

        Ok(())
    }
}
