use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("Workbook read failed: {0}")]
    WorkbookError(#[from] calamine::Error),

    #[error("Table '{}' not found (available: {})", .table, .available.join(", "))]
    TableNotFoundError { table: String, available: Vec<String> },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("PDF rendering error: {message}")]
    RenderError { message: String },

    #[error("Invalid row {row} in '{table}', column '{column}': {reason}")]
    InvalidRowError {
        table: String,
        row: usize,
        column: String,
        reason: String,
    },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    InputData,
    System,
    Rendering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MenuError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MenuError::InvalidConfigValueError { .. }
            | MenuError::MissingConfigError { .. }
            | MenuError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            MenuError::WorkbookError(_)
            | MenuError::TableNotFoundError { .. }
            | MenuError::InvalidRowError { .. } => ErrorCategory::InputData,
            MenuError::IoError(_) => ErrorCategory::System,
            MenuError::RenderError { .. } => ErrorCategory::Rendering,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::InputData => ErrorSeverity::High,
            ErrorCategory::System | ErrorCategory::Rendering => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for a run that failed with this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            MenuError::WorkbookError(_) => {
                "Check that the workbook exists and is a valid xlsx/xls/ods file".to_string()
            }
            MenuError::TableNotFoundError { available, .. } => format!(
                "Use one of the sheets present in the workbook: {}",
                available.join(", ")
            ),
            MenuError::IoError(_) => {
                "Check file permissions and that the output directory is writable".to_string()
            }
            MenuError::RenderError { .. } => {
                "Re-run with --verbose and check the recipe text for unusual characters"
                    .to_string()
            }
            MenuError::InvalidRowError { row, column, .. } => {
                format!("Fix column '{}' on spreadsheet row {}", column, row)
            }
            MenuError::ConfigValidationError { .. } => {
                "Check the configuration file syntax and values".to_string()
            }
            MenuError::InvalidConfigValueError { field, .. } => {
                format!("Provide a valid value for '{}'", field)
            }
            MenuError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MenuError::WorkbookError(_) => "Could not read the cocktail workbook".to_string(),
            MenuError::TableNotFoundError { table, .. } => {
                format!("The workbook has no sheet named '{}'", table)
            }
            MenuError::IoError(e) => format!("File system error: {}", e),
            MenuError::RenderError { .. } => "Could not render the menu PDF".to_string(),
            MenuError::InvalidRowError { .. } => format!("The recipe sheet is malformed: {}", self),
            _ => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, MenuError>;
