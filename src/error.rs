use std::path::PathBuf;
use thiserror::Error;

pub type ScanResult<T> = Result<T, ScanError>;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open spreadsheet {}: {message}", .path.display())]
    FileAccess { path: PathBuf, message: String },

    #[error("Worksheet not found: {0}")]
    SheetNotFound(String),

    #[error("Workbook has no worksheets: {}", .0.display())]
    EmptyWorkbook(PathBuf),

    #[error("Read error: {0}")]
    Read(String),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
