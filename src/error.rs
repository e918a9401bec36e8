use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not read statement: {0}")]
    Load(String),

    #[error("Required column(s) missing from statement: {0}")]
    MissingColumn(String),

    #[error("No usable keyword (input was empty or whitespace)")]
    NoKeyword,

    #[error("No statement file given and no recent file found. Pass --file or use --pick.")]
    NoFile,

    #[error("Config error: {0}")]
    Config(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
