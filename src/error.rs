use std::path::PathBuf;

/// Errors raised while extracting documents or persisting the content store
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    InvalidDocx(String),

    #[error("failed to read document: {0}")]
    Reader(#[from] docx_rs::ReaderError),

    #[error("failed to read document archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("failed to serialize content store: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to replace content store: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("existing content store {path} is not a JSON object: {source}")]
    CorruptStore {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cannot read input directory {path}: {source}")]
    InputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T, E = ExtractError> = std::result::Result<T, E>;
