use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HooksError {
    #[error("hooks already exist ({}); re-run with --force to overwrite", .0.join(", "))]
    HooksExist(Vec<String>),

    #[error("stdin is not interactive: re-run with --yes to accept the defaults")]
    NonInteractive,

    #[error("unknown hook type: {0}")]
    InvalidHookType(String),

    #[error("unknown security feature: {0}")]
    InvalidSecurityFeature(String),

    #[error("unknown project type '{0}': expected node, python, ruby, go or other")]
    InvalidProjectType(String),

    #[error("unknown storage backend '{0}': expected json, sqlite or postgres")]
    InvalidStorageBackend(String),

    #[error("{} is not a JSON object; fix or remove it before running init", .0.display())]
    InvalidSettings(PathBuf),

    #[error("failed to write {path}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HooksError>;
