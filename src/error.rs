use std::path::PathBuf;

use crate::session::SessionState;

#[derive(Debug, thiserror::Error)]
pub enum TabataError {
    #[error("workout already running ({0})")]
    AlreadyRunning(SessionState),

    #[error("config file {path} is malformed: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = TabataError> = std::result::Result<T, E>;
