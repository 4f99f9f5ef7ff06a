use std::path::PathBuf;

use doorset_io::IoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("form {path:?} could not be loaded: {source}")]
    Form {
        path: PathBuf,
        #[source]
        source: IoError,
    },
    #[error("adjusted form could not be saved: {0}")]
    Save(#[from] IoError),
}
