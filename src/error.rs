use std::io;
use std::path::PathBuf;

/// Failures surfaced by loading and saving. Malformed content is never an error; the parser
/// folds it into comment text instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}", path.display())]
    ReadFailure { path: PathBuf, source: io::Error },
    #[error("failed to write {}", path.display())]
    WriteFailure { path: PathBuf, source: io::Error },
    #[error("failed to read data")]
    Io(#[from] io::Error),
}
