use std::path::PathBuf;

pub type Result<T, E = BenchError> = core::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum BenchError {
    /// The benchmark file could not be opened or read.
    #[error("io: {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A data row did not yield four timings. `line` is 1-based in the file.
    #[error("parse: line {line}: {reason}: {content:?}")]
    Parse {
        line: usize,
        content: String,
        reason: String,
    },
    #[error("config: {0}")]
    Config(String),
    #[error("serde: {0}")]
    Json(#[from] serde_json::Error),
}

impl BenchError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(line: usize, content: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            content: content.into(),
            reason: reason.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
