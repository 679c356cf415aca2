use std::io;

use crate::shots::MalformedLine;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("Error when '{context}', apparently: {kind}")]
pub struct Error {
    context: String,
    kind: ErrorKind,
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("io: {0}")]
    Io(#[from] io::Error),
    #[error("walk: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{0}")]
    Line(#[from] MalformedLine),
    #[error("{0} already exists")]
    Collision(String),
}

impl Error {
    pub fn new(context: impl ToString, kind: impl Into<ErrorKind>) -> Self {
        Self {
            context: context.to_string(),
            kind: kind.into(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

pub(crate) trait ErrContext<T> {
    fn context<S: ToString, F: FnOnce() -> S>(self, provider: F) -> Result<T>;
}

impl<T, E> ErrContext<T> for std::result::Result<T, E>
where
    E: Into<ErrorKind>,
{
    fn context<S: ToString, F: FnOnce() -> S>(self, provider: F) -> Result<T> {
        self.map_err(|e| Error {
            context: provider().to_string(),
            kind: e.into(),
        })
    }
}
