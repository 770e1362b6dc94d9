use super::Format;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {format} data: {details} (at line ~{line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    #[error("failed to write {format} data: {details}")]
    Write { format: Format, details: String },
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        let line = e.position().map(|p| p.line() as usize).unwrap_or(0);
        match e.into_kind() {
            csv::ErrorKind::Io(source) => Error::Io { source },
            kind => Error::parse(Format::Csv, line, format!("{kind:?}")),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            return Error::Io {
                source: e.into(),
            };
        }
        Error::parse(Format::Json, e.line(), e.to_string())
    }
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }

    pub fn write(format: Format, details: impl Into<String>) -> Self {
        Self::Write {
            format,
            details: details.into(),
        }
    }
}
