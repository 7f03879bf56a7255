use std::fmt;

use thiserror::Error;

use crate::FileMap;

/// Error returned by a walk.
#[derive(Debug, Error)]
pub enum WalkError {
    /// The root cannot be mutated in place (e.g. an `Rc` with other owners).
    #[error("root value cannot be modified in place")]
    NotAReference,

    /// A location failed. `files` holds every mapping recorded before (and
    /// including) the failed location.
    #[error("{source}")]
    Element { source: LocatedError, files: FileMap },
}

impl WalkError {
    /// The located failure, if the walk got as far as visiting values.
    pub fn located(&self) -> Option<&LocatedError> {
        match self {
            WalkError::Element { source, .. } => Some(source),
            WalkError::NotAReference => None,
        }
    }

    /// Mappings recorded before the walk aborted. `None` for `NotAReference`.
    pub fn files(&self) -> Option<&FileMap> {
        match self {
            WalkError::Element { files, .. } => Some(files),
            WalkError::NotAReference => None,
        }
    }
}

/// A failure tied to the location that produced it.
#[derive(Debug)]
pub struct LocatedError {
    /// Location name of the failed value, e.g. `Config.database[2/3].password`.
    pub location: String,
    /// File path as written in the value, before any path transform.
    /// Empty when the failure is not about a file.
    pub file: String,
    pub cause: Cause,
}

impl LocatedError {
    pub(crate) fn new(location: &str, file: &str, cause: Cause) -> Self {
        Self {
            location: location.to_string(),
            file: file.to_string(),
            cause,
        }
    }

    pub(crate) fn internal(location: &str, reason: impl Into<String>) -> Self {
        Self::new(location, "", Cause::InternalFault(reason.into()))
    }
}

impl fmt::Display for LocatedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cause = self.cause.to_string();
        if self.file.is_empty() || cause.contains(&self.file) {
            write!(f, "element failure: {}: {cause}", self.location)
        } else {
            write!(
                f,
                "element failure: {} ({}): {cause}",
                self.location, self.file
            )
        }
    }
}

impl std::error::Error for LocatedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

/// Why a location failed.
#[derive(Debug, Error)]
pub enum Cause {
    #[error("opening file: {0}")]
    OpenFailed(#[source] std::io::Error),

    #[error("reading file: {0}")]
    ReadFailed(#[source] std::io::Error),

    /// Something the walker could not classify: an inconsistent shape
    /// implementation or a panic in user-supplied code. Treat as a bug.
    #[error("internal fault: {0}")]
    InternalFault(String),
}

#[cfg(feature = "rich-errors")]
mod diagnostic {
    use std::fmt::Display;

    use miette::Diagnostic;

    use super::{Cause, LocatedError, WalkError};

    impl Diagnostic for WalkError {
        fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
            match self {
                WalkError::NotAReference => Some(Box::new("fileref::not_a_reference")),
                WalkError::Element { source, .. } => source.code(),
            }
        }

        fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
            match self {
                WalkError::NotAReference => Some(Box::new(
                    "pass a value the walker can own mutably for the duration of the walk",
                )),
                WalkError::Element { source, .. } => source.help(),
            }
        }
    }

    impl Diagnostic for LocatedError {
        fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
            Some(Box::new(match self.cause {
                Cause::OpenFailed(_) => "fileref::open_failed",
                Cause::ReadFailed(_) => "fileref::read_failed",
                Cause::InternalFault(_) => "fileref::internal_fault",
            }))
        }

        fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
            match self.cause {
                Cause::OpenFailed(_) | Cause::ReadFailed(_) => Some(Box::new(format!(
                    "check that '{}' exists and is readable, or remove the prefix from {}",
                    self.file, self.location
                ))),
                Cause::InternalFault(_) => None,
            }
        }
    }
}
