use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BumperError {
    /// A required reference (prototype, score board link, follow target) is unset.
    /// The owning component logs this and degrades to a no-op.
    #[error("{component}: missing configuration, no {reference} assigned")]
    MissingConfiguration {
        component: &'static str,
        reference: &'static str,
    },
    #[error("read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse RON {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("failed to deserialize merged config; using defaults: {source}")]
    ConfigMerge {
        #[source]
        source: ron::Error,
    },
}

impl BumperError {
    pub fn missing(component: &'static str, reference: &'static str) -> Self {
        Self::MissingConfiguration {
            component,
            reference,
        }
    }
}
