use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Externally visible pointer to a published object.
///
/// The persisted form is produced by `Display` and read back by `FromStr`:
/// `Composite` is stored as `"{bucket},{key}"` and resolved to a freshly signed URL
/// whenever it is read, `Static` is stored and returned verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDescriptor {
    Composite { bucket: String, key: String },
    Static(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Malformed access descriptor: {0:?}")]
pub struct ParseAccessDescriptorError(pub String);

impl AccessDescriptor {
    pub fn composite(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        AccessDescriptor::Composite {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Persisted form, suitable for the metadata store.
    pub fn to_stored(&self) -> String {
        self.to_string()
    }
}

impl Display for AccessDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AccessDescriptor::Composite { bucket, key } => write!(f, "{},{}", bucket, key),
            AccessDescriptor::Static(url) => write!(f, "{}", url),
        }
    }
}

impl FromStr for AccessDescriptor {
    type Err = ParseAccessDescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains("://") {
            return Ok(AccessDescriptor::Static(s.to_string()));
        }

        match s.split_once(',') {
            Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => {
                Ok(AccessDescriptor::composite(bucket, key))
            }
            _ => Err(ParseAccessDescriptorError(s.to_string())),
        }
    }
}
