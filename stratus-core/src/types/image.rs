//! Image reference types.

use serde::{Deserialize, Serialize};

/// Resolved pointer to a container image.
///
/// Two coordinate forms exist: a repository ARN (looked up by identity, with
/// pull authentication handled by the provisioning engine) and a direct
/// registry URI. Downstream construction treats both as opaque references;
/// only the engine's pull path differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum ImageReference {
    /// Repository lookup by ARN, pinned to a tag.
    EcrRepository { arn: String, tag: String },

    /// Direct pull from a registry URI (the URI may embed its own tag).
    Registry { uri: String },
}

impl ImageReference {
    /// The registry coordinate as supplied.
    pub fn coordinate(&self) -> &str {
        match self {
            ImageReference::EcrRepository { arn, .. } => arn,
            ImageReference::Registry { uri } => uri,
        }
    }
}

impl std::fmt::Display for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageReference::EcrRepository { arn, tag } => write!(f, "{}:{}", arn, tag),
            ImageReference::Registry { uri } => write!(f, "{}", uri),
        }
    }
}
