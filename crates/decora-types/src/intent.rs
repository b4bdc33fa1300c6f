//! Intent classification result.

use serde::{Deserialize, Serialize};

use std::fmt;

/// What a free-text chat message is asking for.
///
/// Produced by the intent classifier in `decora-core`; drives routing to the
/// text or the image generation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// A conversational question answered with generated text.
    Text,
    /// A request to produce an image.
    Image,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Text => write!(f, "text"),
            Intent::Image => write!(f, "image"),
        }
    }
}
