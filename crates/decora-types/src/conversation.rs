//! Multi-turn conversation types for the multimodal generation backend.
//!
//! A session is a sequence of [`ConversationTurn`]s replayed to the backend
//! on every call; the backend answers with a sequence of parts, each text or
//! inline image data. These types are wire-format agnostic -- the infra
//! layer converts them to the provider's request/response shapes.

use std::fmt;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Model,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Model => write!(f, "model"),
        }
    }
}

/// One piece of a turn: plain text or inline image data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnPart {
    Text(String),
    Image { mime_type: String, data: Vec<u8> },
}

impl TurnPart {
    pub fn is_image(&self) -> bool {
        matches!(self, TurnPart::Image { .. })
    }
}

/// A single turn in a multi-turn conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub parts: Vec<TurnPart>,
}

impl ConversationTurn {
    /// A user turn holding only text.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            parts: vec![TurnPart::Text(text.into())],
        }
    }

    /// A user turn with arbitrary parts (text and/or inline images).
    pub fn user(parts: Vec<TurnPart>) -> Self {
        Self {
            role: TurnRole::User,
            parts,
        }
    }

    /// A model turn echoing the backend's reply parts.
    pub fn model(parts: Vec<TurnPart>) -> Self {
        Self {
            role: TurnRole::Model,
            parts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_role_display() {
        assert_eq!(TurnRole::User.to_string(), "user");
        assert_eq!(TurnRole::Model.to_string(), "model");
    }

    #[test]
    fn test_user_text_turn() {
        let turn = ConversationTurn::user_text("hello");
        assert_eq!(turn.role, TurnRole::User);
        assert_eq!(turn.parts, vec![TurnPart::Text("hello".to_string())]);
    }

    #[test]
    fn test_is_image() {
        assert!(!TurnPart::Text("x".to_string()).is_image());
        assert!(
            TurnPart::Image {
                mime_type: "image/png".to_string(),
                data: vec![1, 2, 3],
            }
            .is_image()
        );
    }
}
