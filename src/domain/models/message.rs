use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::DomainError;

/// Author of a conversation turn.
///
/// On the wire and on disk the assistant is spelled `"ai"`; `"assistant"` is
/// accepted when reading. Any other value reads as [`Sender::User`], so one
/// odd entry never makes a stored log unreadable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Sender {
    #[default]
    #[serde(rename = "user")]
    User,
    #[serde(rename = "ai")]
    Assistant,
}

impl Sender {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "ai" | "assistant" => Sender::Assistant,
            _ => Sender::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "ai",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'de> Deserialize<'de> for Sender {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Sender::from_wire(&raw))
    }
}

/// A single turn in the conversation. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    sender: Sender,
    text: String,
}

impl Message {
    /// Builds a message, rejecting text that is empty or whitespace-only.
    pub fn new(sender: Sender, text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::invalid_input("Message cannot be empty"));
        }
        Ok(Self { sender, text })
    }

    pub fn user(text: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Sender::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Sender::Assistant, text)
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}
