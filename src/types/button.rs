use serde::{Deserialize, Serialize};

/// A button attached to a bot message.
///
/// Buttons pair a human-readable `title` with the `payload` that should be
/// sent back to the server when the button is chosen. Quick replies use the
/// same wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// The label shown to the user.
    #[serde(default)]
    pub title: String,

    /// The value sent back to the server when this button is selected.
    #[serde(default)]
    pub payload: String,
}

impl Button {
    /// Create a new button from a title and payload.
    pub fn new(title: impl Into<String>, payload: impl Into<String>) -> Self {
        Button {
            title: title.into(),
            payload: payload.into(),
        }
    }

    /// Display label for the button at position `idx`.
    ///
    /// The index is appended so two buttons with identical titles remain
    /// distinguishable in a selection prompt.
    pub fn label(&self, idx: usize) -> String {
        format!("{} ({})", self.title, idx)
    }
}
