use serde_json::Value;

use crate::types::Button;

/// One rendered reply unit from the bot.
///
/// A single wire message may carry several fields at once (text and an image,
/// say); decoding splits it into one `ResponsePayload` per present field, in
/// a fixed precedence order. See [`BotMessage::into_payloads`].
///
/// [`BotMessage::into_payloads`]: crate::types::BotMessage::into_payloads
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePayload {
    /// Plain response text.
    Text(String),

    /// An image URL.
    Image(String),

    /// An attachment description.
    Attachment(String),

    /// A set of buttons the user must choose from.
    ///
    /// The message's text rides along as the selection prompt, which is why
    /// text is suppressed as a standalone payload when buttons are present.
    Buttons {
        /// Prompt shown above the choices.
        prompt: Option<String>,
        /// The choices, in server order.
        buttons: Vec<Button>,
    },

    /// Opaque structured records.
    Elements(Vec<Value>),

    /// Quick reply choices.
    QuickReplies(Vec<Button>),

    /// Arbitrary custom JSON.
    Custom(Value),
}

impl ResponsePayload {
    /// Returns true if this payload presents choices to the user.
    pub fn offers_choices(&self) -> bool {
        match self {
            ResponsePayload::Buttons { buttons, .. } => !buttons.is_empty(),
            ResponsePayload::QuickReplies(buttons) => !buttons.is_empty(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offers_choices() {
        let buttons = ResponsePayload::Buttons {
            prompt: Some("pick one".to_string()),
            buttons: vec![Button::new("a", "/a")],
        };
        assert!(buttons.offers_choices());

        let empty = ResponsePayload::Buttons {
            prompt: None,
            buttons: vec![],
        };
        assert!(!empty.offers_choices());

        assert!(!ResponsePayload::Text("hi".to_string()).offers_choices());
    }
}
