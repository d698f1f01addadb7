use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Button, ResponsePayload};

/// One message object as the REST webhook sends it.
///
/// Every field is optional and any subset may be present at once. Ordering of
/// fields in the source JSON is irrelevant; [`into_payloads`] applies a fixed
/// precedence when splitting a message into reply units.
///
/// [`into_payloads`]: BotMessage::into_payloads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotMessage {
    /// Response text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Attachment description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,

    /// Buttons the user should choose from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<Button>>,

    /// Opaque structured records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<Value>>,

    /// Quick reply choices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_replies: Option<Vec<Button>>,

    /// Arbitrary custom JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<Value>,
}

impl BotMessage {
    /// Splits this message into reply units.
    ///
    /// Precedence order: text, image, attachment, buttons, elements, quick
    /// replies, custom. Text is not emitted as its own unit when buttons are
    /// present; it becomes the button prompt instead.
    pub fn into_payloads(self) -> Vec<ResponsePayload> {
        let mut payloads = Vec::new();
        let has_buttons = self.buttons.is_some();

        if let Some(text) = self.text.clone()
            && !has_buttons
        {
            payloads.push(ResponsePayload::Text(text));
        }
        if let Some(image) = self.image {
            payloads.push(ResponsePayload::Image(image));
        }
        if let Some(attachment) = self.attachment {
            payloads.push(ResponsePayload::Attachment(attachment));
        }
        if let Some(buttons) = self.buttons {
            payloads.push(ResponsePayload::Buttons {
                prompt: self.text,
                buttons,
            });
        }
        if let Some(elements) = self.elements {
            payloads.push(ResponsePayload::Elements(elements));
        }
        if let Some(quick_replies) = self.quick_replies {
            payloads.push(ResponsePayload::QuickReplies(quick_replies));
        }
        if let Some(custom) = self.custom {
            payloads.push(ResponsePayload::Custom(custom));
        }
        payloads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_only() {
        let message: BotMessage = serde_json::from_value(json!({"text": "hi there"})).unwrap();
        assert_eq!(
            message.into_payloads(),
            vec![ResponsePayload::Text("hi there".to_string())]
        );
    }

    #[test]
    fn text_suppressed_by_buttons() {
        let message: BotMessage = serde_json::from_value(json!({
            "text": "pick one",
            "buttons": [{"title": "a", "payload": "/a"}],
        }))
        .unwrap();
        let payloads = message.into_payloads();
        assert_eq!(payloads.len(), 1);
        assert_eq!(
            payloads[0],
            ResponsePayload::Buttons {
                prompt: Some("pick one".to_string()),
                buttons: vec![Button::new("a", "/a")],
            }
        );
    }

    #[test]
    fn precedence_order_independent_of_json_order() {
        let message: BotMessage = serde_json::from_value(json!({
            "custom": {"k": "v"},
            "image": "http://example.com/cat.png",
            "text": "look",
        }))
        .unwrap();
        let payloads = message.into_payloads();
        assert_eq!(payloads[0], ResponsePayload::Text("look".to_string()));
        assert_eq!(
            payloads[1],
            ResponsePayload::Image("http://example.com/cat.png".to_string())
        );
        assert_eq!(payloads[2], ResponsePayload::Custom(json!({"k": "v"})));
    }

    #[test]
    fn all_fields_present() {
        let message: BotMessage = serde_json::from_value(json!({
            "text": "t",
            "image": "i",
            "attachment": "a",
            "buttons": [{"title": "b", "payload": "/b"}],
            "elements": [{"x": 1}],
            "quick_replies": [{"title": "q", "payload": "/q"}],
            "custom": {"c": true},
        }))
        .unwrap();
        let payloads = message.into_payloads();
        // Text folds into the button prompt, so six units remain.
        assert_eq!(payloads.len(), 6);
        assert!(matches!(payloads[0], ResponsePayload::Image(_)));
        assert!(matches!(payloads[1], ResponsePayload::Attachment(_)));
        assert!(matches!(payloads[2], ResponsePayload::Buttons { .. }));
        assert!(matches!(payloads[3], ResponsePayload::Elements(_)));
        assert!(matches!(payloads[4], ResponsePayload::QuickReplies(_)));
        assert!(matches!(payloads[5], ResponsePayload::Custom(_)));
    }

    #[test]
    fn empty_message_yields_nothing() {
        let message: BotMessage = serde_json::from_value(json!({})).unwrap();
        assert!(message.into_payloads().is_empty());
    }
}
