// Public modules
pub mod bot_message;
pub mod button;
pub mod display_line;
pub mod pending_selection;
pub mod response_payload;

// Re-exports
pub use bot_message::BotMessage;
pub use button::Button;
pub use display_line::{DisplayLine, StyleHint};
pub use pending_selection::{Choice, PendingSelection};
pub use response_payload::ResponsePayload;
