//! Payload rendering for the console client.
//!
//! [`render_payload`] translates one [`ResponsePayload`] into display
//! instructions and, for choice payloads, the [`PendingSelection`] that the
//! next input step must present. The translation is pure; painting is the
//! [`Renderer`]'s concern.

use std::io::{self, Stdout, Write};

use crate::types::{Button, Choice, DisplayLine, PendingSelection, ResponsePayload, StyleHint};

/// ANSI escape code for blue text (regular bot output).
const ANSI_BLUE: &str = "\x1b[34m";

/// ANSI escape code for magenta text (headers and prompts).
const ANSI_MAGENTA: &str = "\x1b[35m";

/// ANSI escape code for green text (success messages).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (errors).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// Header used for a buttons payload that carries no prompt text.
const BUTTONS_HEADER: &str = "Buttons:";

/// Header used for quick reply payloads.
const QUICK_REPLIES_HEADER: &str = "Quick Replies:";

/// Translate one payload into display lines and an optional pending selection.
///
/// Every well-formed payload renders to a non-empty sequence. A buttons or
/// quick-replies payload with zero choices renders its header and yields no
/// pending selection, so the next input step falls back to free text rather
/// than presenting an empty menu.
pub fn render_payload(payload: &ResponsePayload) -> (Vec<DisplayLine>, Option<PendingSelection>) {
    match payload {
        ResponsePayload::Text(text) => (vec![DisplayLine::info(text)], None),
        ResponsePayload::Image(url) => (vec![DisplayLine::info(format!("Image: {url}"))], None),
        ResponsePayload::Attachment(description) => (
            vec![DisplayLine::info(format!("Attachment: {description}"))],
            None,
        ),
        ResponsePayload::Buttons { prompt, buttons } => {
            let header = prompt.as_deref().unwrap_or(BUTTONS_HEADER);
            render_choices(header, buttons)
        }
        ResponsePayload::Elements(elements) => {
            let mut lines = vec![DisplayLine::highlight("Elements:")];
            for (idx, element) in elements.iter().enumerate() {
                lines.push(DisplayLine::info(format!("{idx}: {element}")));
            }
            (lines, None)
        }
        ResponsePayload::QuickReplies(buttons) => render_choices(QUICK_REPLIES_HEADER, buttons),
        ResponsePayload::Custom(value) => {
            let pretty =
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
            (
                vec![
                    DisplayLine::highlight("Custom json:"),
                    DisplayLine::info(pretty),
                ],
                None,
            )
        }
    }
}

/// Render a choice set: header plus one line per choice, in input order.
fn render_choices(
    header: &str,
    buttons: &[Button],
) -> (Vec<DisplayLine>, Option<PendingSelection>) {
    let mut lines = vec![DisplayLine::highlight(header)];
    if buttons.is_empty() {
        return (lines, None);
    }
    let mut choices = Vec::with_capacity(buttons.len());
    for (idx, button) in buttons.iter().enumerate() {
        let label = button.label(idx);
        lines.push(DisplayLine::info(&label));
        choices.push(Choice {
            label,
            payload: button.payload.clone(),
        });
    }
    let pending = PendingSelection::new(header, choices);
    (lines, Some(pending))
}

/// Trait for painting display output.
///
/// This abstraction allows for different rendering strategies: ANSI-styled
/// terminal output, unstyled output for piping, or a capturing sink in tests.
pub trait Renderer: Send {
    /// Paint one display line.
    fn print_line(&mut self, line: &DisplayLine);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print a success message.
    fn print_success(&mut self, message: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);
}

/// Plain text renderer with optional ANSI styling.
///
/// Writes directly to stdout (errors to stderr), coloring bot output blue
/// and headers magenta when color is on.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            use_color: true,
        }
    }

    /// Creates a new PlainTextRenderer with the specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    fn print_colored(&mut self, text: &str, color: &str) {
        if self.use_color {
            println!("{color}{text}{ANSI_RESET}");
        } else {
            println!("{text}");
        }
        let _ = self.stdout.flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_line(&mut self, line: &DisplayLine) {
        let color = match line.style {
            StyleHint::Info => ANSI_BLUE,
            StyleHint::Highlight => ANSI_MAGENTA,
        };
        self.print_colored(&line.text, color);
    }

    fn print_info(&mut self, info: &str) {
        self.print_colored(info, ANSI_BLUE);
    }

    fn print_success(&mut self, message: &str) {
        self.print_colored(message, ANSI_GREEN);
    }

    fn print_error(&mut self, error: &str) {
        if self.use_color {
            eprintln!("{ANSI_RED}{error}{ANSI_RESET}");
        } else {
            eprintln!("{error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_renders_verbatim() {
        let (lines, pending) = render_payload(&ResponsePayload::Text("hi there".to_string()));
        assert_eq!(lines, vec![DisplayLine::info("hi there")]);
        assert!(pending.is_none());
    }

    #[test]
    fn image_and_attachment_are_prefixed() {
        let (lines, _) = render_payload(&ResponsePayload::Image("http://x/y.png".to_string()));
        assert_eq!(lines[0].text, "Image: http://x/y.png");

        let (lines, _) = render_payload(&ResponsePayload::Attachment("report.pdf".to_string()));
        assert_eq!(lines[0].text, "Attachment: report.pdf");
    }

    #[test]
    fn buttons_yield_header_choices_and_pending() {
        let payload = ResponsePayload::Buttons {
            prompt: Some("pick one".to_string()),
            buttons: vec![Button::new("yes", "/affirm"), Button::new("no", "/deny")],
        };
        let (lines, pending) = render_payload(&payload);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], DisplayLine::highlight("pick one"));
        assert_eq!(lines[1], DisplayLine::info("yes (0)"));
        assert_eq!(lines[2], DisplayLine::info("no (1)"));

        let pending = pending.unwrap();
        assert_eq!(pending.prompt, "pick one");
        assert_eq!(pending.choices.len(), 2);
        assert_eq!(pending.choices[0].label, "yes (0)");
        assert_eq!(pending.choices[0].payload, "/affirm");
        assert_eq!(pending.choices[1].payload, "/deny");
    }

    #[test]
    fn duplicate_titles_stay_distinguishable() {
        let payload = ResponsePayload::Buttons {
            prompt: None,
            buttons: vec![Button::new("more", "/page2"), Button::new("more", "/page3")],
        };
        let (_, pending) = render_payload(&payload);
        let pending = pending.unwrap();
        assert_eq!(pending.choices[0].label, "more (0)");
        assert_eq!(pending.choices[1].label, "more (1)");
        assert_ne!(pending.choices[0].payload, pending.choices[1].payload);
    }

    #[test]
    fn empty_buttons_render_header_only() {
        let payload = ResponsePayload::Buttons {
            prompt: None,
            buttons: vec![],
        };
        let (lines, pending) = render_payload(&payload);
        assert_eq!(lines, vec![DisplayLine::highlight("Buttons:")]);
        assert!(pending.is_none());
    }

    #[test]
    fn quick_replies_yield_pending() {
        let payload =
            ResponsePayload::QuickReplies(vec![Button::new("soon", "/soon")]);
        let (lines, pending) = render_payload(&payload);
        assert_eq!(lines[0], DisplayLine::highlight("Quick Replies:"));
        assert_eq!(lines[1], DisplayLine::info("soon (0)"));
        assert_eq!(pending.unwrap().choices[0].payload, "/soon");
    }

    #[test]
    fn elements_render_one_line_each() {
        let payload = ResponsePayload::Elements(vec![json!({"a": 1}), json!({"b": 2})]);
        let (lines, pending) = render_payload(&payload);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], DisplayLine::highlight("Elements:"));
        assert!(lines[1].text.starts_with("0: "));
        assert!(lines[2].text.starts_with("1: "));
        assert!(pending.is_none());
    }

    #[test]
    fn custom_pretty_prints() {
        let payload = ResponsePayload::Custom(json!({"k": "v"}));
        let (lines, pending) = render_payload(&payload);
        assert_eq!(lines[0], DisplayLine::highlight("Custom json:"));
        assert!(lines[1].text.contains("\"k\": \"v\""));
        assert!(pending.is_none());
    }

    #[test]
    fn rendering_is_deterministic() {
        let payload = ResponsePayload::Buttons {
            prompt: Some("pick".to_string()),
            buttons: vec![Button::new("a", "/a")],
        };
        let first = render_payload(&payload);
        let second = render_payload(&payload);
        assert_eq!(first, second);
    }
}
