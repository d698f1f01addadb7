/// Styling hint for a display line.
///
/// Purely descriptive; the renderer decides how (or whether) to paint it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleHint {
    /// Regular bot output.
    Info,

    /// Section headers and selection prompts.
    Highlight,
}

/// One line of display output produced by rendering a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    /// The text to display.
    pub text: String,

    /// How the line should be styled.
    pub style: StyleHint,
}

impl DisplayLine {
    /// Creates a regular output line.
    pub fn info(text: impl Into<String>) -> Self {
        DisplayLine {
            text: text.into(),
            style: StyleHint::Info,
        }
    }

    /// Creates a header line.
    pub fn highlight(text: impl Into<String>) -> Self {
        DisplayLine {
            text: text.into(),
            style: StyleHint::Highlight,
        }
    }
}
