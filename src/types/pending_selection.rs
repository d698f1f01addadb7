/// One selectable choice in a pending selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// The label shown to the user, index-disambiguated.
    pub label: String,

    /// The value sent to the server when this choice is picked.
    pub payload: String,
}

/// A choice set produced by rendering a buttons or quick-replies payload.
///
/// A pending selection exists only between one render step and the next
/// input step: the next read presents these choices instead of free text,
/// and every render step replaces it outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSelection {
    /// Prompt shown above the choices.
    pub prompt: String,

    /// The choices, in the order the server sent them.
    pub choices: Vec<Choice>,
}

impl PendingSelection {
    /// Creates a new pending selection.
    pub fn new(prompt: impl Into<String>, choices: Vec<Choice>) -> Self {
        PendingSelection {
            prompt: prompt.into(),
            choices,
        }
    }
}
