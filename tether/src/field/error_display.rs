/// Placement hint for a field's validation message.
///
/// The binder only sets and clears the message; the host that renders the
/// field decides what to do with this hint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorDisplay {
    /// Message rendered under the field.
    #[default]
    Below,
    /// Message rendered next to the field.
    Inline,
    /// Error styling only, no message text.
    None,
}

impl ErrorDisplay {
    /// Whether the host should render the message text.
    pub fn shows_message(self) -> bool {
        !matches!(self, Self::None)
    }
}
