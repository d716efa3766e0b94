use std::fmt;

use crate::QuestionId;

/// A single question in a form.
///
/// Questions are immutable once loaded; the session owns them for the
/// lifetime of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Unique, stable identifier. Also the key in `Answers`.
    id: QuestionId,

    /// The prompt text shown to the user.
    text: String,

    /// Whether a non-empty answer is needed before submission.
    required: bool,

    /// The kind of input control.
    kind: FieldKind,

    /// Option labels for choice kinds, in display order.
    options: Vec<String>,
}

impl Question {
    /// Create a new optional question without options.
    pub fn new(id: impl Into<QuestionId>, text: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            required: false,
            kind,
            options: Vec::new(),
        }
    }

    /// Mark the question as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the required flag.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the option labels.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Get the question identifier.
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    /// Get the prompt text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether this question must be answered.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Get the field kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Get the option labels.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Check if `option` is one of this question's options.
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// The kind of input control a question renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldKind {
    /// Single-line text input.
    #[default]
    ShortText,

    /// Multi-line textarea.
    LongText,

    /// Numeric input.
    Number,

    /// Date picker.
    Date,

    /// Email input.
    Email,

    /// Radio group, exactly one option.
    SingleChoice,

    /// Checkbox group, any number of options.
    MultiChoice,

    /// Dropdown select, exactly one option.
    Dropdown,
}

impl FieldKind {
    /// All kinds, in declaration order.
    pub const ALL: [FieldKind; 8] = [
        Self::ShortText,
        Self::LongText,
        Self::Number,
        Self::Date,
        Self::Email,
        Self::SingleChoice,
        Self::MultiChoice,
        Self::Dropdown,
    ];

    /// Parse the `field_type` string used by form definitions.
    ///
    /// Unrecognized kinds (`heading`, `readonly`, typos) fall back to
    /// short text.
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim() {
            "text" => Self::ShortText,
            "textarea" => Self::LongText,
            "number" => Self::Number,
            "date" => Self::Date,
            "email" => Self::Email,
            "radio" => Self::SingleChoice,
            "checkbox" => Self::MultiChoice,
            "select" => Self::Dropdown,
            _ => Self::ShortText,
        }
    }

    /// The `field_type` string for this kind.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::ShortText => "text",
            Self::LongText => "textarea",
            Self::Number => "number",
            Self::Date => "date",
            Self::Email => "email",
            Self::SingleChoice => "radio",
            Self::MultiChoice => "checkbox",
            Self::Dropdown => "select",
        }
    }

    /// Check if this kind enumerates options.
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::SingleChoice | Self::MultiChoice | Self::Dropdown)
    }

    /// Check if answers of this kind are lists.
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::MultiChoice)
    }

    /// Check if this kind is edited through a free-text control.
    pub fn is_text_like(&self) -> bool {
        !self.is_choice()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}
