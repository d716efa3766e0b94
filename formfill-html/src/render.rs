//! Question markup for both display modes.

use formfill::{AnswerValue, DisplayMode, FieldKind, Question, Session, Stage};

use crate::review::{render_completion, render_review};

/// Options for HTML generation.
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Who else receives the emailed copy of a submitted form.
    pub organization: Option<String>,
    /// Target of the "Return to Forms" link after a successful submit.
    pub return_url: String,
    /// Rows shown for long-text answers.
    pub textarea_rows: usize,
}

impl HtmlOptions {
    /// Create new options with default values.
    pub fn new() -> Self {
        Self {
            organization: None,
            return_url: "/forms".to_string(),
            textarea_rows: 4,
        }
    }

    /// Name the organization copied on submission emails.
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Set the "Return to Forms" target.
    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = url.into();
        self
    }

    /// Set the number of rows for long-text answers.
    pub fn with_textarea_rows(mut self, rows: usize) -> Self {
        self.textarea_rows = rows;
        self
    }
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) const NO_QUESTIONS: &str =
    "<div class=\"alert alert-warning\">No questions found in this form.</div>";

/// Render whatever the session is currently showing.
///
/// Step mode shows the current question, the completion screen, or the
/// review. Full-form mode shows every question, or the review.
pub fn render_session(session: &Session, options: &HtmlOptions) -> String {
    if session.questions().is_empty() {
        return NO_QUESTIONS.to_string();
    }
    match (session.mode(), session.stage()) {
        (_, Stage::Review) => render_review(session.questions(), session.answers()),
        (DisplayMode::Step, Stage::Complete) => render_completion(),
        (DisplayMode::Step, Stage::Editing) => render_step(session, options),
        (DisplayMode::Full, _) => render_form(session, options),
    }
}

/// Render the current question of a step-mode session.
pub fn render_step(session: &Session, options: &HtmlOptions) -> String {
    let Some(question) = session.current_question() else {
        return NO_QUESTIONS.to_string();
    };
    render_question(
        question,
        session.answer(question.id().as_str()),
        session.is_invalid(question.id().as_str()),
        DisplayMode::Step,
        options,
    )
}

/// Render every question of the session on one page.
pub fn render_form(session: &Session, options: &HtmlOptions) -> String {
    if session.questions().is_empty() {
        return NO_QUESTIONS.to_string();
    }
    let mut html = String::from("<form id=\"dynamic-form\">\n");
    for question in session.questions() {
        let id = question.id().as_str();
        html.push_str(&render_question(
            question,
            session.answer(id),
            session.is_invalid(id),
            DisplayMode::Full,
            options,
        ));
    }
    html.push_str("</form>\n");
    html
}

/// Render one question: its title and its control.
pub fn render_question(
    question: &Question,
    answer: Option<&AnswerValue>,
    invalid: bool,
    mode: DisplayMode,
    options: &HtmlOptions,
) -> String {
    let title = escape_html(question.text());
    let marker = if question.is_required() {
        " <span class=\"required-indicator text-danger\">*</span>"
    } else {
        ""
    };

    let mut html = String::new();
    match mode {
        DisplayMode::Step => {
            html.push_str("<div class=\"question-container\">\n");
            html.push_str(&format!(
                "  <h2 class=\"question-title\">{title}{marker}</h2>\n"
            ));
        }
        DisplayMode::Full => {
            html.push_str(&format!(
                "<div class=\"form-group mb-4\" id=\"question-{}\">\n",
                escape_html(question.id().as_str())
            ));
            html.push_str(&format!(
                "  <div class=\"question-title\">{title}{marker}</div>\n"
            ));
        }
    }
    html.push_str(&render_field(question, answer, invalid, mode, options));
    html.push_str("</div>\n");
    html
}

/// Render the input control for a question.
///
/// This is the single dispatch on `FieldKind` shared by both modes. An
/// invalid question gets `is-invalid` on its controls and exactly one
/// validation message after them.
pub fn render_field(
    question: &Question,
    answer: Option<&AnswerValue>,
    invalid: bool,
    mode: DisplayMode,
    options: &HtmlOptions,
) -> String {
    let margin = match mode {
        DisplayMode::Step => "mt-3",
        DisplayMode::Full => "mt-2",
    };
    let id = question.id();
    let input_id = escape_html(&id.input_id());
    let data_id = escape_html(id.as_str());
    let required = if question.is_required() { " required" } else { "" };
    let invalid_class = if invalid { " is-invalid" } else { "" };
    let text = escape_html(answer.and_then(AnswerValue::as_text).unwrap_or(""));

    let mut html = String::new();
    match question.kind() {
        FieldKind::ShortText | FieldKind::Number | FieldKind::Date | FieldKind::Email => {
            let input_type = match question.kind() {
                FieldKind::Number => "number",
                FieldKind::Date => "date",
                FieldKind::Email => "email",
                _ => "text",
            };
            html.push_str(&format!(
                "  <input type=\"{input_type}\" class=\"form-control {margin}{invalid_class}\" id=\"{input_id}\" data-question-id=\"{data_id}\" value=\"{text}\"{required}>\n"
            ));
        }

        FieldKind::LongText => {
            html.push_str(&format!(
                "  <textarea class=\"form-control {margin}{invalid_class}\" id=\"{input_id}\" data-question-id=\"{data_id}\" rows=\"{}\"{required}>{text}</textarea>\n",
                options.textarea_rows
            ));
        }

        FieldKind::SingleChoice | FieldKind::MultiChoice => {
            let (input_type, required) = match question.kind() {
                FieldKind::SingleChoice => ("radio", required),
                _ => ("checkbox", ""),
            };
            html.push_str(&format!("  <div class=\"{margin}\" id=\"{input_id}\">\n"));
            for (index, option) in question.options().iter().enumerate() {
                let option_id = escape_html(&id.option_id(index));
                let checked = if answer.is_some_and(|a| a.selects(option)) {
                    " checked"
                } else {
                    ""
                };
                let value = escape_html(option);
                html.push_str("    <div class=\"form-check\">\n");
                html.push_str(&format!(
                    "      <input class=\"form-check-input{invalid_class}\" type=\"{input_type}\" name=\"{input_id}\" data-question-id=\"{data_id}\" id=\"{option_id}\" value=\"{value}\"{checked}{required}>\n"
                ));
                html.push_str(&format!(
                    "      <label class=\"form-check-label\" for=\"{option_id}\">{value}</label>\n"
                ));
                html.push_str("    </div>\n");
            }
            html.push_str("  </div>\n");
        }

        FieldKind::Dropdown => {
            let current = answer.and_then(AnswerValue::as_text).unwrap_or("");
            let placeholder = if current.is_empty() { " selected" } else { "" };
            html.push_str(&format!(
                "  <select class=\"form-select {margin}{invalid_class}\" id=\"{input_id}\" data-question-id=\"{data_id}\"{required}>\n"
            ));
            html.push_str(&format!(
                "    <option value=\"\"{placeholder}>Select an option</option>\n"
            ));
            for option in question.options() {
                let selected = if option == current { " selected" } else { "" };
                let value = escape_html(option);
                html.push_str(&format!(
                    "    <option value=\"{value}\"{selected}>{value}</option>\n"
                ));
            }
            html.push_str("  </select>\n");
        }
    }

    if invalid {
        html.push_str(&format!(
            "  <div id=\"{}\" class=\"invalid-feedback\">{}</div>\n",
            escape_html(&id.validation_id()),
            formfill::REQUIRED_MESSAGE
        ));
    }
    html
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
