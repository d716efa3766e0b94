//! Completion screen and the read-only answer review.

use formfill::{AnswerValue, Answers, FieldKind, Question};

use crate::escape_html;

/// The screen shown after the last step-mode question.
pub fn render_completion() -> String {
    let mut html = String::from("<div class=\"text-center\">\n");
    html.push_str("  <h3>Form Complete</h3>\n");
    html.push_str("  <p>Please review your answers before submitting.</p>\n");
    html.push_str("  <div class=\"mt-4\">\n");
    html.push_str(
        "    <button id=\"review-button\" class=\"btn btn-secondary\">Review Answers</button>\n",
    );
    html.push_str("  </div>\n</div>\n");
    html
}

/// Summarize every question with its answer.
pub fn render_review(questions: &[Question], answers: &Answers) -> String {
    let mut html = String::from("<div class=\"review-container\">\n");
    html.push_str("  <h3>Review Your Answers</h3>\n");
    html.push_str("  <p>Please review your answers before submitting the form.</p>\n");
    html.push_str("  <div class=\"mt-4\">\n");

    for question in questions {
        html.push_str("    <div class=\"mb-4\">\n");
        html.push_str(&format!(
            "      <div class=\"fw-bold\">{}</div>\n",
            escape_html(question.text())
        ));
        html.push_str("      <div class=\"mt-2\">");
        html.push_str(&render_answer(question, answers.get(question.id().as_str())));
        html.push_str("</div>\n");
        html.push_str("    </div>\n");
    }

    html.push_str("  </div>\n");
    html.push_str("  <div class=\"mt-4\">\n");
    html.push_str("    <button id=\"continue-editing-button\" class=\"btn btn-secondary\">Continue Editing</button>\n");
    html.push_str("  </div>\n</div>\n");
    html
}

fn render_answer(question: &Question, answer: Option<&AnswerValue>) -> String {
    match answer {
        Some(AnswerValue::Choices(list)) if question.kind() == FieldKind::MultiChoice => {
            if list.is_empty() {
                return "<em>No options selected</em>".to_string();
            }
            list.iter()
                .map(|option| format!("<div>- {}</div>", escape_html(option)))
                .collect()
        }
        Some(value) if !value.is_empty() => match value {
            AnswerValue::Text(text) => escape_html(text),
            AnswerValue::Choices(list) => escape_html(&list.join(", ")),
        },
        _ => "<em>No answer provided</em>".to_string(),
    }
}
