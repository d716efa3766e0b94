//! Save indicator, submit button, and submission outcome snippets.

use formfill::{MissingField, SUBMIT_NETWORK_ERROR, SaveStatus, SubmitControl};

use crate::{HtmlOptions, escape_html};

const DEFAULT_REJECTION: &str = "An error occurred during submission.";
const NOT_EMAILED: &str = "Your form has been saved but could not be emailed at this time.";

/// Content of the save indicator.
pub fn render_save_indicator(status: SaveStatus) -> String {
    match status {
        SaveStatus::Idle => String::new(),
        SaveStatus::Saving => "<span class=\"loading-spinner\"></span> Saving...".to_string(),
        SaveStatus::Saved => "<i class=\"bi bi-check-circle\"></i> Saved".to_string(),
        SaveStatus::Failed => {
            "<i class=\"bi bi-exclamation-triangle\"></i> Save failed".to_string()
        }
    }
}

/// Content of the submit button.
pub fn render_submit_button(control: SubmitControl) -> String {
    match control {
        SubmitControl::Enabled => "Submit Form".to_string(),
        SubmitControl::Submitting => "<span class=\"spinner-border spinner-border-sm\" role=\"status\" aria-hidden=\"true\"></span> Submitting...".to_string(),
    }
}

/// The page that replaces the form after a successful submit.
pub fn render_submit_success(
    email_sent: bool,
    message: Option<&str>,
    options: &HtmlOptions,
) -> String {
    let mut html = String::from("<div class=\"alert alert-success\">\n");
    html.push_str("  <h4>Form Submitted Successfully!</h4>\n");
    html.push_str("  <p>Thank you for completing this form.</p>\n");
    if email_sent {
        match &options.organization {
            Some(org) => html.push_str(&format!(
                "  <p>A copy of your completed form has been emailed to you and {}.</p>\n",
                escape_html(org)
            )),
            None => {
                html.push_str("  <p>A copy of your completed form has been emailed to you.</p>\n")
            }
        }
    } else {
        let note = message.filter(|m| !m.is_empty()).unwrap_or(NOT_EMAILED);
        html.push_str(&format!("  <p>Note: {}</p>\n", escape_html(note)));
    }
    html.push_str("  <div class=\"mt-4\">\n");
    html.push_str(&format!(
        "    <a href=\"{}\" class=\"btn btn-primary\">Return to Forms</a>\n",
        escape_html(&options.return_url)
    ));
    html.push_str("  </div>\n</div>\n");
    html
}

/// The error shown when the server refuses a submission.
///
/// Missing fields reported by the server are listed by question text.
pub fn render_submit_error(message: Option<&str>, missing: &[MissingField]) -> String {
    let mut body = escape_html(message.filter(|m| !m.is_empty()).unwrap_or(DEFAULT_REJECTION));
    if !missing.is_empty() {
        body.push_str("<ul>");
        for field in missing {
            body.push_str(&format!("<li>{}</li>", escape_html(&field.question)));
        }
        body.push_str("</ul>");
    }
    submission_error(&body)
}

/// The error shown when the submit request never got a reply.
pub fn render_network_error() -> String {
    submission_error(SUBMIT_NETWORK_ERROR)
}

fn submission_error(body: &str) -> String {
    format!(
        "<div class=\"alert alert-danger\">\n  <h4>Submission Error</h4>\n  <p>{body}</p>\n</div>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use formfill::QuestionId;

    #[test]
    fn save_indicator_states() {
        assert_eq!(render_save_indicator(SaveStatus::Idle), "");
        assert!(render_save_indicator(SaveStatus::Saving).ends_with("Saving..."));
        assert!(render_save_indicator(SaveStatus::Saved).ends_with("Saved"));
        assert!(render_save_indicator(SaveStatus::Failed).ends_with("Save failed"));
    }

    #[test]
    fn success_mentions_email_copy() {
        let html = render_submit_success(
            true,
            None,
            &HtmlOptions::new().with_organization("Riverside Clinic"),
        );
        assert!(html.contains("emailed to you and Riverside Clinic."));
        assert!(html.contains("href=\"/forms\""));
    }

    #[test]
    fn success_without_email_shows_note() {
        let options = HtmlOptions::new();
        let html = render_submit_success(false, None, &options);
        assert!(html.contains("Note: Your form has been saved but could not be emailed"));

        let html = render_submit_success(false, Some("Mail server down"), &options);
        assert!(html.contains("Note: Mail server down"));
    }

    #[test]
    fn rejection_lists_missing_fields() {
        let missing = vec![MissingField {
            id: QuestionId::new("q2"),
            question: "Second".to_string(),
        }];
        let html = render_submit_error(Some("Form has incomplete or invalid fields"), &missing);
        assert!(html.contains("Submission Error"));
        assert!(html.contains("Form has incomplete or invalid fields<ul><li>Second</li></ul>"));
    }

    #[test]
    fn network_error_is_generic() {
        assert!(render_network_error().contains(SUBMIT_NETWORK_ERROR));
        assert_eq!(render_submit_button(SubmitControl::Enabled), "Submit Form");
    }
}
