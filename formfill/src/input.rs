//! Input events coming from rendered controls, and a scripted replayer for tests.

use formfill_types::{FormError, QuestionId};

use crate::Session;

/// A DOM-style event on a question control.
///
/// Text-like controls report `Input` on every keystroke. Choice and dropdown
/// controls report `Changed`. Checkboxes report `Toggled` per option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Input { id: QuestionId, value: String },
    Changed { id: QuestionId, value: String },
    Toggled {
        id: QuestionId,
        option: String,
        checked: bool,
    },
}

impl Session {
    /// Route an input event to the matching answer operation.
    pub fn apply(&mut self, event: InputEvent) -> Result<(), FormError> {
        match event {
            InputEvent::Input { id, value } | InputEvent::Changed { id, value } => {
                self.record_answer(id.as_str(), value)
            }
            InputEvent::Toggled {
                id,
                option,
                checked,
            } => self.toggle_choice(id.as_str(), &option, checked),
        }
    }
}

/// A pre-recorded sequence of input events.
///
/// Lets tests drive a session the way a user would without any renderer.
///
/// ```rust,ignore
/// ScriptedInput::new()
///     .with_text("name", "Ada")
///     .toggle("contact", "Email")
///     .replay(&mut session)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: Vec<InputEvent>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type into a text-like control.
    pub fn with_text(mut self, id: impl Into<QuestionId>, value: impl Into<String>) -> Self {
        self.events.push(InputEvent::Input {
            id: id.into(),
            value: value.into(),
        });
        self
    }

    /// Pick a radio option or dropdown entry.
    pub fn with_choice(mut self, id: impl Into<QuestionId>, value: impl Into<String>) -> Self {
        self.events.push(InputEvent::Changed {
            id: id.into(),
            value: value.into(),
        });
        self
    }

    /// Check a checkbox option.
    pub fn toggle(self, id: impl Into<QuestionId>, option: impl Into<String>) -> Self {
        self.with_checked(id, option, true)
    }

    /// Uncheck a checkbox option.
    pub fn untoggle(self, id: impl Into<QuestionId>, option: impl Into<String>) -> Self {
        self.with_checked(id, option, false)
    }

    fn with_checked(
        mut self,
        id: impl Into<QuestionId>,
        option: impl Into<String>,
        checked: bool,
    ) -> Self {
        self.events.push(InputEvent::Toggled {
            id: id.into(),
            option: option.into(),
            checked,
        });
        self
    }

    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    /// Apply every event in order, stopping at the first rejected one.
    pub fn replay(&self, session: &mut Session) -> Result<(), FormError> {
        for event in &self.events {
            session.apply(event.clone())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DisplayMode;
    use formfill_types::{AnswerValue, Answers, FieldKind, FormDefinition, Question};

    fn session() -> Session {
        let definition = FormDefinition::new(vec![
            Question::new("name", "Name", FieldKind::ShortText),
            Question::new("contact", "Contact", FieldKind::MultiChoice)
                .with_options(["Email", "Phone"]),
        ]);
        Session::new(definition, Answers::new(), DisplayMode::Full)
    }

    #[test]
    fn replay_records_answers() {
        let mut session = session();
        ScriptedInput::new()
            .with_text("name", "A")
            .with_text("name", "Ada")
            .toggle("contact", "Phone")
            .toggle("contact", "Email")
            .untoggle("contact", "Phone")
            .replay(&mut session)
            .unwrap();

        assert_eq!(session.answer("name"), Some(&AnswerValue::from("Ada")));
        assert_eq!(
            session.answer("contact"),
            Some(&AnswerValue::from(vec!["Email"]))
        );
    }

    #[test]
    fn replay_stops_on_unknown_question() {
        let mut session = session();
        let result = ScriptedInput::new()
            .with_text("ghost", "boo")
            .with_text("name", "never")
            .replay(&mut session);

        assert!(result.is_err());
        assert!(session.answer("name").is_none());
    }
}
