//! The form session: answers, current position, and validation marks.

use std::collections::BTreeSet;

use formfill_types::{
    AnswerValue, Answers, FieldKind, FormDefinition, FormError, Question, QuestionId,
    is_satisfied, missing_required,
};
use serde::Serialize;

use crate::SessionEvent;

/// How questions are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// One question at a time with previous/next navigation.
    #[default]
    Step,

    /// All questions on one page, no navigation.
    Full,
}

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// Answering questions.
    #[default]
    Editing,

    /// Past the last question (the completion pseudo-state).
    Complete,

    /// Read-only summary of all answers.
    Review,
}

/// Where a step-mode session starts when saved answers exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResumePolicy {
    /// Always start at the first question.
    Start,

    /// One past the last answered question, capped at the last question.
    ///
    /// Never lands beyond a required question that is still unanswered, so
    /// answers saved out of order cannot make the user skip it.
    #[default]
    AfterLastAnswered,
}

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The current index changed.
    Moved { from: usize, to: usize },

    /// The last question was passed.
    Completed,

    /// The current question is required and unanswered.
    Blocked(QuestionId),

    /// The review screen opened.
    Reviewing,

    /// Editing resumed at this index.
    Editing(usize),

    /// Nothing to do in the current mode or stage.
    Unchanged,
}

/// Visibility of the navigation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavButtons {
    pub previous_visible: bool,
    pub previous_enabled: bool,
    pub next_visible: bool,
    pub submit_visible: bool,
}

/// Body of a save request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavePayload {
    pub answers: Answers,
    #[serde(rename = "currentQuestion", skip_serializing_if = "Option::is_none")]
    pub current_question: Option<QuestionId>,
}

/// Body of a submit request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitPayload {
    pub answers: Answers,
}

/// Outcome of the client-side required-field sweep.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitCheck {
    /// Every required question is answered.
    Ready(SubmitPayload),

    /// Submission must not reach the network.
    Blocked {
        /// Offending questions, in display order.
        missing: Vec<QuestionId>,
        /// The first offender, which the view focuses or scrolls to.
        focus: QuestionId,
    },
}

impl SubmitCheck {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// One user's pass through a form.
///
/// Holds the question list, the answer map, the current index (step mode),
/// and the set of questions currently marked invalid. All operations are
/// pure state transitions; they queue `SessionEvent`s for the view layer.
#[derive(Debug, Clone)]
pub struct Session {
    definition: FormDefinition,
    answers: Answers,
    mode: DisplayMode,
    index: usize,
    stage: Stage,
    invalid: BTreeSet<QuestionId>,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Create a session at the first question.
    ///
    /// Answers for questions the definition does not contain are dropped.
    pub fn new(definition: FormDefinition, mut answers: Answers, mode: DisplayMode) -> Self {
        for id in answers.retain_known(definition.questions()) {
            tracing::warn!(question = %id, "dropping answer for unknown question");
        }
        Self {
            definition,
            answers,
            mode,
            index: 0,
            stage: Stage::Editing,
            invalid: BTreeSet::new(),
            events: Vec::new(),
        }
    }

    /// Create a session and move to the resume position.
    pub fn resumed(
        definition: FormDefinition,
        answers: Answers,
        mode: DisplayMode,
        policy: ResumePolicy,
    ) -> Self {
        let mut session = Self::new(definition, answers, mode);
        session.resume(policy);
        session
    }

    // === Accessors ===

    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }

    pub fn questions(&self) -> &[Question] {
        self.definition.questions()
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The current question index (step mode).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Position in `[0, len]`, where `len` is the completion pseudo-state.
    pub fn position(&self) -> usize {
        match self.stage {
            Stage::Editing => self.index,
            Stage::Complete | Stage::Review => self.definition.len(),
        }
    }

    /// The question at the current index.
    pub fn current_question(&self) -> Option<&Question> {
        self.definition.questions.get(self.index)
    }

    /// Read back a stored answer.
    pub fn answer(&self, id: &str) -> Option<&AnswerValue> {
        self.answers.get(id)
    }

    /// Check if a question is currently marked invalid.
    pub fn is_invalid(&self, id: &str) -> bool {
        self.invalid.contains(id)
    }

    /// Questions currently marked invalid.
    pub fn invalid(&self) -> impl Iterator<Item = &QuestionId> {
        self.invalid.iter()
    }

    /// Drain the queued events.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // === Answers ===

    /// Store an answer, overwriting the previous one.
    ///
    /// Any value is accepted, including empty ones. The identifier must
    /// belong to the form.
    pub fn record_answer(
        &mut self,
        id: &str,
        value: impl Into<AnswerValue>,
    ) -> Result<(), FormError> {
        let question = self.question(id)?;
        let id = question.id().clone();
        self.store(id, value.into());
        Ok(())
    }

    /// Apply a checkbox toggle to a multi-choice question.
    ///
    /// The stored list is recomputed from the full checked set in option
    /// order, so it always mirrors the state of the checkboxes.
    pub fn toggle_choice(&mut self, id: &str, option: &str, checked: bool) -> Result<(), FormError> {
        let question = self.multi_choice(id)?;
        let mut set: BTreeSet<&str> = self
            .answers
            .get(id)
            .and_then(AnswerValue::as_choices)
            .map(|list| list.iter().map(String::as_str).collect())
            .unwrap_or_default();
        if checked {
            set.insert(option);
        } else {
            set.remove(option);
        }
        let selected = ordered_selection(question, |o| set.contains(o));
        let id = question.id().clone();
        self.store(id, AnswerValue::Choices(selected));
        Ok(())
    }

    /// Replace a multi-choice answer with the given checked options.
    pub fn set_checked<'a, I>(&mut self, id: &str, checked: I) -> Result<(), FormError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let question = self.multi_choice(id)?;
        let checked: BTreeSet<&str> = checked.into_iter().collect();
        let selected = ordered_selection(question, |o| checked.contains(o));
        let id = question.id().clone();
        self.store(id, AnswerValue::Choices(selected));
        Ok(())
    }

    fn store(&mut self, id: QuestionId, value: AnswerValue) {
        tracing::trace!(question = %id, "answer recorded");
        self.answers.insert(id.clone(), value);
        self.events.push(SessionEvent::AnswerRecorded(id.clone()));

        let satisfied = self
            .definition
            .question(id.as_str())
            .is_some_and(|q| is_satisfied(q, &self.answers));
        if satisfied && self.invalid.remove(&id) {
            self.events.push(SessionEvent::MarkCleared(id));
        }
    }

    fn question(&self, id: &str) -> Result<&Question, FormError> {
        self.definition
            .question(id)
            .ok_or_else(|| FormError::UnknownQuestion(QuestionId::new(id)))
    }

    fn multi_choice(&self, id: &str) -> Result<&Question, FormError> {
        let question = self.question(id)?;
        if question.kind() != FieldKind::MultiChoice {
            return Err(FormError::NotAChoice {
                id: question.id().clone(),
                kind: question.kind(),
            });
        }
        Ok(question)
    }

    // === Validation ===

    /// Pass/fail for one question against the current answers.
    pub fn validate(&self, question: &Question) -> bool {
        is_satisfied(question, &self.answers)
    }

    /// Validate the question at the current index.
    pub fn validate_current(&self) -> bool {
        self.current_question().is_none_or(|q| self.validate(q))
    }

    fn mark_invalid(&mut self, id: QuestionId) {
        self.invalid.insert(id.clone());
        self.events.push(SessionEvent::ValidationFailed(id));
    }

    // === Progress ===

    /// Progress as a whole percentage.
    pub fn progress(&self) -> u8 {
        let len = self.definition.len();
        if self.mode == DisplayMode::Full || self.stage != Stage::Editing || len <= 1 {
            return 100;
        }
        let fraction = self.index as f64 / (len - 1) as f64;
        (fraction * 100.0).round().clamp(0.0, 100.0) as u8
    }

    /// Text shown next to the progress bar.
    pub fn progress_label(&self) -> Option<String> {
        let len = self.definition.len();
        match (self.mode, self.stage) {
            (DisplayMode::Full, _) => None,
            _ if len == 0 => None,
            (DisplayMode::Step, Stage::Editing) => {
                Some(format!("Question {} of {}", self.index + 1, len))
            }
            (DisplayMode::Step, Stage::Complete | Stage::Review) => {
                Some(format!("Review ({len} of {len})"))
            }
        }
    }

    /// Which navigation controls are shown.
    pub fn navigation(&self) -> NavButtons {
        let len = self.definition.len();
        if len == 0 {
            return NavButtons::default();
        }
        match (self.mode, self.stage) {
            (DisplayMode::Full, _) => NavButtons {
                submit_visible: true,
                ..NavButtons::default()
            },
            (DisplayMode::Step, Stage::Editing) => {
                let at_last = self.index + 1 >= len;
                NavButtons {
                    previous_visible: self.index > 0,
                    previous_enabled: self.index > 0,
                    next_visible: !at_last,
                    submit_visible: at_last,
                }
            }
            (DisplayMode::Step, Stage::Complete | Stage::Review) => NavButtons {
                previous_visible: true,
                previous_enabled: true,
                next_visible: false,
                submit_visible: true,
            },
        }
    }

    // === Navigation ===

    /// Advance to the next question if the current one validates.
    pub fn next(&mut self) -> Navigation {
        if self.mode != DisplayMode::Step || self.stage != Stage::Editing {
            return Navigation::Unchanged;
        }
        let Some(question) = self.current_question() else {
            return Navigation::Unchanged;
        };
        if !self.validate(question) {
            let id = question.id().clone();
            tracing::debug!(question = %id, "next blocked by required question");
            self.mark_invalid(id.clone());
            return Navigation::Blocked(id);
        }

        if self.index + 1 < self.definition.len() {
            let from = self.index;
            self.jump_to(from + 1);
            Navigation::Moved {
                from,
                to: self.index,
            }
        } else {
            self.stage = Stage::Complete;
            self.events.push(SessionEvent::Completed);
            Navigation::Completed
        }
    }

    /// Go back one question, never below the first.
    ///
    /// From the completion or review screen this returns to editing.
    pub fn previous(&mut self) -> Navigation {
        if self.mode != DisplayMode::Step || self.definition.is_empty() {
            return Navigation::Unchanged;
        }
        let from = self.index;
        let to = from.saturating_sub(1);
        if self.stage != Stage::Editing {
            self.stage = Stage::Editing;
            self.index = to;
            self.events.push(SessionEvent::EditingResumed(to));
            return Navigation::Editing(to);
        }
        if from == to {
            return Navigation::Unchanged;
        }
        self.jump_to(to);
        Navigation::Moved { from, to }
    }

    /// Open the read-only review.
    ///
    /// Step mode allows this only from the completion screen.
    pub fn review(&mut self) -> Navigation {
        let allowed = match self.mode {
            DisplayMode::Step => self.stage == Stage::Complete,
            DisplayMode::Full => self.stage == Stage::Editing,
        };
        if !allowed {
            return Navigation::Unchanged;
        }
        self.stage = Stage::Review;
        self.events.push(SessionEvent::ReviewOpened);
        Navigation::Reviewing
    }

    /// Leave the completion or review screen at the current index.
    pub fn continue_editing(&mut self) -> Navigation {
        if self.stage == Stage::Editing {
            return Navigation::Unchanged;
        }
        self.stage = Stage::Editing;
        self.events.push(SessionEvent::EditingResumed(self.index));
        Navigation::Editing(self.index)
    }

    /// Move to the resume position for saved answers.
    pub fn resume(&mut self, policy: ResumePolicy) -> usize {
        if self.mode != DisplayMode::Step || self.definition.is_empty() {
            return self.index;
        }
        let target = match policy {
            ResumePolicy::Start => 0,
            ResumePolicy::AfterLastAnswered => self.after_last_answered(),
        };
        if target != self.index {
            tracing::debug!(index = target, "resuming saved form");
            self.jump_to(target);
        }
        self.index
    }

    fn after_last_answered(&self) -> usize {
        let questions = self.questions();
        let Some(last) = questions
            .iter()
            .rposition(|q| self.answers.has_value(q.id().as_str()))
        else {
            return 0;
        };
        let target = (last + 1).min(questions.len() - 1);
        let first_gap = questions[..target]
            .iter()
            .position(|q| !self.validate(q))
            .unwrap_or(target);
        target.min(first_gap)
    }

    fn jump_to(&mut self, to: usize) {
        let from = self.index;
        self.index = to;
        self.stage = Stage::Editing;
        self.events.push(SessionEvent::Moved { from, to });
    }

    // === Submission ===

    /// Run the required-field sweep that precedes every submit.
    ///
    /// On failure exactly the offending questions are marked invalid. Step
    /// mode moves to the first offender and focuses it; full-form mode
    /// leaves the review, if open, and scrolls to it.
    pub fn prepare_submit(&mut self) -> SubmitCheck {
        let missing: Vec<QuestionId> = missing_required(self.questions(), &self.answers)
            .into_iter()
            .map(|field| field.id)
            .collect();

        let Some(first) = missing.first().cloned() else {
            self.invalid.clear();
            return SubmitCheck::Ready(self.submit_payload());
        };

        tracing::debug!(missing = missing.len(), "submit blocked by required questions");
        self.invalid = missing.iter().cloned().collect();

        match self.mode {
            DisplayMode::Step => {
                if let Some(index) = self.definition.position(first.as_str())
                    && (index != self.index || self.stage != Stage::Editing)
                {
                    self.jump_to(index);
                }
                self.events.push(SessionEvent::SubmitBlocked {
                    missing: missing.clone(),
                });
                self.events.push(SessionEvent::Focus(first.clone()));
            }
            DisplayMode::Full => {
                if self.stage != Stage::Editing {
                    self.stage = Stage::Editing;
                    self.events.push(SessionEvent::EditingResumed(self.index));
                }
                self.events.push(SessionEvent::SubmitBlocked {
                    missing: missing.clone(),
                });
                self.events.push(SessionEvent::ScrollTo(first.clone()));
            }
        }

        SubmitCheck::Blocked {
            missing,
            focus: first,
        }
    }

    /// Snapshot for the save endpoint.
    pub fn save_payload(&self) -> SavePayload {
        let current_question = match (self.mode, self.stage) {
            (DisplayMode::Step, Stage::Editing) => self.current_question().map(|q| q.id().clone()),
            _ => None,
        };
        SavePayload {
            answers: self.answers.clone(),
            current_question,
        }
    }

    /// Snapshot for the submit endpoint.
    pub fn submit_payload(&self) -> SubmitPayload {
        SubmitPayload {
            answers: self.answers.clone(),
        }
    }
}

fn ordered_selection(question: &Question, is_checked: impl Fn(&str) -> bool) -> Vec<String> {
    question
        .options()
        .iter()
        .filter(|o| is_checked(o.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn three_questions() -> FormDefinition {
        FormDefinition::new(vec![
            Question::new("q1", "First", FieldKind::ShortText),
            Question::new("q2", "Second", FieldKind::ShortText).required(),
            Question::new("q3", "Third", FieldKind::ShortText),
        ])
    }

    fn five_questions() -> FormDefinition {
        FormDefinition::new(
            (1..=5)
                .map(|n| Question::new(format!("q{n}"), format!("Q{n}"), FieldKind::ShortText))
                .collect(),
        )
    }

    fn contact() -> FormDefinition {
        FormDefinition::new(vec![
            Question::new("contact", "Contact", FieldKind::MultiChoice)
                .with_options(["A", "B", "C"]),
            Question::new("mood", "Mood", FieldKind::SingleChoice).with_options(["Happy", "Sad"]),
        ])
    }

    #[test]
    fn record_then_read_back() {
        let mut session = Session::new(three_questions(), Answers::new(), DisplayMode::Step);
        session.record_answer("q1", "hello").unwrap();
        assert_eq!(session.answer("q1"), Some(&AnswerValue::from("hello")));

        session.record_answer("q1", "").unwrap();
        assert_eq!(session.answer("q1"), Some(&AnswerValue::from("")));
    }

    #[test]
    fn unknown_question_is_rejected() {
        let mut session = Session::new(three_questions(), Answers::new(), DisplayMode::Step);
        let err = session.record_answer("ghost", "x").unwrap_err();
        assert!(matches!(err, FormError::UnknownQuestion(_)));
        assert!(session.answers().is_empty());
    }

    #[test]
    fn toggles_recompute_the_whole_set() {
        let mut session = Session::new(contact(), Answers::new(), DisplayMode::Full);
        session.toggle_choice("contact", "A", true).unwrap();
        session.toggle_choice("contact", "B", true).unwrap();
        session.toggle_choice("contact", "A", false).unwrap();
        assert_eq!(session.answer("contact"), Some(&AnswerValue::from(vec!["B"])));
    }

    #[test]
    fn toggles_keep_option_order_and_ignore_unknown_options() {
        let mut session = Session::new(contact(), Answers::new(), DisplayMode::Full);
        session.toggle_choice("contact", "C", true).unwrap();
        session.toggle_choice("contact", "A", true).unwrap();
        session.toggle_choice("contact", "Z", true).unwrap();
        assert_eq!(
            session.answer("contact"),
            Some(&AnswerValue::from(vec!["A", "C"]))
        );
    }

    #[test]
    fn set_checked_normalizes() {
        let mut session = Session::new(contact(), Answers::new(), DisplayMode::Full);
        session.set_checked("contact", ["C", "B", "B"]).unwrap();
        assert_eq!(
            session.answer("contact"),
            Some(&AnswerValue::from(vec!["B", "C"]))
        );
    }

    #[test]
    fn toggle_on_single_choice_is_rejected() {
        let mut session = Session::new(contact(), Answers::new(), DisplayMode::Full);
        let err = session.toggle_choice("mood", "Happy", true).unwrap_err();
        assert!(matches!(err, FormError::NotAChoice { .. }));
    }

    #[test]
    fn progress_in_step_mode() {
        let mut session = Session::new(five_questions(), Answers::new(), DisplayMode::Step);
        assert_eq!(session.progress(), 0);
        session.next();
        session.next();
        assert_eq!(session.index(), 2);
        assert_eq!(session.progress(), 50);
        assert_eq!(session.progress_label().as_deref(), Some("Question 3 of 5"));
    }

    #[test]
    fn progress_in_full_mode_is_always_complete() {
        let session = Session::new(five_questions(), Answers::new(), DisplayMode::Full);
        assert_eq!(session.progress(), 100);
        assert_eq!(session.progress_label(), None);
    }

    #[test]
    fn next_blocks_on_required_question() {
        let mut session = Session::new(three_questions(), Answers::new(), DisplayMode::Step);
        assert_eq!(session.next(), Navigation::Moved { from: 0, to: 1 });
        assert_eq!(session.next(), Navigation::Blocked(QuestionId::new("q2")));
        assert_eq!(session.next(), Navigation::Blocked(QuestionId::new("q2")));
        assert_eq!(session.index(), 1);
        assert_eq!(session.invalid().count(), 1);
        assert!(session.is_invalid("q2"));
    }

    #[test]
    fn answering_clears_the_mark() {
        let mut session = Session::new(three_questions(), Answers::new(), DisplayMode::Step);
        session.next();
        session.next();
        session.take_events();

        session.record_answer("q2", "done").unwrap();
        assert!(!session.is_invalid("q2"));
        assert_eq!(
            session.take_events(),
            vec![
                SessionEvent::AnswerRecorded(QuestionId::new("q2")),
                SessionEvent::MarkCleared(QuestionId::new("q2")),
            ]
        );
    }

    #[test]
    fn next_past_last_question_completes() {
        let mut session = Session::new(three_questions(), Answers::new(), DisplayMode::Step);
        session.record_answer("q2", "x").unwrap();
        session.next();
        session.next();
        assert_eq!(session.next(), Navigation::Completed);
        assert_eq!(session.stage(), Stage::Complete);
        assert_eq!(session.position(), 3);
        assert_eq!(session.progress(), 100);
        assert_eq!(session.progress_label().as_deref(), Some("Review (3 of 3)"));
        assert_eq!(session.next(), Navigation::Unchanged);
    }

    #[test]
    fn review_and_continue_editing() {
        let mut session = Session::new(three_questions(), Answers::new(), DisplayMode::Step);
        assert_eq!(session.review(), Navigation::Unchanged);

        session.record_answer("q2", "x").unwrap();
        session.next();
        session.next();
        session.next();
        assert_eq!(session.review(), Navigation::Reviewing);
        assert_eq!(session.stage(), Stage::Review);
        assert_eq!(session.continue_editing(), Navigation::Editing(2));
        assert_eq!(session.stage(), Stage::Editing);
    }

    #[test]
    fn previous_is_floored_at_zero() {
        let mut session = Session::new(three_questions(), Answers::new(), DisplayMode::Step);
        assert_eq!(session.previous(), Navigation::Unchanged);
        session.next();
        assert_eq!(session.previous(), Navigation::Moved { from: 1, to: 0 });
    }

    #[test]
    fn previous_from_completion_returns_to_editing() {
        let mut session = Session::new(three_questions(), Answers::new(), DisplayMode::Step);
        session.record_answer("q2", "x").unwrap();
        session.next();
        session.next();
        session.next();
        assert_eq!(session.previous(), Navigation::Editing(1));
        assert_eq!(session.stage(), Stage::Editing);
    }

    #[test]
    fn previous_keeps_validation_marks() {
        let mut session = Session::new(three_questions(), Answers::new(), DisplayMode::Step);
        session.next();
        session.next();
        session.previous();
        assert!(session.is_invalid("q2"));
    }

    #[test]
    fn navigation_buttons_in_step_mode() {
        let mut session = Session::new(three_questions(), Answers::new(), DisplayMode::Step);
        let first = session.navigation();
        assert!(!first.previous_visible && !first.previous_enabled);
        assert!(first.next_visible && !first.submit_visible);

        session.record_answer("q2", "x").unwrap();
        session.next();
        session.next();
        let last = session.navigation();
        assert!(last.previous_visible && !last.next_visible && last.submit_visible);
    }

    #[test]
    fn navigation_buttons_in_full_mode() {
        let session = Session::new(three_questions(), Answers::new(), DisplayMode::Full);
        assert_eq!(
            session.navigation(),
            NavButtons {
                previous_visible: false,
                previous_enabled: false,
                next_visible: false,
                submit_visible: true,
            }
        );
    }

    #[test]
    fn submit_in_step_mode_jumps_to_first_offender() {
        let mut session = Session::new(three_questions(), Answers::new(), DisplayMode::Step);
        session.record_answer("q1", "a").unwrap();
        session.next();
        session.record_answer("q2", "b").unwrap();
        session.next();
        session.record_answer("q2", "").unwrap();
        session.take_events();

        let check = session.prepare_submit();
        assert_eq!(
            check,
            SubmitCheck::Blocked {
                missing: vec![QuestionId::new("q2")],
                focus: QuestionId::new("q2"),
            }
        );
        assert_eq!(session.index(), 1);
        let events = session.take_events();
        assert_eq!(events[0], SessionEvent::Moved { from: 2, to: 1 });
        assert_eq!(events.last(), Some(&SessionEvent::Focus(QuestionId::new("q2"))));
    }

    #[test]
    fn submit_marks_exactly_the_missing_questions() {
        let definition = FormDefinition::new(vec![
            Question::new("a", "A", FieldKind::ShortText).required(),
            Question::new("b", "B", FieldKind::ShortText).required(),
            Question::new("c", "C", FieldKind::ShortText),
            Question::new("d", "D", FieldKind::MultiChoice)
                .required()
                .with_options(["x"]),
        ]);
        let mut answers = Answers::new();
        answers.insert("b", "filled");
        let mut session = Session::new(definition, answers, DisplayMode::Full);

        assert!(!session.prepare_submit().is_ready());
        let invalid: Vec<_> = session.invalid().map(QuestionId::as_str).collect();
        assert_eq!(invalid, vec!["a", "d"]);
        assert_eq!(
            session.take_events().last(),
            Some(&SessionEvent::ScrollTo(QuestionId::new("a")))
        );
    }

    #[test]
    fn full_mode_blocked_submit_leaves_review() {
        let mut session = Session::new(three_questions(), Answers::new(), DisplayMode::Full);
        assert_eq!(session.review(), Navigation::Reviewing);
        session.take_events();

        assert!(!session.prepare_submit().is_ready());
        assert_eq!(session.stage(), Stage::Editing);
        assert_eq!(
            session.take_events(),
            vec![
                SessionEvent::EditingResumed(0),
                SessionEvent::SubmitBlocked {
                    missing: vec![QuestionId::new("q2")]
                },
                SessionEvent::ScrollTo(QuestionId::new("q2")),
            ]
        );
    }

    #[test]
    fn unknown_answers_are_dropped_on_construction() {
        let mut answers = Answers::new();
        answers.insert("q1", "kept");
        answers.insert("retired", "gone");
        let session = Session::new(three_questions(), answers, DisplayMode::Step);

        assert_eq!(session.answers().len(), 1);
        assert!(session.answer("retired").is_none());
        assert_eq!(
            serde_json::to_value(session.save_payload()).unwrap()["answers"],
            json!({"q1": "kept"})
        );
    }

    #[test]
    fn submit_ready_clears_marks() {
        let mut session = Session::new(three_questions(), Answers::new(), DisplayMode::Full);
        session.prepare_submit();
        session.record_answer("q2", "x").unwrap();
        let check = session.prepare_submit();
        assert!(check.is_ready());
        assert_eq!(session.invalid().count(), 0);
    }

    #[test]
    fn resume_after_last_answered() {
        let mut answers = Answers::new();
        answers.insert("q1", "a");
        answers.insert("q2", "b");
        let session = Session::resumed(
            five_questions(),
            answers,
            DisplayMode::Step,
            ResumePolicy::AfterLastAnswered,
        );
        assert_eq!(session.index(), 2);
    }

    #[test]
    fn resume_is_capped_at_last_question() {
        let answers: Answers = (1..=5)
            .map(|n| (QuestionId::new(format!("q{n}")), AnswerValue::from("x")))
            .collect();
        let session = Session::resumed(
            five_questions(),
            answers,
            DisplayMode::Step,
            ResumePolicy::AfterLastAnswered,
        );
        assert_eq!(session.index(), 4);
    }

    #[test]
    fn resume_never_skips_required_gap() {
        let mut answers = Answers::new();
        answers.insert("q3", "answered out of order");
        let session = Session::resumed(
            three_questions(),
            answers,
            DisplayMode::Step,
            ResumePolicy::AfterLastAnswered,
        );
        assert_eq!(session.index(), 1);
    }

    #[test]
    fn resume_start_policy() {
        let mut answers = Answers::new();
        answers.insert("q1", "a");
        let session = Session::resumed(
            five_questions(),
            answers,
            DisplayMode::Step,
            ResumePolicy::Start,
        );
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn save_payload_shape() {
        let mut session = Session::new(three_questions(), Answers::new(), DisplayMode::Step);
        session.record_answer("q1", "a").unwrap();
        assert_eq!(
            serde_json::to_value(session.save_payload()).unwrap(),
            json!({"answers": {"q1": "a"}, "currentQuestion": "q1"})
        );

        let full = Session::new(three_questions(), Answers::new(), DisplayMode::Full);
        assert_eq!(
            serde_json::to_value(full.save_payload()).unwrap(),
            json!({"answers": {}})
        );
    }

    #[test]
    fn empty_form_has_no_navigation() {
        let mut session = Session::new(FormDefinition::empty(), Answers::new(), DisplayMode::Step);
        assert_eq!(session.navigation(), NavButtons::default());
        assert_eq!(session.next(), Navigation::Unchanged);
        assert!(session.prepare_submit().is_ready());
    }
}
