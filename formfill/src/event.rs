use formfill_types::QuestionId;

/// A state change reported by `Session`.
///
/// Sessions never render. Every mutating operation queues events instead,
/// and a view layer drains them with `Session::take_events` to decide what
/// to redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// An answer was stored.
    AnswerRecorded(QuestionId),

    /// A required question failed validation and is now marked invalid.
    ValidationFailed(QuestionId),

    /// A previously invalid question now has an answer.
    MarkCleared(QuestionId),

    /// The current index changed.
    Moved { from: usize, to: usize },

    /// The last question was passed; the completion screen is showing.
    Completed,

    /// The read-only review is showing.
    ReviewOpened,

    /// Editing resumed at the given index after completion or review.
    EditingResumed(usize),

    /// A submit attempt was refused because of unanswered required questions.
    SubmitBlocked { missing: Vec<QuestionId> },

    /// The input of this question should receive focus.
    Focus(QuestionId),

    /// The input of this question should be scrolled into view.
    ScrollTo(QuestionId),
}

impl SessionEvent {
    /// Check if the event changes which screen is visible.
    pub fn changes_screen(&self) -> bool {
        matches!(
            self,
            Self::Moved { .. }
                | Self::Completed
                | Self::ReviewOpened
                | Self::EditingResumed(_)
                | Self::SubmitBlocked { .. }
                | Self::ValidationFailed(_)
        )
    }
}
