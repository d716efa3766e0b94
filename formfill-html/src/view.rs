//! Reaction layer between session events and the host page.

use formfill::{FieldKind, NavButtons, QuestionId, Session, SessionEvent};

use crate::{HtmlOptions, render_session};

/// Which DOM event updates the answer of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputBinding {
    /// `input` events; the control value is the answer.
    Input,
    /// `change` events; the checked radio or selected entry is the answer.
    Change,
    /// `change` events on each checkbox; the answer is recomputed from all
    /// checked boxes of the question.
    ChangeAll,
}

impl InputBinding {
    pub fn for_kind(kind: FieldKind) -> Self {
        match kind {
            FieldKind::MultiChoice => Self::ChangeAll,
            FieldKind::SingleChoice | FieldKind::Dropdown => Self::Change,
            _ => Self::Input,
        }
    }

    /// Name of the DOM event to listen for.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Change | Self::ChangeAll => "change",
        }
    }
}

/// A change the host page must apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    /// Replace the contents of the question container.
    ReplaceQuestions(String),
    /// Update the progress bar and its label.
    Progress { percent: u8, label: Option<String> },
    /// Show, hide, enable or disable the navigation buttons.
    Navigation(NavButtons),
    /// Drop `is-invalid` and the validation message from a question.
    ClearInvalid(QuestionId),
    Focus(QuestionId),
    ScrollTo(QuestionId),
}

/// Turns drained `SessionEvent`s into `Patch`es.
#[derive(Debug, Clone, Default)]
pub struct FormView {
    options: HtmlOptions,
}

impl FormView {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &HtmlOptions {
        &self.options
    }

    /// Patches for the first paint.
    pub fn initial(&self, session: &Session) -> Vec<Patch> {
        self.redraw(session)
    }

    /// Drain the session's events and compute the patches they call for.
    ///
    /// Anything that changes the visible screen redraws the container once,
    /// however many events arrived. Focus and scroll requests come after the
    /// redraw so their targets exist.
    pub fn react(&self, session: &mut Session) -> Vec<Patch> {
        let events = session.take_events();
        let redraw = events.iter().any(SessionEvent::changes_screen);

        let mut patches = if redraw {
            self.redraw(session)
        } else {
            Vec::new()
        };

        for event in events {
            match event {
                SessionEvent::MarkCleared(id) if !redraw => patches.push(Patch::ClearInvalid(id)),
                SessionEvent::Focus(id) => patches.push(Patch::Focus(id)),
                SessionEvent::ScrollTo(id) => patches.push(Patch::ScrollTo(id)),
                _ => {}
            }
        }

        tracing::trace!(patches = patches.len(), redraw, "view reacted");
        patches
    }

    fn redraw(&self, session: &Session) -> Vec<Patch> {
        vec![
            Patch::ReplaceQuestions(render_session(session, &self.options)),
            Patch::Progress {
                percent: session.progress(),
                label: session.progress_label(),
            },
            Patch::Navigation(session.navigation()),
        ]
    }
}
