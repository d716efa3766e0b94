//! Dynamic forms driven by a JSON question list.
//!
//! `formfill` keeps the state of one user's pass through a form: the answers,
//! the current question in step mode, and which required questions are
//! marked invalid. It never renders anything. Presentation lives in
//! `formfill-html`, persistence in `formfill-client`.
//!
//! ```rust,ignore
//! use formfill::{DisplayMode, FormDefinition, Session};
//!
//! let definition = FormDefinition::from_json(json)?;
//! let mut session = Session::new(definition, Answers::new(), DisplayMode::Step);
//! session.record_answer("q1", "Happy")?;
//! session.next();
//! ```

mod event;
mod input;
mod session;
mod status;

pub use event::SessionEvent;
pub use input::{InputEvent, ScriptedInput};
pub use session::{
    DisplayMode, NavButtons, Navigation, ResumePolicy, SavePayload, Session, Stage, SubmitCheck,
    SubmitPayload,
};
pub use status::{SUBMIT_NETWORK_ERROR, SaveStatus, SubmitControl};

pub use formfill_types::*;
