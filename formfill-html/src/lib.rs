//! HTML markup for formfill sessions.
//!
//! Produces markup strings only; applying them to a page is up to the host.
//!
//! # Example
//!
//! ```rust,ignore
//! use formfill_html::{FormView, HtmlOptions};
//!
//! let view = FormView::new(HtmlOptions::new().with_organization("Riverside Clinic"));
//! for patch in view.initial(&session) {
//!     apply(patch);
//! }
//! session.next();
//! for patch in view.react(&mut session) {
//!     apply(patch);
//! }
//! ```

mod render;
mod review;
mod status;
mod view;

pub use render::{
    HtmlOptions, escape_html, render_field, render_form, render_question, render_session,
    render_step,
};
pub use review::{render_completion, render_review};
pub use status::{
    render_network_error, render_save_indicator, render_submit_button,
    render_submit_error, render_submit_success,
};
pub use view::{FormView, InputBinding, Patch};
