//! Sample form definitions in the JSON shape host pages embed.
//!
//! Each module exposes the raw `JSON` string plus a `definition()` helper.

pub mod feedback;
pub mod incident_report;
pub mod onboarding;

pub use feedback::FEEDBACK_RESPONSE_ID;
