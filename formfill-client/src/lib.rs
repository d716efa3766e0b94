//! Persistence client for formfill sessions.
//!
//! Saves progress and submits finished responses to the form service, and
//! runs a cancellable periodic autosave.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use formfill_client::{Autosave, ClientConfig, FormController};
//!
//! let config = ClientConfig::from_env()?;
//! let controller = Arc::new(FormController::from_embedded(
//!     state,
//!     DisplayMode::Step,
//!     ResumePolicy::default(),
//!     &config,
//! )?);
//! let autosave = Autosave::start(Arc::clone(&controller), config.autosave_interval);
//!
//! controller.next().await;
//! let result = controller.submit().await;
//! autosave.stop().await?;
//! ```

mod autosave;
mod client;
mod config;
mod controller;
mod error;
mod indicator;
mod transport;

#[cfg(test)]
mod testing;

pub use autosave::Autosave;
pub use client::{FormClient, SaveOutcome, SubmitOutcome};
pub use config::ClientConfig;
pub use controller::{FormController, SubmitResult};
pub use error::ClientError;
pub use indicator::SaveIndicator;
pub use transport::{ReqwestTransport, Transport};
