use std::sync::Arc;
use std::time::Duration;

use formfill::SaveStatus;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::{ClientError, FormController};

/// Periodic background save of a controller's session.
///
/// The first save happens one period after start. A tick is skipped while
/// any save is still waiting for its reply. Dropping the handle stops the
/// timer the same way [`Autosave::stop`] does, without waiting for the task.
#[derive(Debug)]
pub struct Autosave {
    stop_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Autosave {
    pub fn start(controller: Arc<FormController>, period: Duration) -> Self {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = interval.tick() => {
                        if controller.is_saving() {
                            debug!("autosave skipped, a save is still in flight");
                            continue;
                        }
                        if controller.save().await == SaveStatus::Failed {
                            warn!(response_id = controller.client().response_id(), "autosave failed");
                        }
                    }
                }
            }
            debug!("autosave stopped");
        });

        Self {
            stop_tx: Some(stop_tx),
            task: Some(task),
        }
    }

    /// Cancel the timer. A save already in flight runs to completion first.
    pub async fn stop(mut self) -> Result<(), ClientError> {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(task) = self.task.take() {
            task.await.map_err(ClientError::transport)?;
        }
        Ok(())
    }
}

impl Drop for Autosave {
    fn drop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
    }
}
