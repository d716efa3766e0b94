use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use formfill::SaveStatus;
use tokio::sync::watch;

/// The save indicator, observable through a `watch` channel.
///
/// "Saved" clears back to idle after a delay unless another save started in
/// the meantime.
#[derive(Debug, Clone)]
pub struct SaveIndicator {
    inner: Arc<Inner>,
    clear_delay: Duration,
}

#[derive(Debug)]
struct Inner {
    status: watch::Sender<SaveStatus>,
    generation: AtomicU64,
}

impl SaveIndicator {
    pub fn new(clear_delay: Duration) -> Self {
        let (status, _) = watch::channel(SaveStatus::Idle);
        Self {
            inner: Arc::new(Inner {
                status,
                generation: AtomicU64::new(0),
            }),
            clear_delay,
        }
    }

    pub fn status(&self) -> SaveStatus {
        *self.inner.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SaveStatus> {
        self.inner.status.subscribe()
    }

    pub(crate) fn saving(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.inner.status.send_replace(SaveStatus::Saving);
    }

    pub(crate) fn failed(&self) {
        self.inner.status.send_replace(SaveStatus::Failed);
    }

    /// Show "Saved" and schedule the clear.
    pub(crate) fn saved(&self) {
        let generation = self.inner.generation.load(Ordering::SeqCst);
        self.inner.status.send_replace(SaveStatus::Saved);

        let inner = Arc::clone(&self.inner);
        let delay = self.clear_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if inner.generation.load(Ordering::SeqCst) == generation {
                inner.status.send_if_modified(|status| {
                    let clear = *status == SaveStatus::Saved;
                    if clear {
                        *status = SaveStatus::Idle;
                    }
                    clear
                });
            }
        });
    }
}
