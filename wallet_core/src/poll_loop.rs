//! Named periodic tasks.
//!
//! Each task runs on its own tokio task with a fixed-period interval and its own
//! cancellation channel. Cancelling stops future ticks but does not interrupt a
//! poll already in flight; its result is dropped instead of applied. Tasks that
//! publish shared state re-check their [`CancelToken`] under the state's lock,
//! and whoever cancels them holds that lock while doing so.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::balance::BalanceTracker;
use crate::error::EngineError;

/// Cancellation flag of one registration.
#[derive(Clone)]
pub struct CancelToken(watch::Receiver<bool>);

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.0.borrow()
    }

    #[cfg(test)]
    pub(crate) fn fixed(cancelled: bool) -> Self {
        Self(watch::channel(cancelled).1)
    }

    #[cfg(test)]
    pub(crate) fn from_receiver(rx: watch::Receiver<bool>) -> Self {
        Self(rx)
    }
}

/// Work performed on every tick: a fallible query, then a state update.
#[async_trait]
pub trait PollTask: Send + Sync + 'static {
    type Output: Send;

    async fn poll(&self) -> Result<Self::Output, EngineError>;

    /// Publish `output`, unless `cancel` has fired by the time the state is locked.
    async fn apply(&self, output: Self::Output, cancel: &CancelToken);
}

#[async_trait]
impl PollTask for BalanceTracker {
    type Output = hbar_types::Tinybar;

    async fn poll(&self) -> Result<Self::Output, EngineError> {
        self.fetch_balance().await
    }

    async fn apply(&self, balance: Self::Output, cancel: &CancelToken) {
        self.apply_balance_unless_cancelled(balance, cancel).await;
    }
}

struct Registration {
    cancel: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

#[derive(Default)]
pub struct PollLoop {
    tasks: HashMap<String, Registration>,
}

impl PollLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` every `period`, starting one period from now.
    ///
    /// Re-registering a name cancels the previous registration first.
    pub fn add_to_loop<T: PollTask>(&mut self, name: &str, period: Duration, task: T) {
        self.cancel(name);

        let (cancel, mut cancelled) = watch::channel(false);
        let token = CancelToken(cancelled.clone());
        let task = Arc::new(task);
        let task_name = name.to_string();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval.tick().await; // skip the immediate first tick

            loop {
                tokio::select! {
                    _ = cancelled.changed() => break,
                    _ = interval.tick() => {
                        let result = task.poll().await;
                        if *cancelled.borrow() {
                            tracing::debug!(task = %task_name, "poll finished after cancellation, dropping result");
                            break;
                        }
                        match result {
                            Ok(output) => task.apply(output, &token).await,
                            Err(e) => tracing::warn!(task = %task_name, error = %e, "poll failed, retrying next tick"),
                        }
                    }
                }
            }
            tracing::debug!(task = %task_name, "poll task stopped");
        });

        tracing::debug!(task = %name, period_ms = period.as_millis() as u64, "added to loop");
        self.tasks
            .insert(name.to_string(), Registration { cancel, handle });
    }

    /// Stop scheduling `name`. Returns whether it was registered.
    pub fn cancel(&mut self, name: &str) -> bool {
        match self.tasks.remove(name) {
            Some(registration) => {
                let _ = registration.cancel.send(true);
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, registration) in self.tasks.drain() {
            let _ = registration.cancel.send(true);
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.tasks
            .get(name)
            .is_some_and(|r| !r.handle.is_finished())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Drop for PollLoop {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
