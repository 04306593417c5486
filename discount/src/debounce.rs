use tokio::sync::mpsc;

use std::{future::Future, time::Duration};

enum Signal<T> {
    Value(T),
    Cancel,
}

/// Coalesces bursts of values: only a value followed by a full quiet period is handed
/// to the handler. Each emitted value runs on its own task, so a later value never
/// aborts a handler that is already running.
pub struct Debouncer<T> {
    sender: mpsc::UnboundedSender<Signal<T>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Must be called from within a tokio runtime.
    pub fn new<F, Fut>(quiet_period: Duration, handler: F) -> Self
    where
        F: Fn(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(run(quiet_period, receiver, handler));
        Self { sender }
    }

    pub fn push(&self, value: T) {
        let _ = self.sender.send(Signal::Value(value));
    }

    /// Drops the pending value, if any.
    pub fn cancel(&self) {
        let _ = self.sender.send(Signal::Cancel);
    }
}

async fn run<T, F, Fut>(
    quiet_period: Duration,
    mut receiver: mpsc::UnboundedReceiver<Signal<T>>,
    handler: F,
) where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let mut pending: Option<T> = None;
    loop {
        let signal = if pending.is_none() {
            receiver.recv().await
        } else {
            match tokio::time::timeout(quiet_period, receiver.recv()).await {
                Ok(signal) => signal,
                Err(_) => {
                    if let Some(value) = pending.take() {
                        tokio::spawn(handler(value));
                    }
                    continue;
                }
            }
        };

        match signal {
            Some(Signal::Value(value)) => pending = Some(value),
            Some(Signal::Cancel) => pending = None,
            // debouncer dropped, pending value is discarded
            None => return,
        }
    }
}
