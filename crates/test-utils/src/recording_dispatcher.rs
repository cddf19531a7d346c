use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use trigger::exec::{CommandTemplate, DispatchOutcome, Dispatcher};

/// One call observed by [`RecordingDispatcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    /// The matched line as passed to the dispatcher.
    pub line: String,
    /// What the shell would have been asked to run.
    pub rendered: String,
}

/// A fake dispatcher that:
/// - records every line it is asked to dispatch (and the rendered command)
/// - never spawns a process
/// - reports a fixed outcome
/// - optionally notifies a channel per dispatch, so async tests can wait
///   for dispatches instead of sleeping.
#[derive(Clone)]
pub struct RecordingDispatcher {
    dispatched: Arc<Mutex<Vec<Dispatched>>>,
    outcome: DispatchOutcome,
    notify_tx: Option<mpsc::UnboundedSender<Dispatched>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self {
            dispatched: Arc::new(Mutex::new(Vec::new())),
            outcome: DispatchOutcome::Completed { exit_code: Some(0) },
            notify_tx: None,
        }
    }

    /// Report this outcome for every dispatch.
    pub fn with_outcome(mut self, outcome: DispatchOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Send each dispatch on the returned receiver as well.
    pub fn with_notifications(mut self) -> (Self, mpsc::UnboundedReceiver<Dispatched>) {
        let (tx, rx) = mpsc::unbounded_channel();
        self.notify_tx = Some(tx);
        (self, rx)
    }

    pub fn lines(&self) -> Vec<String> {
        let guard = self.dispatched.lock().unwrap();
        guard.iter().map(|d| d.line.clone()).collect()
    }

    pub fn rendered(&self) -> Vec<String> {
        let guard = self.dispatched.lock().unwrap();
        guard.iter().map(|d| d.rendered.clone()).collect()
    }
}

impl Default for RecordingDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher for RecordingDispatcher {
    fn dispatch<'a>(
        &'a mut self,
        template: &'a CommandTemplate,
        line: &'a str,
    ) -> Pin<Box<dyn Future<Output = DispatchOutcome> + Send + 'a>> {
        let record = Dispatched {
            line: line.to_string(),
            rendered: template.render(line),
        };
        {
            let mut guard = self.dispatched.lock().unwrap();
            guard.push(record.clone());
        }
        if let Some(ref tx) = self.notify_tx {
            let _ = tx.send(record);
        }

        let outcome = self.outcome.clone();
        Box::pin(async move { outcome })
    }
}
