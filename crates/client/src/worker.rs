//! Background request worker.
//!
//! Runs the blocking client on its own thread so delete/move commands never
//! freeze the UI thread. Hosts submit `WorkerRequest`s, drain `Completion`s
//! from their event loop, and feed each completion into the controller's
//! `request_completed`. Check-api probes are fire-and-forget: the outcome
//! is logged, no completion is emitted.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::StyleApi;

/// A unit of work for the background thread. `id` correlates the
/// completion with the controller's request identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerRequest {
    Delete {
        id: u64,
        style: String,
    },
    Move {
        id: u64,
        style: String,
        new_prefix: String,
    },
    CheckApi,
    Shutdown,
}

/// Outcome of one delete/move request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub id: u64,
    pub result: Result<(), String>,
}

/// Handle to the background thread. Dropping it shuts the thread down.
pub struct RequestWorker {
    requests: Sender<WorkerRequest>,
    completions: Receiver<Completion>,
    handle: Option<thread::JoinHandle<()>>,
}

impl RequestWorker {
    /// Spawn the worker around any `StyleApi` implementation.
    pub fn spawn(api: Box<dyn StyleApi + Send>) -> Self {
        let (req_tx, req_rx) = mpsc::channel::<WorkerRequest>();
        let (done_tx, done_rx) = mpsc::channel::<Completion>();

        let handle = thread::spawn(move || {
            for request in req_rx {
                match request {
                    WorkerRequest::Shutdown => break,
                    WorkerRequest::Delete { id, style } => {
                        let result = api.delete_style(&style).map_err(|e| e.to_string());
                        if let Err(ref err) = result {
                            log::error!("delete-style {:?} failed: {}", style, err);
                        }
                        if done_tx.send(Completion { id, result }).is_err() {
                            break;
                        }
                    }
                    WorkerRequest::Move {
                        id,
                        style,
                        new_prefix,
                    } => {
                        let result = api
                            .move_style(&style, &new_prefix)
                            .map_err(|e| e.to_string());
                        if let Err(ref err) = result {
                            log::error!("move-style {:?} failed: {}", style, err);
                        }
                        if done_tx.send(Completion { id, result }).is_err() {
                            break;
                        }
                    }
                    WorkerRequest::CheckApi => match api.check_api() {
                        Ok(value) => log::debug!("style service alive: {}", value),
                        Err(err) => log::warn!("check-api failed: {}", err),
                    },
                }
            }
        });

        Self {
            requests: req_tx,
            completions: done_rx,
            handle: Some(handle),
        }
    }

    /// Queue a request. Returns false if the worker thread is gone.
    pub fn submit(&self, request: WorkerRequest) -> bool {
        self.requests.send(request).is_ok()
    }

    /// Drain every completion that has arrived so far, without blocking.
    pub fn drain_completions(&self) -> Vec<Completion> {
        self.completions.try_iter().collect()
    }

    /// Wait up to `timeout` for one completion.
    pub fn recv_completion(&self, timeout: Duration) -> Option<Completion> {
        self.completions.recv_timeout(timeout).ok()
    }
}

impl Drop for RequestWorker {
    fn drop(&mut self) {
        let _ = self.requests.send(WorkerRequest::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
