//! Style service client, shared between hosts embedding the grid.
//!
//! This crate is the single source of truth for the style-editor wire
//! contract: delete-style, move-style, check-api. `StyleClient` is the
//! blocking transport (no async runtime required); `RequestWorker` runs it
//! on a background thread and hands completions back to the host's event
//! loop, so the UI thread never waits on the network.

mod client;
mod worker;

pub use client::{ClientConfig, ClientError, StyleApi, StyleClient};
pub use worker::{Completion, RequestWorker, WorkerRequest};
