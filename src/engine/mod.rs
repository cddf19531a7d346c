// src/engine/mod.rs

//! Watch engine for trigger.
//!
//! This module ties together:
//! - the cursor into the watched file
//! - incremental line extraction and matching
//! - the watch loop that reacts to:
//!   - close-after-write notifications (the scan trigger)
//!   - creation/removal of the watched path (rotation)
//!   - every other notification kind (logged only)
//!   - notification-facility failures and shutdown requests
//!
//! The pure core state machine lives in [`core`]; the async/IO shell that
//! receives events and runs dispatches is implemented in [`runtime`].

use std::sync::Arc;

use crate::config::WatchTarget;
use crate::watch::Line;

/// Whether the core is waiting for a notification or in the middle of a
/// scan whose matches are being dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Idle,
    Scanning,
}

/// A matched line on its way to the dispatcher.
#[derive(Debug, Clone)]
pub struct MatchEvent {
    pub line: Line,
    pub target: Arc<WatchTarget>,
}

pub mod core;
pub mod event_handlers;
pub mod runtime;

pub use self::core::WatchCore;
pub use event_handlers::{CoreCommand, CoreStep};
pub use runtime::WatchLoop;
