// src/watch/mod.rs

//! Incremental scanning of the watched file.
//!
//! This module is responsible for:
//! - Tracking how far into the file has already been scanned ([`cursor`]).
//! - Reading only the complete lines appended since then ([`extractor`]).
//! - Testing each line against the configured pattern ([`matcher`]).
//! - Turning `notify` callbacks into a finite set of event kinds and
//!   forwarding them to the watch loop ([`events`], [`watcher`]).
//!
//! It does **not** run commands; matches are handed to the engine.

pub mod cursor;
pub mod events;
pub mod extractor;
pub mod matcher;
pub mod watcher;

pub use cursor::CursorTracker;
pub use events::{FileEvent, FileEventKind, WatchEvent};
pub use extractor::{Line, LineExtractor, NewLines};
pub use matcher::Matcher;
pub use watcher::{spawn_watcher, WatcherHandle};
