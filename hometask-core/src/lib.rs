//! Core types for hometask.
//!
//! This crate holds everything the CLI composes:
//! - `event`: event records, drafts, repeat/alarm settings
//! - `store`: the persisted events/alarms JSON documents
//! - `reconcile`: the save reconciler (ids, dedup, alarm lifecycle)
//! - `schedule` + `notify`: alarm triggers and the notifier backend seam
//! - `listing`: flatten/partition helpers for list display

pub mod config;
pub mod date_range;
pub mod error;
pub mod event;
pub mod listing;
pub mod notify;
pub mod reconcile;
pub mod schedule;
pub mod store;

pub use error::{HomeTaskError, HomeTaskResult};
