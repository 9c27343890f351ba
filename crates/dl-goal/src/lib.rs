//! # dl-goal
//!
//! Goal list state and persistence for Days Left.
//!
//! A [`Goal`] is a short piece of text the user wants to get done before the
//! countdown runs out. The [`GoalStore`] owns the list, applies the ordering
//! policy, derives the date-grouped display rows, and keeps a copy of the list
//! in a [`KeyValueStore`].
//!
//! ## Key components
//!
//! - [`Goal`] / [`GoalId`]: the tracked item and its stable id
//! - [`GoalStore`]: in-memory list with background persistence
//! - [`OrderingPolicy`]: prepend/append and completed-last rules
//! - [`group_by_date`] / [`DisplayRow`]: date separators for display
//! - [`KeyValueStore`]: storage trait ([`FileKeyValueStore`], [`MemoryKeyValueStore`])
//! - [`AppConfig`]: TOML settings

pub mod clock;
pub mod codec;
pub mod config;
pub mod error;
pub mod goal;
pub mod grouping;
pub mod ordering;
pub mod persistence;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AppConfig, DataPaths};
pub use error::GoalError;
pub use goal::{Goal, GoalId};
pub use grouping::{group_by_date, DisplayRow};
pub use ordering::{Insertion, OrderingPolicy};
pub use persistence::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use store::{load_goals, GoalStore, StoreOptions};
