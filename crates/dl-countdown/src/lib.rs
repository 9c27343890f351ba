//! # dl-countdown
//!
//! Whole-day countdown to a fixed target date.
//!
//! This is the leaf of the Days Left workspace: it knows nothing about goals
//! or storage. Given a target instant and "now", it reports how many days are
//! left, rounding partial days up.
//!
//! ## Key components
//!
//! - [`days_until`]: the pure day-count function
//! - [`Countdown`]: a target date configured once at startup

pub mod countdown;
pub mod error;

pub use countdown::{days_until, Countdown, DEFAULT_TARGET_DATE};
pub use error::CountdownError;
