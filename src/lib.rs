//! Immutable date/time format sets keyed by time zone and locale, with a
//! process-wide cache that derives each set once.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
pub mod util;
