//! Utility modules for tripclock.
//!
//! - [`datetime`] - Parsing and formatting of naive civil timestamps

pub mod datetime;
