//! Small terminal log for daily health metrics: steps, calories burned and sleep.
//! Entries are kept for the current session only and can be listed, summarized or drawn as a
//! step chart.
//!

pub mod cli;
pub mod store;
pub mod utils;
