//!  Session storage is organized around [record_store::RecordStore].
//!  The basic idea is:
//!   - Entries live only in memory and keep the order they were added in.
//!   - Reports ([report::Summary], [report::StepChart]) are derived from the store on request and
//!     returned as plain data. Rendering them is up to the caller.

pub mod entities;
pub mod record_store;
pub mod report;
