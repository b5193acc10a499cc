//! # Timeslot
//! The `timeslot-solver` binary reads a scheduling request as JSON, from a file or from standard
//! input, and writes the resulting schedule as JSON to standard output:
//! ```text
//! timeslot-solver request.json --time-limit 5000
//! ```
//!
//! The request has the shape
//! ```json
//! {
//!   "events": [{"id": 1, "duration": 3, "impact": 2, "dueDate": 10, "maxDueDate": 15, "tags": ["Perso"]}],
//!   "reservedIntervals": [{"start": 0, "end": 5}],
//!   "reservedTags": [{"start": 20, "end": 30, "tags": ["Perso"]}],
//!   "start": 0
//! }
//! ```
//! and the result is `{"found": true, "tasks": {"1": {"id": 1, "start": 5, ...}}}`.
//!
//! The scheduler itself lives in `timeslot-core`, which is re-exported here.
pub use timeslot_core::*;
