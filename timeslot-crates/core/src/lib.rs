//! # Timeslot
//! Timeslot places a set of candidate tasks on a single shared timeline. For every task it decides
//! *whether* the task runs (tasks which cannot fit are rejected) and *when* it runs. Tasks never
//! overlap each other, blocked-out reserved intervals, or reserved tag intervals whose tags they do
//! not share.
//!
//! The schedule is chosen lexicographically:
//! 1. Maximise the summed raw priority of the admitted tasks (admission control).
//! 2. With the admission decisions frozen, maximise the summed placement priority, which rewards
//!    finishing close to the preferred due date.
//!
//! Both passes are solved by a constraint programming engine behind the
//! [`engine::SolvingEngine`] trait; the default backend is the Pumpkin solver.
//!
//! # Using Timeslot
//! A [`ScheduleRequest`] is handed to a [`Scheduler`]:
//! ```rust
//! # use timeslot_core::ScheduleRequest;
//! # use timeslot_core::Scheduler;
//! # use timeslot_core::SchedulerOptions;
//! # use timeslot_core::Task;
//! # use timeslot_core::TaskId;
//! let request = ScheduleRequest::new(0)
//!     .with_task(Task::new(TaskId::from(1), 5, 3.0, 20).with_max_due_date(30))
//!     .with_task(Task::new(TaskId::from(2), 5, 1.0, 20).with_max_due_date(30));
//!
//! let mut scheduler = Scheduler::new(SchedulerOptions::default());
//! let schedule = scheduler.schedule(&request).expect("valid request");
//!
//! assert!(schedule.found);
//! assert!(schedule.tasks.iter().all(|task| task.is_present));
//! ```
//!
//! The request and the resulting [`Schedule`] (de)serialise with `serde` using the JSON keys of
//! the request boundary (`events`, `reservedIntervals`, `reservedTags`, `start`).

pub mod engine;
pub mod formulation;
pub mod lexicographic;
pub mod model;
pub mod priority;
pub mod results;

// The request types and the facade are exported from the crate root.
mod api;
mod basic_types;

pub use api::*;
pub use basic_types::*;
