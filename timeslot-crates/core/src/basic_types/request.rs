use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use super::InputError;
use super::ReservedInterval;
use super::ReservedTagInterval;
use super::Task;

/// A single scheduling request.
///
/// The serialised form uses the keys of the request boundary: `events` holds the tasks,
/// `reservedIntervals` and `reservedTags` the blocked windows, and `start` the earliest moment any
/// task may start.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    #[serde(default, rename = "events")]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub reserved_intervals: Vec<ReservedInterval>,
    #[serde(default)]
    pub reserved_tags: Vec<ReservedTagInterval>,
    pub start: i64,
}

impl ScheduleRequest {
    pub fn new(start: i64) -> ScheduleRequest {
        ScheduleRequest {
            start,
            ..Default::default()
        }
    }

    pub fn with_task(mut self, task: Task) -> ScheduleRequest {
        self.tasks.push(task);
        self
    }

    pub fn with_reserved_interval(mut self, interval: ReservedInterval) -> ScheduleRequest {
        self.reserved_intervals.push(interval);
        self
    }

    pub fn with_reserved_tag_interval(mut self, interval: ReservedTagInterval) -> ScheduleRequest {
        self.reserved_tags.push(interval);
        self
    }

    /// The latest moment any task may end: the largest `maxDueDate` over the tasks which have
    /// one. Tasks without a `maxDueDate` do not extend the horizon, unless no task has one, in
    /// which case the largest due date is used.
    ///
    /// Returns `None` when there are no tasks.
    pub fn horizon(&self) -> Option<i64> {
        self.tasks
            .iter()
            .filter_map(|task| task.max_due_date)
            .max()
            .or_else(|| self.tasks.iter().map(|task| task.due_date).max())
    }

    /// Checks every record of the request in isolation and rejects duplicate task identifiers.
    pub fn validate(&self) -> Result<(), InputError> {
        let mut seen_ids = HashSet::with_capacity(self.tasks.len());
        for task in &self.tasks {
            task.validate()?;

            if !seen_ids.insert(task.id.to_string()) {
                return Err(InputError::DuplicateId(task.id.clone()));
            }
        }

        self.reserved_intervals
            .iter()
            .try_for_each(ReservedInterval::validate)?;
        self.reserved_tags
            .iter()
            .try_for_each(ReservedTagInterval::validate)?;

        Ok(())
    }
}
