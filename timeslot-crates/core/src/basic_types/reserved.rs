use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use super::InputError;
use super::Task;

/// A time window `[start, end)` in which no task may run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedInterval {
    pub start: i64,
    pub end: i64,
}

impl ReservedInterval {
    pub fn new(start: i64, end: i64) -> ReservedInterval {
        ReservedInterval { start, end }
    }

    pub(crate) fn validate(&self) -> Result<(), InputError> {
        validate_window(self.start, self.end)
    }
}

/// A time window `[start, end)` which is only available to tasks sharing at least one of its tags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedTagInterval {
    pub start: i64,
    pub end: i64,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl ReservedTagInterval {
    pub fn new<S: Into<String>>(
        start: i64,
        end: i64,
        tags: impl IntoIterator<Item = S>,
    ) -> ReservedTagInterval {
        ReservedTagInterval {
            start,
            end,
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if `task` may not overlap this interval, i.e. the task shares none of its
    /// tags. An interval without tags therefore blocks every task.
    pub fn blocks(&self, task: &Task) -> bool {
        !task.shares_tag_with(&self.tags)
    }

    pub(crate) fn validate(&self) -> Result<(), InputError> {
        validate_window(self.start, self.end)?;

        if self.tags.iter().any(|tag| tag.is_empty()) {
            return Err(InputError::EmptyIntervalTag {
                start: self.start,
                end: self.end,
            });
        }

        Ok(())
    }
}

fn validate_window(start: i64, end: i64) -> Result<(), InputError> {
    if start >= end {
        Err(InputError::EmptyInterval { start, end })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TaskId;

    #[test]
    fn tag_interval_blocks_tasks_without_shared_tags() {
        let interval = ReservedTagInterval::new(0, 5, ["Perso"]);

        let shared = Task::new(TaskId::from(1), 1, 1.0, 10).with_tags(["Perso", "Autre"]);
        let other = Task::new(TaskId::from(2), 1, 1.0, 10).with_tags(["Work"]);
        let untagged = Task::new(TaskId::from(3), 1, 1.0, 10);

        assert!(!interval.blocks(&shared));
        assert!(interval.blocks(&other));
        assert!(interval.blocks(&untagged));
    }

    #[test]
    fn untagged_interval_blocks_everything() {
        let interval = ReservedTagInterval::new(0, 5, Vec::<String>::new());
        let task = Task::new(TaskId::from(1), 1, 1.0, 10).with_tags(["Perso"]);

        assert!(interval.blocks(&task));
    }

    #[test]
    fn empty_windows_are_rejected() {
        assert_eq!(
            ReservedInterval::new(5, 5).validate(),
            Err(InputError::EmptyInterval { start: 5, end: 5 })
        );
        assert_eq!(
            ReservedInterval::new(6, 5).validate(),
            Err(InputError::EmptyInterval { start: 6, end: 5 })
        );
        assert!(ReservedInterval::new(4, 5).validate().is_ok());
    }

    #[test]
    fn empty_interval_tag_is_rejected() {
        assert_eq!(
            ReservedTagInterval::new(0, 5, ["ok", ""]).validate(),
            Err(InputError::EmptyIntervalTag { start: 0, end: 5 })
        );
    }
}
