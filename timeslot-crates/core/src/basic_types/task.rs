use std::collections::BTreeSet;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use super::InputError;

/// The identifier of a [`Task`], preserved verbatim from the request.
///
/// Identifiers are JSON numbers or strings. Two identifiers which render to the same text (e.g. `1`
/// and `"1"`) denote the same key in the result and are therefore considered duplicates.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Integer(i64),
    Text(String),
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskId::Integer(value) => write!(f, "{value}"),
            TaskId::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<i64> for TaskId {
    fn from(value: i64) -> Self {
        TaskId::Integer(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        TaskId::Text(value.to_owned())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        TaskId::Text(value)
    }
}

/// A candidate task which should be placed on the timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    /// The number of time units the task occupies; must be positive.
    pub duration: i64,
    /// The benefit of running the task; a missing impact counts as 0.
    #[serde(default)]
    pub impact: Option<f64>,
    /// The preferred latest end of the task.
    pub due_date: i64,
    /// The hard latest end of the task; a missing value means the task has no slack.
    #[serde(default)]
    pub max_due_date: Option<i64>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Task {
    pub fn new(id: TaskId, duration: i64, impact: f64, due_date: i64) -> Task {
        Task {
            id,
            duration,
            impact: Some(impact),
            due_date,
            max_due_date: None,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_max_due_date(mut self, max_due_date: i64) -> Task {
        self.max_due_date = Some(max_due_date);
        self
    }

    pub fn with_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Task {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn impact(&self) -> f64 {
        self.impact.unwrap_or(0.0)
    }

    /// The end of the slack window of the task; this is the due date when no `maxDueDate` is
    /// given.
    pub fn latest_due_date(&self) -> i64 {
        self.max_due_date.unwrap_or(self.due_date)
    }

    /// The length of the window between the due date and the hard deadline.
    pub fn slack(&self) -> i64 {
        self.latest_due_date() - self.due_date
    }

    /// Returns `true` if the task has at least one tag in common with `tags`.
    pub fn shares_tag_with(&self, tags: &BTreeSet<String>) -> bool {
        !self.tags.is_disjoint(tags)
    }

    pub(crate) fn validate(&self) -> Result<(), InputError> {
        if self.duration <= 0 {
            return Err(InputError::NonPositiveDuration {
                id: self.id.clone(),
                duration: self.duration,
            });
        }

        let impact = self.impact();
        if !impact.is_finite() || impact < 0.0 {
            return Err(InputError::InvalidImpact {
                id: self.id.clone(),
                impact,
            });
        }

        if self.latest_due_date() < self.due_date {
            return Err(InputError::MaxDueDateBeforeDueDate {
                id: self.id.clone(),
                due_date: self.due_date,
                max_due_date: self.latest_due_date(),
            });
        }

        if self.tags.iter().any(|tag| tag.is_empty()) {
            return Err(InputError::EmptyTaskTag {
                id: self.id.clone(),
            });
        }

        Ok(())
    }
}
