//! The outcome of a scheduling request.
use serde::ser::SerializeMap;
use serde::ser::SerializeStruct;
use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;

use crate::formulation::SchedulingModel;
use crate::lexicographic::LexicographicSolution;
use crate::ScheduleRequest;
use crate::TaskId;

/// The placement of a single task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    pub id: TaskId,
    /// The absolute start time.
    pub start: i64,
    pub is_late: bool,
    pub is_present: bool,
    pub duration: i64,
    /// The placement priority, `raw priority * delay`.
    pub priority: i64,
    /// The scaled delay factor; negative when the task ends after its due date.
    pub delay: i64,
}

/// The result of a scheduling request.
///
/// Serialises to `{"found": .., "tasks": ..}`, where `tasks` is an object keyed by task id (in
/// request order), or `[]` when there are no tasks. The objective values are not serialised.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    pub found: bool,
    /// One entry per requested task, in request order.
    pub tasks: Vec<ScheduledTask>,
    /// The achieved total raw priority of the admitted tasks; `0` when nothing was found.
    pub total_raw_priority: i64,
    /// The achieved total placement priority of the admitted tasks; `0` when nothing was found.
    pub total_priority: i64,
}

impl Schedule {
    /// The result of a request without tasks.
    pub fn empty() -> Schedule {
        Schedule {
            found: true,
            ..Default::default()
        }
    }

    pub fn not_found() -> Schedule {
        Schedule::default()
    }

    /// Reads the placement of every task of `request` from the final assignment.
    pub fn assemble(
        request: &ScheduleRequest,
        scheduling: &SchedulingModel,
        solution: &LexicographicSolution,
    ) -> Schedule {
        let assignment = &solution.assignment;
        let tasks = request
            .tasks
            .iter()
            .zip(scheduling.tasks())
            .map(|(task, variables)| ScheduledTask {
                id: task.id.clone(),
                start: scheduling.origin() + assignment.value(variables.start),
                is_late: assignment.truth(variables.is_late),
                is_present: assignment.truth(variables.is_present),
                duration: task.duration,
                priority: assignment.value(variables.priority),
                delay: assignment.value(variables.delay),
            })
            .collect();

        Schedule {
            found: true,
            tasks,
            total_raw_priority: solution.total_raw_priority,
            total_priority: solution.total_priority,
        }
    }

    pub fn task(&self, id: &TaskId) -> Option<&ScheduledTask> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// The admitted tasks, in request order.
    pub fn admitted(&self) -> impl Iterator<Item = &ScheduledTask> + '_ {
        self.tasks.iter().filter(|task| task.is_present)
    }
}

impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Schedule", 2)?;
        state.serialize_field("found", &self.found)?;
        state.serialize_field("tasks", &TasksById(&self.tasks))?;
        state.end()
    }
}

struct TasksById<'a>(&'a [ScheduledTask]);

impl Serialize for TasksById<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.is_empty() {
            return serializer.collect_seq(self.0);
        }

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for task in self.0 {
            map.serialize_entry(&task.id.to_string(), task)?;
        }
        map.end()
    }
}
