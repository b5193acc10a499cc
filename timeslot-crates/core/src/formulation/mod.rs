//! Builds the constraint model of one [`ScheduleRequest`].
//!
//! All times in the model are offsets from the request start (the *origin*), so that realistic
//! timestamps stay well within the 32-bit range of the engine. Per task the model contains:
//! * `start` and `end`, linked by `end == start + duration` when the task is present;
//! * `is_present`, which gates the task's optional interval;
//! * `delay`, the scaled position of `end` between the due date and the hard deadline, and
//!   `is_late`, which holds exactly when `delay` is negative. A task without slack has delay 0,
//!   is never late, and may end anywhere up to the horizon;
//! * `priority == raw_priority * delay` and the presence-gated `admitted_priority` and
//!   `admitted_raw_priority`.
//!
//! Every task interval avoids its incompatible reserved windows, and all task intervals are
//! pairwise disjoint.
use log::debug;

use crate::model::Assignment;
use crate::model::BoolVar;
use crate::model::IntVar;
use crate::model::IntervalVar;
use crate::model::LinearConstraint;
use crate::model::LinearExpr;
use crate::model::Model;
use crate::model::ModelConstraint;
use crate::model::ModelError;
use crate::priority;
use crate::priority::PriorityError;
use crate::priority::DELAY_SCALE;
use crate::priority::MAX_DELAY;
use crate::priority::MIN_DELAY;
use crate::ReservedInterval;
use crate::ScheduleRequest;
use crate::SchedulingError;
use crate::Task;

/// The decision variables of a single task.
#[derive(Clone, Debug)]
pub struct TaskVariables {
    pub start: IntVar,
    pub end: IntVar,
    pub is_present: BoolVar,
    pub is_late: BoolVar,
    pub delay: IntVar,
    pub raw_priority: i64,
    pub priority: IntVar,
    pub admitted_priority: IntVar,
    pub admitted_raw_priority: IntVar,
    pub interval: IntervalVar,
}

/// The constraint model of one request together with handles to its variables.
#[derive(Clone, Debug)]
pub struct SchedulingModel {
    model: Model,
    origin: i64,
    horizon: i64,
    tasks: Vec<TaskVariables>,
    total_raw_priority: IntVar,
    total_priority: IntVar,
}

impl SchedulingModel {
    /// Creates all variables and constraints for `request`, which must contain at least one task.
    pub fn build(request: &ScheduleRequest) -> Result<SchedulingModel, SchedulingError> {
        let origin = request.start;
        let horizon = request.horizon().ok_or(PriorityError::NoTasks)?;
        let max_raw_priority = priority::max_raw_priority(&request.tasks)?;

        let mut model = Model::default();
        let tasks = request
            .tasks
            .iter()
            .map(|task| {
                let variables = add_task(&mut model, task, origin, horizon, max_raw_priority)?;

                let windows = incompatible_windows(task, request)
                    .into_iter()
                    .map(|window| (window.start - origin, window.end - origin))
                    .filter(|&(start, end)| end > 0 && start < horizon - origin)
                    .map(|(start, end)| IntervalVar::fixed(start, end))
                    .collect::<Vec<_>>();
                if !windows.is_empty() {
                    model.add(ModelConstraint::NoOverlap(
                        std::iter::once(variables.interval.clone())
                            .chain(windows)
                            .collect(),
                    ));
                }

                Ok(variables)
            })
            .collect::<Result<Vec<_>, SchedulingError>>()?;

        if tasks.len() > 1 {
            model.add(ModelConstraint::NoOverlap(
                tasks.iter().map(|task| task.interval.clone()).collect(),
            ));
        }

        let raw_priority_sum = tasks.iter().map(|task| task.raw_priority).sum::<i64>();

        let total_raw_priority = model.new_integer(0, raw_priority_sum, "total_raw_priority")?;
        model.add(LinearConstraint::equals(
            total_raw_priority,
            LinearExpr::sum(tasks.iter().map(|task| task.admitted_raw_priority)),
        ));

        let total_priority = model.new_integer(
            -raw_priority_sum * DELAY_SCALE,
            raw_priority_sum * MAX_DELAY,
            "total_priority",
        )?;
        model.add(LinearConstraint::equals(
            total_priority,
            LinearExpr::sum(tasks.iter().map(|task| task.admitted_priority)),
        ));

        debug!(
            "Built model for {} tasks on [{origin}, {horizon}] with {} integers, {} booleans and {} constraints",
            tasks.len(),
            model.num_integers(),
            model.num_booleans(),
            model.constraints().len()
        );

        Ok(SchedulingModel {
            model,
            origin,
            horizon,
            tasks,
            total_raw_priority,
            total_priority,
        })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// The request start; model times are offsets from it.
    pub fn origin(&self) -> i64 {
        self.origin
    }

    pub fn horizon(&self) -> i64 {
        self.horizon
    }

    /// The task variables, in request order.
    pub fn tasks(&self) -> &[TaskVariables] {
        &self.tasks
    }

    pub fn total_raw_priority(&self) -> IntVar {
        self.total_raw_priority
    }

    pub fn total_priority(&self) -> IntVar {
        self.total_priority
    }

    /// Fixes every admission decision of `assignment`, and the total raw priority it achieves.
    pub fn freeze_admission(&mut self, assignment: &Assignment) {
        for task in &self.tasks {
            if assignment.truth(task.is_present) {
                self.model.fix(task.is_present);
            } else {
                self.model.fix(!task.is_present);
            }
        }

        self.model.add(LinearConstraint::equals(
            self.total_raw_priority,
            assignment.value(self.total_raw_priority),
        ));
    }
}

/// The reserved windows `task` may not overlap: every reserved interval, and every reserved tag
/// interval with which the task shares no tag.
pub fn incompatible_windows(task: &Task, request: &ScheduleRequest) -> Vec<ReservedInterval> {
    request
        .reserved_intervals
        .iter()
        .copied()
        .chain(
            request
                .reserved_tags
                .iter()
                .filter(|interval| interval.blocks(task))
                .map(|interval| ReservedInterval::new(interval.start, interval.end)),
        )
        .collect()
}

fn add_task(
    model: &mut Model,
    task: &Task,
    origin: i64,
    horizon: i64,
    max_raw_priority: i64,
) -> Result<TaskVariables, SchedulingError> {
    let window_end = horizon - origin;
    let latest_start = window_end - task.duration;
    if latest_start < 0 {
        return Err(ModelError::DurationExceedsWindow {
            id: task.id.clone(),
            duration: task.duration,
            window_start: origin,
            window_end: horizon,
        }
        .into());
    }

    let name = |variable: &str| format!("{variable}[{}]", task.id);

    let start = model.new_integer(0, latest_start, name("start"))?;
    let end = model.new_integer(0, window_end, name("end"))?;
    let is_present = model.new_boolean(name("is_present"));
    model.add(
        LinearConstraint::equals(end, start.into_expr() + task.duration).enforced_by(is_present),
    );
    let interval = IntervalVar::optional(start, task.duration, is_present);

    let is_late = model.new_boolean(name("is_late"));
    let delay = if task.slack() > 0 {
        let due_date = task.due_date - origin;
        let delay = model.new_integer(MIN_DELAY, MAX_DELAY, name("delay"))?;
        // delay == floor((due_date - end) * DELAY_SCALE / slack); its domain bounds end by the
        // hard deadline.
        model.add_floor_division(
            delay,
            (LinearExpr::constant(due_date) - end) * DELAY_SCALE,
            task.slack(),
            Some(is_present.into()),
        )?;
        model.add(LinearConstraint::less_than_or_equals(delay, -1).enforced_by(is_late));
        model.add(LinearConstraint::less_than_or_equals(0, delay).enforced_by(!is_late));
        delay
    } else {
        model.fix(!is_late);
        model.new_constant(0, name("delay"))
    };

    let raw_priority = priority::raw_priority(task.impact(), task.duration)?;

    let priority = model.new_integer(
        -max_raw_priority * DELAY_SCALE,
        max_raw_priority * MAX_DELAY,
        name("priority"),
    )?;
    model.add(LinearConstraint::equals(priority, delay.into_expr() * raw_priority));

    let admitted_priority = model.new_integer(
        -max_raw_priority * DELAY_SCALE,
        max_raw_priority * MAX_DELAY,
        name("admitted_priority"),
    )?;
    model.add(ModelConstraint::GatedProduct {
        target: admitted_priority,
        factor: priority.into(),
        gate: is_present,
    });

    let admitted_raw_priority =
        model.new_integer(0, max_raw_priority, name("admitted_raw_priority"))?;
    model.add(ModelConstraint::GatedProduct {
        target: admitted_raw_priority,
        factor: LinearExpr::constant(raw_priority),
        gate: is_present,
    });

    Ok(TaskVariables {
        start,
        end,
        is_present,
        is_late,
        delay,
        raw_priority,
        priority,
        admitted_priority,
        admitted_raw_priority,
        interval,
    })
}
