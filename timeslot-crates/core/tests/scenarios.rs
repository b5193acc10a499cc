#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use helpers::schedule;
use helpers::tasks;
use timeslot_core::engine::EngineError;
use timeslot_core::engine::Interrupt;
use timeslot_core::engine::PumpkinEngine;
use timeslot_core::engine::SolveLimits;
use timeslot_core::engine::SolveOutcome;
use timeslot_core::engine::SolvingEngine;
use timeslot_core::model::IntVar;
use timeslot_core::model::Model;
use timeslot_core::ReservedInterval;
use timeslot_core::ReservedTagInterval;
use timeslot_core::Schedule;
use timeslot_core::ScheduleRequest;
use timeslot_core::Scheduler;
use timeslot_core::SchedulerOptions;
use timeslot_core::SchedulingError;
use timeslot_core::Task;
use timeslot_core::TaskId;

fn request_with(tasks: Vec<Task>) -> ScheduleRequest {
    tasks
        .into_iter()
        .fold(ScheduleRequest::new(0), ScheduleRequest::with_task)
}

fn present_ids(schedule: &Schedule) -> Vec<TaskId> {
    schedule.admitted().map(|task| task.id.clone()).collect()
}

#[test]
fn tasks_filling_the_horizon_are_all_admitted() {
    let request = request_with(tasks(
        &[2.0, 3.0, 6.0, 4.0, 1.0],
        &[4, 2, 5, 2, 2],
        &[10; 5],
        &[15; 5],
    ));

    let schedule = schedule(&request);

    assert!(schedule.found);
    assert_eq!(schedule.admitted().count(), 5);
}

#[test]
fn staggered_due_dates_are_all_admitted() {
    let request = request_with(tasks(
        &[2.0, 3.0, 6.0, 4.0, 1.0],
        &[4, 2, 5, 2, 2],
        &[2, 5, 8, 12, 14],
        &[4, 6, 11, 13, 15],
    ));

    let schedule = schedule(&request);

    assert!(schedule.found);
    assert_eq!(schedule.admitted().count(), 5);
}

#[test]
fn single_task_starts_at_the_request_start() {
    let request = ScheduleRequest::new(0)
        .with_task(Task::new(TaskId::from(1), 3, 2.0, 10).with_max_due_date(15));

    let schedule = schedule(&request);

    let task = &schedule.tasks[0];
    assert!(task.is_present);
    assert!(!task.is_late);
    assert_eq!(task.start, 0);
}

#[test]
fn reserved_interval_is_avoided() {
    let request = ScheduleRequest::new(0)
        .with_task(Task::new(TaskId::from(1), 3, 2.0, 10).with_max_due_date(15))
        .with_reserved_interval(ReservedInterval::new(0, 5));

    let schedule = schedule(&request);

    let task = &schedule.tasks[0];
    assert!(task.is_present);
    assert!(task.start >= 5);
}

#[test]
fn untagged_task_avoids_tag_interval() {
    let request = ScheduleRequest::new(0)
        .with_task(Task::new(TaskId::from(1), 3, 2.0, 10).with_max_due_date(15))
        .with_reserved_tag_interval(ReservedTagInterval::new(0, 5, ["Unavailable"]));

    let schedule = schedule(&request);

    let task = &schedule.tasks[0];
    assert!(task.is_present);
    assert!(task.start >= 5);
}

#[test]
fn task_sharing_the_tag_may_use_the_interval() {
    let request = ScheduleRequest::new(0)
        .with_task(
            Task::new(TaskId::from(1), 3, 2.0, 10)
                .with_max_due_date(15)
                .with_tags(["Perso"]),
        )
        .with_reserved_tag_interval(ReservedTagInterval::new(0, 5, ["Perso"]));

    let schedule = schedule(&request);

    // Nothing keeps the task out of [0, 5), so it finishes as early as its priority prefers.
    let task = &schedule.tasks[0];
    assert!(task.is_present);
    assert!(task.start < 5);
}

#[test]
fn one_shared_tag_is_enough_to_use_the_interval() {
    let request = ScheduleRequest::new(0)
        .with_task(
            Task::new(TaskId::from(1), 3, 2.0, 10)
                .with_max_due_date(15)
                .with_tags(["Perso", "Autre"]),
        )
        .with_reserved_tag_interval(ReservedTagInterval::new(0, 5, ["Perso"]));

    let schedule = schedule(&request);

    let task = &schedule.tasks[0];
    assert!(task.is_present);
    assert!(task.start < 5);
}

#[test]
fn lowest_raw_priority_task_is_rejected_when_time_runs_out() {
    // Raw priorities 75, 150, 120, 200, 50 and 83; the durations exceed the horizon by one.
    let request = request_with(tasks(
        &[3.0, 3.0, 6.0, 4.0, 1.0, 5.0],
        &[4, 2, 5, 2, 2, 6],
        &[2, 5, 8, 12, 14, 15],
        &[4, 6, 11, 13, 15, 20],
    ));

    let schedule = schedule(&request);

    assert!(schedule.found);
    assert_eq!(
        present_ids(&schedule),
        [1, 2, 3, 4, 6].map(TaskId::from).to_vec()
    );
    assert_eq!(schedule.total_raw_priority, 75 + 150 + 120 + 200 + 83);
    assert!(!schedule.task(&TaskId::from(5)).unwrap().is_present);
}

#[test]
fn realistic_timestamps_respect_tag_windows() {
    let request = ScheduleRequest::new(5657816)
        .with_task(
            Task::new(TaskId::from("2a6laipv4ttscfdo4kn6vj6hcv"), 2, 10.0, 5661192)
                .with_max_due_date(5679924)
                .with_tags(["Ouvré"]),
        )
        .with_task(
            Task::new(TaskId::from("c4rjgc1ohq8k5qmqlm3m0m6gq4"), 12, 60.0, 5658000)
                .with_max_due_date(5658288),
        )
        .with_reserved_tag_interval(ReservedTagInterval::new(5657544, 5657664, ["Ouvré"]))
        .with_reserved_tag_interval(ReservedTagInterval::new(5658120, 5658252, ["Ouvré"]))
        .with_reserved_interval(ReservedInterval::new(5675556, 5675568));

    let schedule = schedule(&request);

    assert!(schedule.found);
    assert_eq!(schedule.admitted().count(), 2);
}

#[test]
fn no_slack_task_is_never_late() {
    let request = ScheduleRequest::new(0)
        .with_task(Task::new(TaskId::from(1), 4, 2.0, 10))
        .with_task(Task::new(TaskId::from(2), 4, 1.0, 10).with_max_due_date(20));

    let schedule = schedule(&request);

    let fixed = &schedule.tasks[0];
    assert!(fixed.is_present);
    assert!(!fixed.is_late);
    assert_eq!(fixed.delay, 0);
    assert_eq!(fixed.priority, 0);
}

#[test]
fn no_slack_task_is_admitted_past_its_due_date() {
    // Task 1 takes 4 time units, so it can never end by its due date of 2.
    let request = ScheduleRequest::new(0)
        .with_task(Task::new(TaskId::from(1), 4, 2.0, 2))
        .with_task(Task::new(TaskId::from(2), 4, 1.0, 10).with_max_due_date(20));

    let schedule = schedule(&request);

    assert_eq!(schedule.admitted().count(), 2);
    assert_eq!(schedule.total_raw_priority, 50 + 25);
    let fixed = &schedule.tasks[0];
    assert!(!fixed.is_late);
    assert_eq!(fixed.delay, 0);
}

#[test]
fn task_longer_than_its_window_is_rejected() {
    let request = ScheduleRequest::new(0)
        .with_task(Task::new(TaskId::from(1), 30, 2.0, 10).with_max_due_date(20))
        .with_task(Task::new(TaskId::from(2), 4, 1.0, 10).with_max_due_date(20));

    let result = Scheduler::new(SchedulerOptions::default()).schedule(&request);

    assert!(matches!(result, Err(SchedulingError::Model(_))));
}

#[test]
fn repeated_requests_give_equal_objectives() {
    let request = request_with(tasks(
        &[3.0, 3.0, 6.0, 4.0, 1.0, 5.0],
        &[4, 2, 5, 2, 2, 6],
        &[2, 5, 8, 12, 14, 15],
        &[4, 6, 11, 13, 15, 20],
    ));
    let mut scheduler = Scheduler::new(SchedulerOptions::default());

    let first = scheduler.schedule(&request).unwrap();
    let second = scheduler.schedule(&request).unwrap();

    assert_eq!(first.total_raw_priority, second.total_raw_priority);
    assert_eq!(first.total_priority, second.total_priority);
    assert_eq!(present_ids(&first), present_ids(&second));
}

/// Records the objective value reached in each phase.
#[derive(Debug, Default)]
struct RecordingEngine {
    inner: PumpkinEngine,
    objectives: Vec<i64>,
}

impl SolvingEngine for RecordingEngine {
    fn solve(
        &mut self,
        model: &Model,
        objective: IntVar,
        limits: &SolveLimits,
    ) -> Result<SolveOutcome, EngineError> {
        let outcome = self.inner.solve(model, objective, limits)?;
        if let Some(assignment) = outcome.assignment() {
            self.objectives.push(assignment.value(objective));
        }
        Ok(outcome)
    }
}

#[test]
fn refinement_keeps_the_admission_objective() {
    let request = request_with(tasks(
        &[3.0, 3.0, 6.0, 4.0, 1.0, 5.0],
        &[4, 2, 5, 2, 2, 6],
        &[2, 5, 8, 12, 14, 15],
        &[4, 6, 11, 13, 15, 20],
    ));
    let mut engine = RecordingEngine::default();

    let schedule = Scheduler::with_engine(SchedulerOptions::default(), &mut engine)
        .schedule(&request)
        .unwrap();

    assert_eq!(engine.objectives.len(), 2);
    assert_eq!(engine.objectives[0], schedule.total_raw_priority);
    assert_eq!(engine.objectives[1], schedule.total_priority);
}

#[test]
fn triggered_interrupt_stops_scheduling() {
    let interrupt = Interrupt::new();
    interrupt.trigger();
    let options = SchedulerOptions {
        interrupt: Some(interrupt),
        ..Default::default()
    };
    let request = request_with(tasks(&[2.0, 3.0], &[4, 2], &[10, 10], &[15, 15]));

    let result = Scheduler::new(options).schedule(&request);

    assert_eq!(result, Err(SchedulingError::Engine(EngineError::Interrupted)));
}
