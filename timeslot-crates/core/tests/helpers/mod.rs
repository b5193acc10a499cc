//! Shared checks for the scheduling integration tests.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use timeslot_core::formulation::incompatible_windows;
use timeslot_core::priority::raw_priority;
use timeslot_core::Schedule;
use timeslot_core::ScheduleRequest;
use timeslot_core::ScheduledTask;
use timeslot_core::Scheduler;
use timeslot_core::SchedulerOptions;
use timeslot_core::Task;
use timeslot_core::TaskId;

/// Schedules `request` with the default engine and checks every structural property of the
/// result.
pub(crate) fn schedule(request: &ScheduleRequest) -> Schedule {
    let schedule = Scheduler::new(SchedulerOptions::default())
        .schedule(request)
        .expect("request should be valid");

    if schedule.found {
        check_schedule(request, &schedule);
    }

    schedule
}

pub(crate) fn check_schedule(request: &ScheduleRequest, schedule: &Schedule) {
    let horizon = request.horizon().unwrap_or(request.start);

    assert_eq!(schedule.tasks.len(), request.tasks.len());
    for (task, scheduled) in request.tasks.iter().zip(&schedule.tasks) {
        assert_eq!(scheduled.id, task.id);
        assert_eq!(scheduled.duration, task.duration);

        if task.slack() > 0 {
            assert_eq!(
                scheduled.is_late,
                scheduled.delay < 0,
                "isLate must hold exactly when the delay is negative for task {}",
                task.id
            );
        } else {
            assert!(!scheduled.is_late);
            assert_eq!(scheduled.delay, 0);
        }

        if !scheduled.is_present {
            continue;
        }

        let end = scheduled.start + scheduled.duration;
        let deadline = if task.slack() > 0 {
            task.latest_due_date()
        } else {
            horizon
        };
        assert!(scheduled.start >= request.start, "task {} starts too early", task.id);
        assert!(end <= deadline, "task {} ends too late", task.id);

        for window in incompatible_windows(task, request) {
            assert!(
                end <= window.start || window.end <= scheduled.start,
                "task {} overlaps reserved window [{}, {})",
                task.id,
                window.start,
                window.end
            );
        }
    }

    let admitted = schedule.admitted().collect::<Vec<_>>();
    for (index, first) in admitted.iter().enumerate() {
        for second in &admitted[index + 1..] {
            assert!(
                !overlaps(first, second),
                "tasks {} and {} overlap",
                first.id,
                second.id
            );
        }
    }

    let admitted_raw_priority = request
        .tasks
        .iter()
        .zip(&schedule.tasks)
        .filter(|(_, scheduled)| scheduled.is_present)
        .map(|(task, _)| raw_priority(task.impact(), task.duration).unwrap())
        .sum::<i64>();
    assert_eq!(schedule.total_raw_priority, admitted_raw_priority);

    let admitted_priority = admitted.iter().map(|task| task.priority).sum::<i64>();
    assert_eq!(schedule.total_priority, admitted_priority);
}

fn overlaps(first: &ScheduledTask, second: &ScheduledTask) -> bool {
    first.start < second.start + second.duration && second.start < first.start + first.duration
}

/// Builds tasks from parallel columns, with ids `1..=n`.
pub(crate) fn tasks(
    impacts: &[f64],
    durations: &[i64],
    due_dates: &[i64],
    max_due_dates: &[i64],
) -> Vec<Task> {
    impacts
        .iter()
        .zip(durations)
        .zip(due_dates.iter().zip(max_due_dates))
        .enumerate()
        .map(|(index, ((&impact, &duration), (&due_date, &max_due_date)))| {
            Task::new(TaskId::from(index as i64 + 1), duration, impact, due_date)
                .with_max_due_date(max_due_date)
        })
        .collect()
}
