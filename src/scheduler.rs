//! Cooperative Task Scheduler
//!
//! Runs units of work from the main loop at caller-chosen intervals. Nothing
//! here blocks: [`ScheduledTask::execute`] either runs the work once or
//! returns immediately, so it can be polled from a tight loop while the
//! keying interrupt handles bit timing.
//!
//! A task is one-shot per [`schedule`](ScheduledTask::schedule) call. The
//! work decides its own next period by returning it from [`Task::run`]; a
//! producer typically asks for a short retry period while the payload
//! buffer is busy and a long one after a successful hand-off.

use heapless::Vec;

use crate::types::Millis;

/// Monotonic millisecond time source
pub trait Clock {
    /// Current time
    fn now(&self) -> Millis;
}

/// A unit of work driven by the scheduler
pub trait Task {
    /// Do the work
    ///
    /// Returns the period after which the task wants to run again, or
    /// `None` to stay inactive until rescheduled externally.
    fn run(&mut self, now: Millis) -> Option<Millis>;
}

/// Timing state of a scheduled task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Schedule {
    /// Task is armed
    active: bool,
    /// Timestamp of the last run
    last_run: Millis,
    /// Minimum time between the last run and the next one
    period: Millis,
}

impl Schedule {
    /// Create an inactive schedule
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: false,
            last_run: Millis::ZERO,
            period: Millis::ZERO,
        }
    }

    /// Arm with a new period, measured from the last run
    pub fn arm(&mut self, period: Millis) {
        self.period = period;
        self.active = true;
    }

    /// Disarm without touching the timestamps
    pub fn disarm(&mut self) {
        self.active = false;
    }

    /// Check if the schedule is armed and its period has elapsed
    #[must_use]
    pub fn is_due(&self, now: Millis) -> bool {
        self.active && now.elapsed_since(self.last_run) >= self.period
    }

    /// Record a run at `now` and disarm
    fn fire(&mut self, now: Millis) {
        self.active = false;
        self.last_run = now;
    }
}

/// Anything the scheduler can poll
pub trait Execute {
    /// Run the work if due; returns true if it ran
    fn execute(&mut self, now: Millis) -> bool;
}

/// A task together with its schedule
#[derive(Debug)]
pub struct ScheduledTask<T> {
    schedule: Schedule,
    task: T,
}

impl<T: Task> ScheduledTask<T> {
    /// Wrap a task; it stays inactive until scheduled
    #[must_use]
    pub const fn new(task: T) -> Self {
        Self {
            schedule: Schedule::new(),
            task,
        }
    }

    /// Arm the task to run once `period` has elapsed since its last run
    ///
    /// Does not run the task.
    pub fn schedule(&mut self, period: Millis) {
        self.schedule.arm(period);
    }

    /// Disarm the task
    pub fn cancel(&mut self) {
        self.schedule.disarm();
    }

    /// Run the task if it is active and its period has elapsed
    ///
    /// The task is disarmed and its timestamp updated before the work
    /// runs. At most one run per call.
    pub fn execute(&mut self, now: Millis) -> bool {
        if !self.schedule.is_due(now) {
            return false;
        }

        self.schedule.fire(now);
        if let Some(next) = self.task.run(now) {
            self.schedule.arm(next);
        }
        true
    }

    /// Check if the task is armed
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.schedule.active
    }

    /// Requested period
    #[must_use]
    pub const fn period(&self) -> Millis {
        self.schedule.period
    }

    /// Timestamp of the last run
    #[must_use]
    pub const fn last_run(&self) -> Millis {
        self.schedule.last_run
    }

    /// Borrow the task
    pub fn task(&self) -> &T {
        &self.task
    }
}

impl<T: Task> Execute for ScheduledTask<T> {
    fn execute(&mut self, now: Millis) -> bool {
        ScheduledTask::execute(self, now)
    }
}

/// Fixed-capacity set of tasks polled together from the main loop
pub struct Scheduler<'a, const N: usize> {
    tasks: Vec<&'a mut dyn Execute, N>,
}

impl<'a, const N: usize> Scheduler<'a, N> {
    /// Create an empty scheduler
    #[must_use]
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Register a task; hands it back if the scheduler is full
    pub fn add(&mut self, task: &'a mut dyn Execute) -> Result<(), &'a mut dyn Execute> {
        self.tasks.push(task)
    }

    /// Poll every task once; returns how many ran
    pub fn poll(&mut self, now: Millis) -> usize {
        self.tasks
            .iter_mut()
            .map(|task| task.execute(now))
            .filter(|&ran| ran)
            .count()
    }

    /// Number of registered tasks
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if no task is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<const N: usize> Default for Scheduler<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}
