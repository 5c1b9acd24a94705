//! Simulation driver
//!
//! A small state machine `Idle -> Running(i) -> Done` that walks the progress
//! labels in order. Every advance waits one randomized delay on the injected
//! [`Scheduler`] before moving the index forward.

use crate::clock::Scheduler;
use crate::config::StepTiming;
use rand::Rng;
use std::time::Duration;
use tracing::debug;

/// Where a simulation currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationState {
    #[default]
    Idle,
    Running(usize),
    Done,
}

impl SimulationState {
    pub fn is_running(&self) -> bool {
        matches!(self, SimulationState::Running(_))
    }

    pub fn is_done(&self) -> bool {
        matches!(self, SimulationState::Done)
    }

    /// 0 while idle, the active index while running, `total` once done
    pub fn current_step_index(&self, total: usize) -> usize {
        match self {
            SimulationState::Idle => 0,
            SimulationState::Running(index) => *index,
            SimulationState::Done => total,
        }
    }

    pub fn status_of(&self, index: usize) -> StepStatus {
        match self {
            SimulationState::Idle => StepStatus::Pending,
            SimulationState::Done => StepStatus::Done,
            SimulationState::Running(current) if index < *current => StepStatus::Done,
            SimulationState::Running(current) if index == *current => StepStatus::Active,
            SimulationState::Running(_) => StepStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Active,
    Done,
}

/// A progress label together with its status, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub label: String,
    pub status: StepStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationEvent {
    /// The step at `index` became active after waiting `waited`
    StepActive { index: usize, waited: Duration },
    /// All steps elapsed; emitted once per run
    Completed { steps: usize, elapsed: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Cancelled,
}

pub struct SimulationDriver {
    steps: Vec<String>,
    timing: StepTiming,
    state: SimulationState,
    elapsed: Duration,
}

impl SimulationDriver {
    pub fn new(steps: Vec<String>, timing: StepTiming) -> Self {
        Self { steps, timing, state: SimulationState::Idle, elapsed: Duration::ZERO }
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn timing(&self) -> StepTiming {
        self.timing
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Time spent waiting in the current (or last) run
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Resets to the first step and marks it active
    pub fn start(&mut self) -> SimulationEvent {
        self.state = SimulationState::Running(0);
        self.elapsed = Duration::ZERO;
        debug!(steps = self.steps.len(), "simulation started");
        SimulationEvent::StepActive { index: 0, waited: Duration::ZERO }
    }

    /// Drops any in-flight run without completing it
    pub fn abandon(&mut self) {
        self.state = SimulationState::Idle;
        self.elapsed = Duration::ZERO;
    }

    /// Waits one step delay, then moves forward
    ///
    /// Returns `None` without waiting when the driver is not running.
    pub fn advance<S, R>(&mut self, scheduler: &mut S, rng: &mut R) -> Option<SimulationEvent>
    where
        S: Scheduler + ?Sized,
        R: Rng + ?Sized,
    {
        let SimulationState::Running(current) = self.state else {
            return None;
        };

        let delay = self.timing.sample(rng);
        scheduler.sleep(delay);
        self.elapsed = self.elapsed.saturating_add(delay);

        let next = current + 1;
        if next >= self.steps.len() {
            self.state = SimulationState::Done;
            debug!(
                steps = self.steps.len(),
                elapsed_ms = self.elapsed.as_millis() as u64,
                "simulation done"
            );
            Some(SimulationEvent::Completed { steps: self.steps.len(), elapsed: self.elapsed })
        } else {
            self.state = SimulationState::Running(next);
            debug!(
                step = next,
                delay_ms = delay.as_millis() as u64,
                label = %self.steps[next],
                "step active"
            );
            Some(SimulationEvent::StepActive { index: next, waited: delay })
        }
    }

    /// Drives a run to completion
    ///
    /// An idle driver is started first; a running one continues from its
    /// active step, which the observer sees again with a zero wait. A finished
    /// driver returns `Completed` without waiting or emitting anything.
    ///
    /// `cancelled` is polled before every wait; once it reports true the run
    /// is abandoned and no `Completed` event is emitted.
    pub fn run<S, R, C, F>(
        &mut self,
        scheduler: &mut S,
        rng: &mut R,
        mut cancelled: C,
        mut observer: F,
    ) -> RunOutcome
    where
        S: Scheduler + ?Sized,
        R: Rng + ?Sized,
        C: FnMut() -> bool,
        F: FnMut(&SimulationEvent),
    {
        match self.state {
            SimulationState::Idle => observer(&self.start()),
            SimulationState::Running(index) => {
                observer(&SimulationEvent::StepActive { index, waited: Duration::ZERO })
            }
            SimulationState::Done => return RunOutcome::Completed,
        }
        loop {
            if cancelled() {
                debug!(state = ?self.state, "simulation cancelled");
                self.abandon();
                return RunOutcome::Cancelled;
            }
            match self.advance(scheduler, rng) {
                Some(event) => {
                    let finished = matches!(event, SimulationEvent::Completed { .. });
                    observer(&event);
                    if finished {
                        return RunOutcome::Completed;
                    }
                }
                None => return RunOutcome::Completed,
            }
        }
    }

    pub fn step_views(&self) -> Vec<StepView> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, label)| StepView { label: label.clone(), status: self.state.status_of(i) })
            .collect()
    }
}
