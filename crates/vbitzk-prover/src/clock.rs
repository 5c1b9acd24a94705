//! Time seams for the simulation
//!
//! Wall-clock reads go through [`Clock`] and step waits through [`Scheduler`],
//! so runs can be replayed in tests without real delays.

use chrono::{DateTime, SecondsFormat, Utc};
use std::time::Duration;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Suspends the simulation between progress steps
pub trait Scheduler {
    fn sleep(&mut self, delay: Duration);
}

/// Blocks the current thread for each delay
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn sleep(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// Records requested delays and returns immediately
#[derive(Debug, Clone, Default)]
pub struct InstantScheduler {
    slept: Vec<Duration>,
}

impl InstantScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays(&self) -> &[Duration] {
        &self.slept
    }

    /// Sum of all delays that a real scheduler would have waited
    pub fn total(&self) -> Duration {
        self.slept.iter().sum()
    }
}

impl Scheduler for InstantScheduler {
    fn sleep(&mut self, delay: Duration) {
        self.slept.push(delay);
    }
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn sleep(&mut self, delay: Duration) {
        (**self).sleep(delay)
    }
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn sleep(&mut self, delay: Duration) {
        (**self).sleep(delay)
    }
}

/// ISO-8601 UTC with millisecond precision and a `Z` suffix
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
