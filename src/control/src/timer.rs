//! Timing against the board's free running millisecond counter.
//!
//! `now` is always milliseconds since boot as a `u32`, which wraps roughly
//! every 49.7 days. Elapsed time is taken with wrapping subtraction so that
//! a deadline armed just before the wrap still expires on time.

use core::time::Duration;

fn to_millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Deadline {
    armed: Option<(u32, u32)>,
}

impl Deadline {
    pub fn start(&mut self, now: u32, limit: Duration) {
        self.armed = Some((now, to_millis(limit)));
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    pub fn is_running(&self) -> bool {
        self.armed.is_some()
    }

    pub fn expired(&self, now: u32) -> bool {
        match self.armed {
            Some((started, limit)) => now.wrapping_sub(started) >= limit,
            None => false,
        }
    }

    pub fn remaining(&self, now: u32) -> Option<Duration> {
        self.armed.map(|(started, limit)| {
            let elapsed = now.wrapping_sub(started);
            Duration::from_millis(u64::from(limit.saturating_sub(elapsed)))
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Interval {
    period: u32,
    last: Option<u32>,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Interval {
            period: to_millis(period),
            last: None,
        }
    }

    pub fn due(&mut self, now: u32) -> bool {
        match self.last {
            None => {
                self.last = Some(now);
                true
            }
            Some(last) if now.wrapping_sub(last) >= self.period => {
                // Step from the previous due instant so late polls don't drift
                let mut next = last.wrapping_add(self.period);
                if now.wrapping_sub(next) >= self.period {
                    next = now;
                }
                self.last = Some(next);
                true
            }
            Some(_) => false,
        }
    }
}
