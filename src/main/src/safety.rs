//! Hard limits on how long the spa and the chlorine dispenser may run.

use log::*;

use control::{Deadline, PowerState, Timeouts};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    // Turned on by a user at the panel
    User,
    // Turned on by the controller itself
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cutoff {
    pub spa: bool,
    pub chlorine: bool,
}

impl Cutoff {
    pub fn any(&self) -> bool {
        self.spa || self.chlorine
    }
}

#[derive(Debug)]
pub struct Interlocks {
    timeouts: Timeouts,
    user: Deadline,
    system: Deadline,
    chlorine: Deadline,
}

impl Interlocks {
    pub fn new(timeouts: Timeouts) -> Self {
        Interlocks {
            timeouts,
            user: Deadline::default(),
            system: Deadline::default(),
            chlorine: Deadline::default(),
        }
    }

    pub fn spa_on(&mut self, now: u32, origin: Origin) {
        match origin {
            Origin::User => {
                self.system.cancel();
                self.user.start(now, self.timeouts.user);
            }
            Origin::System => {
                self.user.cancel();
                self.system.start(now, self.timeouts.system);
            }
        }
        info!("Spa on ({:?}), cut off after {:?}", origin, self.spa_remaining(now));
    }

    pub fn spa_off(&mut self) {
        self.user.cancel();
        self.system.cancel();
    }

    pub fn chlorine_start(&mut self, now: u32) {
        self.chlorine.start(now, self.timeouts.chlorine);
        info!(
            "Chlorine dispense started, cut off after {:?}",
            self.timeouts.chlorine
        );
    }

    pub fn chlorine_stop(&mut self) {
        self.chlorine.cancel();
    }

    pub fn spa(&self) -> PowerState {
        match self.user.is_running() || self.system.is_running() {
            true => PowerState::On,
            false => PowerState::Off,
        }
    }

    pub fn chlorine(&self) -> PowerState {
        match self.chlorine.is_running() {
            true => PowerState::On,
            false => PowerState::Off,
        }
    }

    pub fn spa_remaining(&self, now: u32) -> Option<core::time::Duration> {
        self.user.remaining(now).or(self.system.remaining(now))
    }

    /// Disarms and reports every run that has gone past its limit.
    pub fn poll(&mut self, now: u32) -> Cutoff {
        let mut cutoff = Cutoff::default();

        if self.user.expired(now) || self.system.expired(now) {
            warn!("Spa run time exceeded, shutting spa off");
            self.spa_off();
            cutoff.spa = true;
        }
        if self.chlorine.expired(now) {
            warn!("Chlorine dispense time exceeded, stopping dispenser");
            self.chlorine_stop();
            cutoff.chlorine = true;
        }
        cutoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use control::CoreConfig;
    use core::time::Duration;

    fn interlocks() -> Interlocks {
        Interlocks::new(CoreConfig::default().timeouts)
    }

    #[test]
    fn test_user_spa_cut_off_after_timeout() {
        let mut locks = interlocks();
        locks.spa_on(1_000, Origin::User);
        assert_eq!(locks.spa(), PowerState::On);

        assert_eq!(locks.poll(1_800_999), Cutoff::default());
        let cutoff = locks.poll(1_801_000);
        assert!(cutoff.spa);
        assert!(!cutoff.chlorine);
        assert_eq!(locks.spa(), PowerState::Off);

        // Fires once
        assert!(!locks.poll(5_000_000).any());
    }

    #[test]
    fn test_system_timeout_used_for_system_runs() {
        let timeouts = Timeouts {
            user: Duration::from_secs(60),
            system: Duration::from_secs(120),
            chlorine: Duration::from_secs(30),
        };
        let mut locks = Interlocks::new(timeouts);
        locks.spa_on(0, Origin::System);
        assert_eq!(locks.spa_remaining(0), Some(Duration::from_secs(120)));
        assert!(!locks.poll(60_000).spa);
        assert!(locks.poll(120_000).spa);
    }

    #[test]
    fn test_switching_origin_restarts_limit() {
        let timeouts = Timeouts {
            user: Duration::from_secs(60),
            system: Duration::from_secs(120),
            chlorine: Duration::from_secs(30),
        };
        let mut locks = Interlocks::new(timeouts);
        locks.spa_on(0, Origin::System);
        locks.spa_on(100_000, Origin::User);
        assert!(!locks.poll(150_000).spa);
        assert!(locks.poll(160_000).spa);
    }

    #[test]
    fn test_spa_off_disarms() {
        let mut locks = interlocks();
        locks.spa_on(0, Origin::User);
        locks.spa_off();
        assert_eq!(locks.spa(), PowerState::Off);
        assert_eq!(locks.spa_remaining(0), None);
        assert!(!locks.poll(u32::MAX / 2).spa);
    }

    #[test]
    fn test_chlorine_cut_off_independent_of_spa() {
        let mut locks = interlocks();
        locks.spa_on(0, Origin::User);
        locks.chlorine_start(10_000);
        assert_eq!(locks.chlorine(), PowerState::On);

        let cutoff = locks.poll(310_000);
        assert!(cutoff.chlorine);
        assert!(!cutoff.spa);
        assert_eq!(locks.chlorine(), PowerState::Off);
        assert_eq!(locks.spa(), PowerState::On);
    }

    #[test]
    fn test_stopped_dispense_not_reported() {
        let mut locks = interlocks();
        locks.chlorine_start(0);
        locks.chlorine_stop();
        assert!(!locks.poll(1_000_000).chlorine);
    }
}
