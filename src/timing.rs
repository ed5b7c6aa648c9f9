//! Clock pacing.
//!
//! Delays are counted in calibrated units, `one_ms` of them per millisecond.  The waits
//! themselves go through an embedded-hal `DelayNs`, which works in real time, so the startup
//! calibration is simply one unit per microsecond.

/// Units per millisecond of the startup calibration.
pub const CALIBRATED_MS_UNIT: i64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockPacing {
    /// Run as fast as the cable allows.
    Unlimited,
    /// No clock pulses at all.
    Stopped,
    /// One clock period, in calibrated units.
    ///
    /// Negative for rates below -1 Hz; those are kept as computed and not paced.
    Delay(i64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    one_ms: i64,
    pacing: ClockPacing,
}

impl Timing {
    pub fn calibrate() -> Self {
        Self::with_unit(CALIBRATED_MS_UNIT)
    }

    pub fn with_unit(one_ms: i64) -> Self {
        Timing {
            one_ms,
            pacing: ClockPacing::Unlimited,
        }
    }

    pub fn one_ms(&self) -> i64 {
        self.one_ms
    }

    pub fn pacing(&self) -> ClockPacing {
        self.pacing
    }

    /// -1 removes the limit, 0 stops the clock, anything else sets the period for that rate.
    pub fn set_frequency(&mut self, hertz: i64) {
        self.pacing = match hertz {
            -1 => ClockPacing::Unlimited,
            0 => ClockPacing::Stopped,
            _ => ClockPacing::Delay(self.one_ms * 1000 / hertz),
        };
    }

    /// Half of the paced clock period in nanoseconds, zero when not paced.
    pub fn half_period_ns(&self) -> u32 {
        match self.pacing {
            ClockPacing::Delay(units) if units > 0 && self.one_ms > 0 => {
                let period_ns = units.saturating_mul(1_000_000) / self.one_ms;
                u32::try_from(period_ns / 2).unwrap_or(u32::MAX)
            }
            _ => 0,
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Timing::calibrate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_sentinels() {
        let mut timing = Timing::with_unit(1000);
        timing.set_frequency(0);
        assert_eq!(timing.pacing(), ClockPacing::Stopped);
        timing.set_frequency(-1);
        assert_eq!(timing.pacing(), ClockPacing::Unlimited);
        assert_ne!(ClockPacing::Stopped, ClockPacing::Delay(0));
        timing.set_frequency(1000);
        assert_eq!(timing.pacing(), ClockPacing::Delay(1000));
    }

    #[test]
    fn delay_truncates() {
        let mut timing = Timing::calibrate();
        timing.set_frequency(3);
        assert_eq!(timing.pacing(), ClockPacing::Delay(333_333));
        timing.set_frequency(10_000_000);
        assert_eq!(timing.pacing(), ClockPacing::Delay(0));
        assert_eq!(timing.half_period_ns(), 0);
    }

    #[test]
    fn rates_below_minus_one_keep_the_raw_quotient() {
        let mut timing = Timing::calibrate();
        timing.set_frequency(-2);
        assert_eq!(timing.pacing(), ClockPacing::Delay(-500_000));
        assert_eq!(timing.half_period_ns(), 0);
    }

    #[test]
    fn half_period() {
        let mut timing = Timing::calibrate();
        assert_eq!(timing.half_period_ns(), 0);
        // 1 kHz is a 1 ms period
        timing.set_frequency(1000);
        assert_eq!(timing.half_period_ns(), 500_000);
        timing.set_frequency(1);
        assert_eq!(timing.half_period_ns(), 500_000_000);
    }
}
