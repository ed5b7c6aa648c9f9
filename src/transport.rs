//! The I/O primitives a Jam/STAPL player calls while executing a program.
//!
//! `Transport` owns everything those primitives share: the cable, the signal catalog, the clock
//! pacing, the hardware init latch and the last levels driven on TMS and TDI.  The player calls
//! `map_signals` once per vector group and then `vector_io` for each vector, or `bit_transact`
//! for plain bit-serial shifting.
use embedded_hal::delay::DelayNs;

use crate::cable::{Cable, Line};
use crate::config::Config;
use crate::error::Result;
use crate::export;
use crate::signals::SignalCatalog;
use crate::timing::Timing;
use crate::vector;

/// Drive every line and sample TDO on every clock, ignoring the cached levels.
const SLOW: bool = cfg!(feature = "slow-io");

pub struct Transport<C, D> {
    cable: C,
    delay: D,
    catalog: SignalCatalog,
    timing: Timing,
    verbose: bool,
    initialized: bool,
    // levels last driven by bit_transact; None until driven
    last_tms: Option<bool>,
    last_tdi: Option<bool>,
}

impl<C: Cable, D: DelayNs> Transport<C, D> {
    /// Create a transport over `cable` with the default signal catalog.  The cable is not
    /// touched until the first transfer.
    pub fn new(cable: C, delay: D) -> Self {
        Self {
            cable,
            delay,
            catalog: SignalCatalog::default(),
            timing: Timing::calibrate(),
            verbose: false,
            initialized: false,
            last_tms: None,
            last_tdi: None,
        }
    }

    pub fn with_config(cable: C, delay: D, config: &Config) -> Self {
        let mut transport = Self::new(cable, delay);
        transport.verbose = config.verbose;
        transport
    }

    pub fn with_catalog(mut self, catalog: SignalCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn cable(&self) -> &C {
        &self.cable
    }

    pub fn cable_mut(&mut self) -> &mut C {
        &mut self.cable
    }

    pub fn catalog(&self) -> &SignalCatalog {
        &self.catalog
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn ensure_initialized(&mut self) -> Result<()> {
        if !self.initialized {
            self.cable.init()?;
            self.initialized = true;
        }
        Ok(())
    }

    /// Bind the program's vector signal names to the cable's signals.  Returns how many catalog
    /// entries were bound.
    pub fn map_signals<S: AsRef<str>>(&mut self, names: &[S]) -> usize {
        let matched = self.catalog.bind(names);
        log::trace!("mapped {} of {} vector signals", matched, names.len());
        matched
    }

    /// Apply one vector to the cable.
    ///
    /// Bound signals whose `direction` bit is set are outputs and are driven from `data`.  If
    /// any bound signal is an input and `capture` is given, the inputs are sampled and written
    /// to `capture`; other capture bits are left alone.  Signals at or past `signal_count` are
    /// ignored.  Returns the number of bound signals below `signal_count`.
    pub fn vector_io(
        &mut self,
        signal_count: usize,
        direction: &[u32],
        data: &[u32],
        capture: Option<&mut [u32]>,
    ) -> Result<usize> {
        self.ensure_initialized()?;

        let mut matched = 0;
        let mut mask = 0u8;
        let mut out = 0u8;
        let mut dir = 0u8;
        for (bit, signal) in self.catalog.bound() {
            if signal < signal_count {
                let bit = 1 << bit;
                mask |= bit;
                if vector::get(data, signal) {
                    out |= bit;
                }
                if vector::get(direction, signal) {
                    dir |= bit;
                }
                matched += 1;
            }
        }

        if dir != 0 {
            self.cable.write_byte(out)?;
            // the byte moved TMS and TDI behind bit_transact's back
            self.last_tms = None;
            self.last_tdi = None;
        }

        let capture = match capture {
            Some(capture) if dir != mask => capture,
            _ => return Ok(matched),
        };

        let input = match self.cable.read_byte()? {
            Some(input) => input,
            None => {
                log::error!("serial relay not responding");
                return Ok(matched);
            }
        };

        for (bit, signal) in self.catalog.bound() {
            let bit = 1 << bit;
            if signal < signal_count && dir & bit == 0 {
                vector::set(capture, signal, input & bit != 0);
            }
        }
        Ok(matched)
    }

    /// Clock one bit: set TMS and TDI, pulse TCK, and sample TDO on the rising edge if
    /// `read_tdo` is set.  TCK is low again when this returns.
    ///
    /// Returns the sampled TDO level, or `false` when it wasn't sampled.
    pub fn bit_transact(&mut self, tms: bool, tdi: bool, read_tdo: bool) -> Result<bool> {
        self.ensure_initialized()?;

        if SLOW || self.last_tms != Some(tms) {
            self.cable.set_line(Line::Tms, tms)?;
            self.last_tms = Some(tms);
        }
        if SLOW || self.last_tdi != Some(tdi) {
            self.cable.set_line(Line::Tdi, tdi)?;
            self.last_tdi = Some(tdi);
        }

        // TCK is already low unless something other than us moved it
        if SLOW {
            self.cable.set_line(Line::Tck, false)?;
        }
        self.cable.set_line(Line::Tck, true)?;

        let mut tdo = false;
        if read_tdo || SLOW {
            tdo = match self.cable.read_line(Line::Tdo)? {
                Some(level) => level,
                None => {
                    log::error!("serial relay not responding");
                    false
                }
            };
        }

        let half_period = self.timing.half_period_ns();
        if half_period > 0 {
            self.delay.delay_ns(half_period);
        }
        self.cable.set_line(Line::Tck, false)?;
        if half_period > 0 {
            self.delay.delay_ns(half_period);
        }

        log::trace!("tms {} tdi {} -> tdo {}", tms as u8, tdi as u8, tdo as u8);
        Ok(tdo)
    }

    /// Set the TCK rate.  -1 removes the limit and 0 stops the clock; a stopped clock is not
    /// paced, so transactions still pulse TCK.  Every rate is accepted.
    pub fn set_frequency(&mut self, hertz: i64) -> Result<()> {
        if self.verbose {
            log::info!("Frequency: {} Hz", hertz);
        }
        if hertz < -1 {
            log::warn!("negative clock rate {} Hz leaves the clock unpaced", hertz);
        }
        self.timing.set_frequency(hertz);
        Ok(())
    }

    /// Wait for at least `microseconds`.
    pub fn delay(&mut self, microseconds: u32) {
        self.delay.delay_us(microseconds);
    }

    /// A message from the program to the user.
    pub fn message(&self, text: &str) {
        log::info!("{}", text);
    }

    pub fn export_integer(&self, key: &str, value: i64) {
        if self.verbose {
            log::info!("{}", export::integer(key, value));
        }
    }

    pub fn export_boolean_array(&self, key: &str, data: &[u8], count: usize) {
        if self.verbose {
            for line in export::boolean_array(key, data, count) {
                log::info!("{}", line);
            }
        }
    }

    /// Release the cable if it was initialized.  The next transfer initializes it again.
    pub fn close(&mut self) -> Result<()> {
        if self.initialized {
            self.cable.close()?;
            self.initialized = false;
            self.last_tms = None;
            self.last_tdi = None;
        }
        Ok(())
    }
}
