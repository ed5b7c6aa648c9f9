//! Implement the `Cable` trait by toggling GPIO pins directly.
//!
//! The pins are reached through a `PinController`, which addresses a numbered pin within a
//! numbered bank.  `HalPins` provides one on top of four embedded-hal pins; boards with a
//! different GPIO substrate implement the trait themselves.
use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::cable::{Cable, Line, TDO_BIT, TCK_BIT, TDI_BIT, TMS_BIT};
use crate::error::{Error, ErrorKind, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

pub trait PinController {
    fn set_direction(&mut self, bank: u32, pin: u32, direction: Direction) -> Result<()>;
    fn set_level(&mut self, bank: u32, pin: u32, high: bool) -> Result<()>;
    fn read_level(&mut self, bank: u32, pin: u32) -> Result<bool>;
    /// Give the pins back to the system.
    fn release(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Bank and pin numbers of the four JTAG lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinMap {
    pub bank: u32,
    pub tck: u32,
    pub tms: u32,
    pub tdo: u32,
    pub tdi: u32,
}

impl PinMap {
    pub const DEFAULT_BANK: u32 = 8;

    /// Derive the pin map from the clock pin.  Values above 100 carry the bank in the hundreds,
    /// so 811 is pin 11 of bank 8.  TMS, TDO and TDI follow the clock at +1, +2 and +3.
    pub fn from_clock_pin(clock_pin: u32) -> Self {
        let (bank, tck) = if clock_pin > 100 {
            (clock_pin / 100, clock_pin % 100)
        } else {
            (Self::DEFAULT_BANK, clock_pin)
        };
        PinMap {
            bank,
            tck,
            tms: tck + 1,
            tdo: tck + 2,
            tdi: tck + 3,
        }
    }

    pub fn pin(&self, line: Line) -> u32 {
        match line {
            Line::Tck => self.tck,
            Line::Tms => self.tms,
            Line::Tdo => self.tdo,
            Line::Tdi => self.tdi,
        }
    }

    /// Find which line a bank/pin pair belongs to.
    pub fn line(&self, bank: u32, pin: u32) -> Option<Line> {
        if bank != self.bank {
            return None;
        }
        [Line::Tck, Line::Tms, Line::Tdo, Line::Tdi]
            .into_iter()
            .find(|l| self.pin(*l) == pin)
    }
}

impl Default for PinMap {
    fn default() -> Self {
        PinMap::from_clock_pin(811)
    }
}

/// A `PinController` over four embedded-hal pins.  Only the bank/pin pairs in the map are
/// addressable, and each pin only in the direction its type allows.
pub struct HalPins<Tck, Tms, Tdo, Tdi> where Tck: OutputPin, Tms: OutputPin, Tdo: InputPin, Tdi: OutputPin {
    map: PinMap,
    tck: Tck,
    tms: Tms,
    tdo: Tdo,
    tdi: Tdi,
}

impl<Tck, Tms, Tdo, Tdi> HalPins<Tck, Tms, Tdo, Tdi> where Tck: OutputPin, Tms: OutputPin, Tdo: InputPin, Tdi: OutputPin {
    pub fn new(map: PinMap, tck: Tck, tms: Tms, tdo: Tdo, tdi: Tdi) -> Self {
        HalPins { map, tck, tms, tdo, tdi }
    }

    fn line(&self, bank: u32, pin: u32) -> Result<Line> {
        self.map
            .line(bank, pin)
            .ok_or(Error::new(ErrorKind::UnmappedPin, "pin is not part of the JTAG pin map"))
    }
}

impl<Tck, Tms, Tdo, Tdi> PinController for HalPins<Tck, Tms, Tdo, Tdi> where Tck: OutputPin, Tms: OutputPin, Tdo: InputPin, Tdi: OutputPin {
    fn set_direction(&mut self, bank: u32, pin: u32, direction: Direction) -> Result<()> {
        // embedded-hal pins carry their direction in their type
        let fixed = match self.line(bank, pin)? {
            Line::Tdo => Direction::Input,
            _ => Direction::Output,
        };
        if fixed != direction {
            return Err(Error::new(ErrorKind::Direction, "pin type does not allow this direction"));
        }
        Ok(())
    }

    fn set_level(&mut self, bank: u32, pin: u32, high: bool) -> Result<()> {
        let state = PinState::from(high);
        match self.line(bank, pin)? {
            Line::Tck => self.tck.set_state(state)?,
            Line::Tms => self.tms.set_state(state)?,
            Line::Tdi => self.tdi.set_state(state)?,
            Line::Tdo => return Err(Error::new(ErrorKind::Direction, "TDO is an input")),
        }
        Ok(())
    }

    fn read_level(&mut self, bank: u32, pin: u32) -> Result<bool> {
        match self.line(bank, pin)? {
            Line::Tdo => Ok(self.tdo.is_high()?),
            _ => Err(Error::new(ErrorKind::Direction, "only TDO can be sampled")),
        }
    }
}

/// Direct bit-bang cable.
pub struct Gpio<P> {
    pins: P,
    map: PinMap,
}

impl<P: PinController> Gpio<P> {
    pub fn new(pins: P, map: PinMap) -> Self {
        Gpio { pins, map }
    }

    pub fn pins(&self) -> &P {
        &self.pins
    }

    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }

    fn set(&mut self, line: Line, high: bool) -> Result<()> {
        self.pins.set_level(self.map.bank, self.map.pin(line), high)
    }
}

impl<P: PinController> Cable for Gpio<P> {
    fn init(&mut self) -> Result<()> {
        let PinMap { bank, tck, tms, tdo, tdi } = self.map;
        self.pins.set_direction(bank, tck, Direction::Output)?;
        // clock rests low
        self.pins.set_level(bank, tck, false)?;
        self.pins.set_direction(bank, tms, Direction::Output)?;
        self.pins.set_direction(bank, tdo, Direction::Input)?;
        self.pins.set_direction(bank, tdi, Direction::Output)?;
        log::debug!("gpio cable ready: bank {} tck {} tms {} tdo {} tdi {}", bank, tck, tms, tdo, tdi);
        Ok(())
    }

    fn write_byte(&mut self, data: u8) -> Result<()> {
        self.set(Line::Tck, data & (1 << TCK_BIT) != 0)?;
        self.set(Line::Tms, data & (1 << TMS_BIT) != 0)?;
        self.set(Line::Tdi, data & (1 << TDI_BIT) != 0)
    }

    // The pin reads the true TDO level, so the parallel-port inversion of bit 7 does not apply.
    // There is no NSTATUS pin in the map, so bit 4 always reads low.
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let tdo = self.pins.read_level(self.map.bank, self.map.tdo)?;
        Ok(Some(if tdo { 1 << TDO_BIT } else { 0 }))
    }

    fn set_line(&mut self, line: Line, high: bool) -> Result<()> {
        if line == Line::Tdo {
            return Err(Error::new(ErrorKind::Direction, "TDO is an input"));
        }
        self.set(line, high)
    }

    fn read_line(&mut self, line: Line) -> Result<Option<bool>> {
        let level = self.pins.read_level(self.map.bank, self.map.pin(line))?;
        Ok(Some(level))
    }

    fn close(&mut self) -> Result<()> {
        log::debug!("releasing gpio cable");
        self.pins.release()
    }
}
