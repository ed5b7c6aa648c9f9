//! Implementations for the physical transports live here.  A transport moves the one-byte
//! virtual register image onto the JTAG lines and back, and should implement the `Cable` trait.
//!
//! The register layout follows the ByteBlaster cable:
//!
//! * tck (dclk)    = bit 0
//! * tms (nconfig) = bit 1
//! * nstatus       = bit 4
//! * tdi (data)    = bit 6
//! * tdo (condone) = bit 7
pub mod gpio;
pub mod serial;
#[cfg(feature = "ftdi")]
pub mod ftdi;

use crate::error::Result;

pub const TCK_BIT: u8 = 0;
pub const TMS_BIT: u8 = 1;
pub const NSTATUS_BIT: u8 = 4;
pub const TDI_BIT: u8 = 6;
pub const TDO_BIT: u8 = 7;

/// One of the four JTAG lines driven or sampled by `bit_transact`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    Tck,
    Tms,
    Tdi,
    Tdo,
}

impl Line {
    /// Position of the line within the virtual register image.
    pub fn bit(self) -> u8 {
        match self {
            Line::Tck => TCK_BIT,
            Line::Tms => TMS_BIT,
            Line::Tdi => TDI_BIT,
            Line::Tdo => TDO_BIT,
        }
    }
}

pub trait Cable {
    /// Put the hardware into a state where lines can be driven and sampled.  Called once by the
    /// transport before the first access.
    fn init(&mut self) -> Result<()>;
    /// Drive the output lines from a register image.  Bits without an output line are ignored.
    fn write_byte(&mut self, data: u8) -> Result<()>;
    /// Sample the input lines into a register image.  `None` means the hardware did not answer.
    fn read_byte(&mut self) -> Result<Option<u8>>;
    /// Drive a single line.
    fn set_line(&mut self, line: Line, high: bool) -> Result<()>;
    /// Sample a single line.  `None` means the hardware did not answer.
    fn read_line(&mut self, line: Line) -> Result<Option<bool>>;
    /// Release the hardware.  The transport calls `init` again before any further access.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T: Cable + ?Sized> Cable for alloc::boxed::Box<T> {
    fn init(&mut self) -> Result<()> {
        (**self).init()
    }

    fn write_byte(&mut self, data: u8) -> Result<()> {
        (**self).write_byte(data)
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        (**self).read_byte()
    }

    fn set_line(&mut self, line: Line, high: bool) -> Result<()> {
        (**self).set_line(line, high)
    }

    fn read_line(&mut self, line: Line) -> Result<Option<bool>> {
        (**self).read_line(line)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// Which of the two transports a configuration selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CableKind {
    Direct,
    Serial,
}

/// A cable chosen at runtime: direct pin toggling or the serial relay.
pub enum AnyCable<P, C> {
    Direct(gpio::Gpio<P>),
    Serial(serial::Serial<C>),
}

impl<P, C> AnyCable<P, C> {
    pub fn kind(&self) -> CableKind {
        match self {
            AnyCable::Direct(_) => CableKind::Direct,
            AnyCable::Serial(_) => CableKind::Serial,
        }
    }
}

impl<P: gpio::PinController, C: serial::SerialChannel> Cable for AnyCable<P, C> {
    fn init(&mut self) -> Result<()> {
        match self {
            AnyCable::Direct(c) => c.init(),
            AnyCable::Serial(c) => c.init(),
        }
    }

    fn write_byte(&mut self, data: u8) -> Result<()> {
        match self {
            AnyCable::Direct(c) => c.write_byte(data),
            AnyCable::Serial(c) => c.write_byte(data),
        }
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        match self {
            AnyCable::Direct(c) => c.read_byte(),
            AnyCable::Serial(c) => c.read_byte(),
        }
    }

    fn set_line(&mut self, line: Line, high: bool) -> Result<()> {
        match self {
            AnyCable::Direct(c) => c.set_line(line, high),
            AnyCable::Serial(c) => c.set_line(line, high),
        }
    }

    fn read_line(&mut self, line: Line) -> Result<Option<bool>> {
        match self {
            AnyCable::Direct(c) => c.read_line(line),
            AnyCable::Serial(c) => c.read_line(line),
        }
    }

    fn close(&mut self) -> Result<()> {
        match self {
            AnyCable::Direct(c) => c.close(),
            AnyCable::Serial(c) => c.close(),
        }
    }
}
