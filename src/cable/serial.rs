//! Implement the `Cable` trait for BitBlaster-style serial relay adapters.
//!
//! Every write is a single command byte carrying the output lines; a read is the poll byte
//! `0x7E` followed by a single response byte carrying the input lines.  The bit layout is fixed
//! by the adapter firmware.
use crate::cable::{Cable, Line, TDI_BIT, TDO_BIT};
use crate::error::{Error, ErrorKind, Result};

/// Command asking the adapter to report its input lines.
pub const POLL: u8 = 0x7e;

/// How many times to look for the response byte before giving up.
pub const RESPONSE_ATTEMPTS: usize = 100;

const COMMAND_BITS: u8 = 0x60;

/// Encode a register image into a command byte.
///
/// TDI goes to bit 0, TMS to bit 1, and TCK to bits 2 and 3.
pub fn encode(data: u8) -> u8 {
    ((data >> TDI_BIT) & 0x01) | (data & 0x02) | ((data << 2) & 0x04) | ((data << 3) & 0x08) | COMMAND_BITS
}

/// Decode a response byte into a register image: bit 0 is TDO, bit 1 is NSTATUS.
pub fn decode(response: u8) -> u8 {
    ((response << 7) & 0x80) | ((response << 3) & 0x10)
}

/// A byte-oriented channel to the relay adapter.
pub trait SerialChannel {
    fn write_byte(&mut self, byte: u8) -> Result<()>;
    /// Make one attempt at reading a byte.  `None` if nothing has arrived yet.
    fn poll_read_byte(&mut self) -> Result<Option<u8>>;
}

/// Serial relay cable.
pub struct Serial<C> {
    channel: C,
    // last register image sent, so single lines can be changed
    shadow: u8,
}

impl<C: SerialChannel> Serial<C> {
    pub fn new(channel: C) -> Self {
        Serial { channel, shadow: 0 }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }
}

impl<C: SerialChannel> Cable for Serial<C> {
    fn init(&mut self) -> Result<()> {
        log::debug!("serial relay cable ready");
        Ok(())
    }

    fn write_byte(&mut self, data: u8) -> Result<()> {
        self.shadow = data;
        self.channel.write_byte(encode(data))
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        self.channel.write_byte(POLL)?;
        for _ in 0..RESPONSE_ATTEMPTS {
            if let Some(response) = self.channel.poll_read_byte()? {
                return Ok(Some(decode(response)));
            }
        }
        Ok(None)
    }

    fn set_line(&mut self, line: Line, high: bool) -> Result<()> {
        if line == Line::Tdo {
            return Err(Error::new(ErrorKind::Direction, "TDO is an input"));
        }
        let data = if high {
            self.shadow | 1 << line.bit()
        } else {
            self.shadow & !(1 << line.bit())
        };
        self.write_byte(data)
    }

    fn read_line(&mut self, line: Line) -> Result<Option<bool>> {
        if line != Line::Tdo {
            return Ok(Some(self.shadow & 1 << line.bit() != 0));
        }
        Ok(self.read_byte()?.map(|data| data & 1 << TDO_BIT != 0))
    }
}

/// A `SerialChannel` over any byte stream, typically a tty opened non-blocking.
#[cfg(feature = "std")]
pub struct IoChannel<T> {
    io: T,
}

#[cfg(feature = "std")]
impl<T: std::io::Read + std::io::Write> IoChannel<T> {
    pub fn new(io: T) -> Self {
        IoChannel { io }
    }

    pub fn into_inner(self) -> T {
        self.io
    }
}

#[cfg(feature = "std")]
impl<T: std::io::Read + std::io::Write> SerialChannel for IoChannel<T> {
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.io
            .write_all(&[byte])
            .and_then(|_| self.io.flush())
            .map_err(|_| Error::new(ErrorKind::Serial, "write failed"))
    }

    fn poll_read_byte(&mut self) -> Result<Option<u8>> {
        use std::io::ErrorKind as Io;

        let mut buf = [0u8; 1];
        match self.io.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(e) if matches!(e.kind(), Io::WouldBlock | Io::Interrupted | Io::TimedOut) => Ok(None),
            Err(_) => Err(Error::new(ErrorKind::Serial, "read failed")),
        }
    }
}
