//! A `SerialChannel` for relay adapters attached through an FTDI USB-serial bridge.
use crate::cable::serial::SerialChannel;
use crate::error::{Error, ErrorKind, Result};

use libftd2xx::{Ftdi, FtdiCommon};

pub struct FtdiChannel {
    ft: Ftdi,
}

impl FtdiChannel {
    /// Open the bridge.  `description` is the value passed to `Ftdi::with_description` to
    /// select which hardware to use.
    pub fn new(description: &str, baud: u32) -> Result<Self> {
        let mut ft = Ftdi::with_description(description)
            .map_err(|_| Error::new(ErrorKind::Serial, "no FTDI device with this description"))?;
        ft.set_baud_rate(baud)
            .map_err(|_| Error::new(ErrorKind::Serial, "set_baud_rate"))?;
        ft.purge_all().map_err(|_| Error::new(ErrorKind::Serial, "purge"))?;
        log::debug!("opened FTDI serial bridge {:?} at {} baud", description, baud);
        Ok(Self { ft })
    }
}

impl SerialChannel for FtdiChannel {
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        match self.ft.write(&[byte]) {
            Ok(1) => Ok(()),
            _ => Err(Error::new(ErrorKind::Serial, "send")),
        }
    }

    fn poll_read_byte(&mut self) -> Result<Option<u8>> {
        // Only read what is already queued, so a missing reply doesn't block
        let queued = self
            .ft
            .queue_status()
            .map_err(|_| Error::new(ErrorKind::Serial, "queue_status"))?;
        if queued == 0 {
            return Ok(None);
        }
        let mut buf = [0u8; 1];
        match self.ft.read(&mut buf) {
            Ok(1) => Ok(Some(buf[0])),
            Ok(_) => Ok(None),
            Err(_) => Err(Error::new(ErrorKind::Serial, "recv")),
        }
    }
}
