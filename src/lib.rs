//! This crate is the hardware side of a Jam/STAPL bytecode player.  The player decides what
//! happens on the JTAG chain; this crate moves the resulting signal levels onto a cable and
//! brings the sampled ones back.
//!
//! At the lowest level is the `Cable` trait, which moves a one-byte register image of the JTAG
//! lines.  Two cables exist: `cable::gpio::Gpio` toggles GPIO pins directly through a
//! `PinController` (with an adapter for embedded-hal pins), and `cable::serial::Serial` talks to a
//! BitBlaster-style relay adapter over a byte channel.  `AnyCable` picks one at runtime, which is
//! what `Config::open_cable` builds.
//!
//! On top of a cable sits the `Transport`, which is what the player calls:
//!
//! * `map_signals` binds the program's vector signal names to the cable's signals,
//! * `vector_io` applies a direction/data vector and captures the inputs,
//! * `bit_transact` clocks a single TMS/TDI bit and optionally samples TDO,
//! * `set_frequency` paces the clock.
//!
//! # Example
//! ```
//! use jam_vector_io::cable::serial::{Serial, SerialChannel};
//! use jam_vector_io::{Result, Transport};
//!
//! // A relay that always reports TDO high
//! struct Relay;
//!
//! impl SerialChannel for Relay {
//!     fn write_byte(&mut self, _byte: u8) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn poll_read_byte(&mut self) -> Result<Option<u8>> {
//!         Ok(Some(0x01))
//!     }
//! }
//!
//! struct NoDelay;
//!
//! impl embedded_hal::delay::DelayNs for NoDelay {
//!     fn delay_ns(&mut self, _ns: u32) {}
//! }
//!
//! let mut jtag = Transport::new(Serial::new(Relay), NoDelay);
//! assert_eq!(jtag.map_signals(&["TDI", "TDO"]), 2);
//!
//! let mut capture = [0u32];
//! jtag.vector_io(2, &[0b01], &[0b01], Some(&mut capture)).unwrap();
//! assert_eq!(capture, [0b10]);
//! assert!(jtag.bit_transact(false, true, true).unwrap());
//! ```

#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;

pub mod cable;
pub mod config;
pub mod error;
pub mod export;
pub mod signals;
pub mod timing;
pub mod transport;
pub mod vector;

pub use cable::{AnyCable, Cable, CableKind, Line};
pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use signals::SignalCatalog;
pub use timing::{ClockPacing, Timing};
pub use transport::Transport;
