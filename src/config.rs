//! Settings read by the transport: verbosity, which cable to use, and where its pins are.
use alloc::string::String;

use crate::cable::gpio::{Gpio, PinController, PinMap};
use crate::cable::serial::{Serial, SerialChannel};
use crate::cable::{AnyCable, CableKind};
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Print exports and frequency changes.
    pub verbose: bool,
    /// Serial port of a relay adapter.  Without one the pins are toggled directly.
    pub serial_port: Option<String>,
    /// Clock pin of the direct cable, optionally with the bank in the hundreds.
    pub clock_pin: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            verbose: false,
            serial_port: None,
            clock_pin: 811,
        }
    }
}

impl Config {
    pub fn cable_kind(&self) -> CableKind {
        match self.serial_port {
            Some(_) => CableKind::Serial,
            None => CableKind::Direct,
        }
    }

    pub fn pin_map(&self) -> PinMap {
        PinMap::from_clock_pin(self.clock_pin)
    }

    /// Build the selected cable.  Only the opener for the selected kind is called.
    pub fn open_cable<P, C>(
        &self,
        pins: impl FnOnce(PinMap) -> Result<P>,
        channel: impl FnOnce(&str) -> Result<C>,
    ) -> Result<AnyCable<P, C>>
    where
        P: PinController,
        C: SerialChannel,
    {
        match &self.serial_port {
            Some(port) => {
                log::debug!("using serial relay on {}", port);
                Ok(AnyCable::Serial(Serial::new(channel(port)?)))
            }
            None => {
                let map = self.pin_map();
                log::debug!("using direct gpio, clock pin {}", self.clock_pin);
                Ok(AnyCable::Direct(Gpio::new(pins(map)?, map)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cable::gpio::tests::MockPins;
    use crate::cable::serial::tests::MockChannel;
    use alloc::string::ToString;

    #[test]
    fn serial_port_selects_the_relay() {
        let mut config = Config::default();
        assert_eq!(config.cable_kind(), CableKind::Direct);
        assert_eq!(config.pin_map(), PinMap::from_clock_pin(811));

        config.serial_port = Some("/dev/ttyS0".to_string());
        assert_eq!(config.cable_kind(), CableKind::Serial);
        let cable = config
            .open_cable(
                |_| -> Result<MockPins> { panic!("pins opened for the serial relay") },
                |port| {
                    assert_eq!(port, "/dev/ttyS0");
                    Ok(MockChannel::default())
                },
            )
            .unwrap();
        assert_eq!(cable.kind(), CableKind::Serial);
    }

    #[test]
    fn direct_cable_gets_the_derived_map() {
        let config = Config { clock_pin: 920, ..Config::default() };
        let cable = config
            .open_cable(
                |map| {
                    assert_eq!((map.bank, map.tck, map.tdi), (9, 20, 23));
                    Ok(MockPins::default())
                },
                |_| -> Result<MockChannel> { panic!("serial opened for gpio") },
            )
            .unwrap();
        assert_eq!(cable.kind(), CableKind::Direct);
    }
}
