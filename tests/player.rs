use embedded_hal::delay::DelayNs;
use jam_vector_io::cable::gpio::{Direction, PinController, PinMap};
use jam_vector_io::cable::serial::SerialChannel;
use jam_vector_io::{CableKind, Config, Error, ErrorKind, Result, SignalCatalog, Transport};

/// A board whose TDO pin follows TDI, as if the chain were a plain wire.
#[derive(Default)]
struct Loopback {
    levels: std::collections::HashMap<u32, bool>,
    outputs: Vec<u32>,
    rising_edges: usize,
}

impl PinController for Loopback {
    fn set_direction(&mut self, _bank: u32, pin: u32, direction: Direction) -> Result<()> {
        if direction == Direction::Output {
            self.outputs.push(pin);
        }
        Ok(())
    }

    fn set_level(&mut self, _bank: u32, pin: u32, high: bool) -> Result<()> {
        let map = PinMap::from_clock_pin(811);
        if pin == map.tck && high && !self.levels.get(&pin).copied().unwrap_or(false) {
            self.rising_edges += 1;
        }
        self.levels.insert(pin, high);
        Ok(())
    }

    fn read_level(&mut self, _bank: u32, pin: u32) -> Result<bool> {
        let map = PinMap::from_clock_pin(811);
        let pin = if pin == map.tdo { map.tdi } else { pin };
        Ok(self.levels.get(&pin).copied().unwrap_or(false))
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

struct Unused;

impl SerialChannel for Unused {
    fn write_byte(&mut self, _byte: u8) -> Result<()> {
        unreachable!()
    }

    fn poll_read_byte(&mut self) -> Result<Option<u8>> {
        unreachable!()
    }
}

fn logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn signal_names_bind_to_caller_indices() {
    logger();
    let catalog = SignalCatalog::new(&[("TCK", 0), ("TMS", 1), ("TDI", 6), ("TDO", 7)]);
    let cable = Config::default()
        .open_cable(|_| Ok(Loopback::default()), |_| Ok(Unused))
        .unwrap();
    let mut jtag = Transport::new(cable, NoDelay).with_catalog(catalog);

    assert_eq!(jtag.map_signals(&["TDI", "TDO", "TMS", "TCK"]), 4);
    let catalog = jtag.catalog();
    assert_eq!(catalog.index_of("TDI"), Some(0));
    assert_eq!(catalog.index_of("TDO"), Some(1));
    assert_eq!(catalog.index_of("TMS"), Some(2));
    assert_eq!(catalog.index_of("TCK"), Some(3));
}

#[test]
fn vector_round_trip_through_the_pins() {
    logger();
    let config = Config::default();
    assert_eq!(config.cable_kind(), CableKind::Direct);
    let cable = config
        .open_cable(|_| Ok(Loopback::default()), |_| Ok(Unused))
        .unwrap();
    let mut jtag = Transport::with_config(cable, NoDelay, &config);
    jtag.map_signals(&["tdi", "tdo"]);

    for level in [true, false, true] {
        let mut capture = [0u32];
        let matched = jtag
            .vector_io(2, &[0b01], &[level as u32], Some(&mut capture))
            .unwrap();
        assert_eq!(matched, 2);
        assert_eq!(capture, [(level as u32) << 1]);
    }
}

#[test]
fn shifting_bits_through_a_wire() {
    logger();
    let cable = Config::default()
        .open_cable(|_| Ok(Loopback::default()), |_| Ok(Unused))
        .unwrap();
    let mut jtag = Transport::new(cable, NoDelay);
    jtag.set_frequency(1_000_000).unwrap();

    let bits = [true, true, false, true, false, false, true];
    let read: Vec<bool> = bits
        .iter()
        .map(|&tdi| jtag.bit_transact(false, tdi, true).unwrap())
        .collect();
    assert_eq!(read, bits);

    match jtag.cable() {
        jam_vector_io::AnyCable::Direct(gpio) => {
            assert_eq!(gpio.pins().rising_edges, bits.len());
            assert_eq!(gpio.pins().outputs, [11, 12, 14]);
            assert_eq!(gpio.pins().levels.get(&11), Some(&false));
        }
        _ => panic!("expected the gpio cable"),
    }
}

#[test]
fn errors_from_the_pins_propagate() {
    struct Broken;

    impl PinController for Broken {
        fn set_direction(&mut self, _bank: u32, _pin: u32, _direction: Direction) -> Result<()> {
            Ok(())
        }

        fn set_level(&mut self, _bank: u32, _pin: u32, _high: bool) -> Result<()> {
            Ok(())
        }

        fn read_level(&mut self, _bank: u32, _pin: u32) -> Result<bool> {
            Err(Error::new(ErrorKind::Pin(None), "line sense failed"))
        }
    }

    logger();
    let cable = Config::default()
        .open_cable(|_| Ok(Broken), |_| Ok(Unused))
        .unwrap();
    let mut jtag = Transport::new(cable, NoDelay);
    #[cfg(not(feature = "slow-io"))]
    assert!(!jtag.bit_transact(false, false, false).unwrap());
    let err = jtag.bit_transact(false, false, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Pin(None));
}

#[test]
fn verbose_exports_and_messages_do_not_touch_the_cable() {
    logger();
    let config = Config { verbose: true, ..Config::default() };
    let cable = config
        .open_cable(|_| Ok(Loopback::default()), |_| Ok(Unused))
        .unwrap();
    let mut jtag = Transport::with_config(cable, NoDelay, &config);
    jtag.message("Device #1 IDCODE is 020B10DD");
    jtag.export_integer("CHECKSUM", 0x1234);
    jtag.export_boolean_array("IDCODE", &[0xdd, 0x10, 0x0b, 0x02], 32);
    assert!(jtag.set_frequency(-5).is_ok());
    jtag.delay(10);
    assert!(!jtag.is_initialized());
}
