//! The table of vector signal names the cable understands, and their binding to the signal
//! indices of the program being played.
//!
//! Several names can share a register bit (TCK and DCLK are the same wire), but each name is
//! bound to at most one caller signal per binding pass.
use alloc::vec::Vec;

use crate::cable::{NSTATUS_BIT, TCK_BIT, TDI_BIT, TDO_BIT, TMS_BIT};

/// Signal names of the ByteBlaster/BitBlaster cables, in matching order.
pub const DEFAULT_SIGNALS: &[(&str, u8)] = &[
    ("**TCK**", TCK_BIT),
    ("**TMS**", TMS_BIT),
    ("**TDI**", TDI_BIT),
    ("**TDO**", TDO_BIT),
    ("TCK", TCK_BIT),
    ("TMS", TMS_BIT),
    ("TDI", TDI_BIT),
    ("TDO", TDO_BIT),
    ("DCLK", TCK_BIT),
    ("NCONFIG", TMS_BIT),
    ("DATA", TDI_BIT),
    ("CONF_DONE", TDO_BIT),
    ("NSTATUS", NSTATUS_BIT),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signal {
    name: &'static str,
    bit: u8,
    index: Option<usize>,
}

impl Signal {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Position within the register image.
    pub fn bit(&self) -> u8 {
        self.bit
    }

    /// The caller signal index this entry is bound to, if any.
    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

#[derive(Clone, Debug)]
pub struct SignalCatalog {
    signals: Vec<Signal>,
}

impl SignalCatalog {
    pub fn new(table: &[(&'static str, u8)]) -> Self {
        let signals = table
            .iter()
            .map(|&(name, bit)| Signal { name, bit, index: None })
            .collect();
        Self { signals }
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Bind the caller's signal names, in order, to catalog entries.  Any previous binding is
    /// dropped first.  Names are compared ignoring ASCII case and must match in full.  Each name
    /// takes the first unbound entry that matches it; unknown names bind nothing.
    ///
    /// Returns the number of entries bound.
    pub fn bind<S: AsRef<str>>(&mut self, names: &[S]) -> usize {
        for signal in self.signals.iter_mut() {
            signal.index = None;
        }

        let mut matched = 0;
        for (index, name) in names.iter().enumerate() {
            let name = name.as_ref();
            let entry = self
                .signals
                .iter_mut()
                .find(|s| s.index.is_none() && s.name.eq_ignore_ascii_case(name));
            if let Some(signal) = entry {
                signal.index = Some(index);
                matched += 1;
            }
        }
        matched
    }

    /// The bound entries as (register bit, caller index) pairs, in catalog order.
    pub fn bound(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.signals
            .iter()
            .filter_map(|s| s.index.map(|index| (s.bit, index)))
    }

    /// Caller index bound to the first entry called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.signals.iter().find(|s| s.name == name).and_then(|s| s.index)
    }
}

impl Default for SignalCatalog {
    fn default() -> Self {
        SignalCatalog::new(DEFAULT_SIGNALS)
    }
}
