//! Text of the verbose-only exports a program can publish.
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

const HEX_LINE_CHARS: usize = 72;
const HEX_LINE_BITS: usize = HEX_LINE_CHARS * 4;
const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

pub fn integer(key: &str, value: i64) -> String {
    format!("Export: key = \"{}\", value = {}", key, value)
}

/// Lines for a boolean array of `count` bits, packed LSB first into `data`.  Long arrays are
/// split into 72-digit lines, most significant line first.
pub fn boolean_array(key: &str, data: &[u8], count: usize) -> Vec<String> {
    if count <= HEX_LINE_BITS {
        let hex = hex(data, 0, count);
        return alloc::vec![format!("Export: key = \"{}\", {} bits, value = HEX {}", key, count, hex)];
    }

    let lines = (count + HEX_LINE_BITS - 1) / HEX_LINE_BITS;
    let mut out = Vec::with_capacity(lines + 1);
    out.push(format!("Export: key = \"{}\", {} bits, value = HEX", key, count));
    for line in 0..lines {
        if line < lines - 1 {
            let offset = count - (line + 1) * HEX_LINE_BITS;
            out.push(hex(data, offset, HEX_LINE_BITS));
        } else {
            out.push(hex(data, 0, count - (lines - 1) * HEX_LINE_BITS));
        }
    }
    out
}

fn bit(data: &[u8], i: usize) -> bool {
    data.get(i >> 3).map_or(false, |b| b & (1 << (i & 7)) != 0)
}

// `bits` bits starting at `offset`, most significant nibble first
fn hex(data: &[u8], offset: usize, bits: usize) -> String {
    let digits = (bits + 3) / 4;
    (0..digits)
        .rev()
        .map(|nibble| {
            let value = (0..4)
                .filter(|b| nibble * 4 + b < bits && bit(data, offset + nibble * 4 + b))
                .fold(0, |v, b| v | 1 << b);
            HEX_DIGITS[value] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_export() {
        assert_eq!(integer("USERCODE", -5), "Export: key = \"USERCODE\", value = -5");
    }

    #[test]
    fn short_array_on_one_line() {
        let lines = boolean_array("IDCODE", &[0x5a, 0x01], 9);
        assert_eq!(lines, ["Export: key = \"IDCODE\", 9 bits, value = HEX 15A"]);

        let lines = boolean_array("EMPTY", &[], 0);
        assert_eq!(lines, ["Export: key = \"EMPTY\", 0 bits, value = HEX "]);
    }

    #[test]
    fn long_array_splits_from_the_top() {
        let mut data = [0u8; 37];
        data[0] = 0x01;
        data[36] = 0x08; // bit 291
        let lines = boolean_array("DUMP", &data, 292);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Export: key = \"DUMP\", 292 bits, value = HEX");
        assert_eq!(lines[1].len(), 72);
        assert!(lines[1].starts_with('8'));
        assert!(lines[1][1..].chars().all(|c| c == '0'));
        assert_eq!(lines[2], "1");
    }
}
