//! Packed bit vectors as handed over by the interpreter.  Signal `i` lives in word `i >> 5`,
//! bit `i & 31`.

/// Read signal `index`.  Signals past the end of the vector read as zero.
pub fn get(words: &[u32], index: usize) -> bool {
    words
        .get(index >> 5)
        .map_or(false, |w| w & (1 << (index & 0x1f)) != 0)
}

/// Write signal `index`, leaving every other bit alone.  Signals past the end are dropped.
pub fn set(words: &mut [u32], index: usize, value: bool) {
    if let Some(w) = words.get_mut(index >> 5) {
        let bit = 1 << (index & 0x1f);
        if value {
            *w |= bit;
        } else {
            *w &= !bit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addressing() {
        let mut words = [0u32; 2];
        set(&mut words, 0, true);
        set(&mut words, 33, true);
        assert_eq!(words, [0x1, 0x2]);
        assert!(get(&words, 33));
        assert!(!get(&words, 32));

        set(&mut words, 0, false);
        assert_eq!(words, [0x0, 0x2]);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut words = [u32::MAX];
        set(&mut words, 40, false);
        assert_eq!(words, [u32::MAX]);
        assert!(!get(&words, 40));
    }
}
