//! Fixed-width byte-order conversion
//!
//! The emulated console is big-endian while the host is little-endian,
//! so callers may request a byte swap on reads and writes. Only the
//! fixed integer widths 2, 4, and 8 are reversed; any other size is
//! left untouched, so callers requesting a swap for other sizes get
//! their bytes back unchanged.

/// Reverses the buffer in place when its length is a swappable width
pub fn swap_in_place(buffer: &mut [u8]) {
    match buffer.len() {
        2 | 4 | 8 => buffer.reverse(),
        _ => {}
    }
}

/// Returns a swapped copy, leaving the input untouched
pub fn swapped(data: &[u8]) -> Vec<u8> {
    let mut copy = data.to_vec();
    swap_in_place(&mut copy);
    copy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_u16() {
        let mut buffer = [0xAB, 0xCD];
        swap_in_place(&mut buffer);
        assert_eq!(buffer, [0xCD, 0xAB]);
    }

    #[test]
    fn test_swap_u32() {
        let mut buffer = [0x01, 0x02, 0x03, 0x04];
        swap_in_place(&mut buffer);
        assert_eq!(buffer, [0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_swap_u64() {
        let mut buffer = [1, 2, 3, 4, 5, 6, 7, 8];
        swap_in_place(&mut buffer);
        assert_eq!(buffer, [8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_other_sizes_untouched() {
        for size in [0usize, 1, 3, 5, 6, 7, 9, 16] {
            let original: Vec<u8> = (0..size as u8).collect();
            assert_eq!(swapped(&original), original, "size {}", size);
        }
    }

    #[test]
    fn test_involution() {
        let original = vec![0xDE, 0xAD, 0xBE, 0xEF];
        assert_eq!(swapped(&swapped(&original)), original);
    }

    #[test]
    fn test_swapped_leaves_input_alone() {
        let original = vec![0x01, 0x02, 0x03, 0x04];
        let _ = swapped(&original);
        assert_eq!(original, vec![0x01, 0x02, 0x03, 0x04]);
    }
}
