//! Checked-in-debug, unchecked-in-release slice access for the per-cell kernels.
//!
//! ```rust
//! use sandfall_engine::fast;
//!
//! let cells = vec![0u8, 4, 2, 9];
//! assert_eq!(*fast!(cells, [3]), 9);
//!
//! let mut out = vec![0u32; 4];
//! fast!(out, [1] = 7);
//! assert_eq!(out[1], 7);
//! ```

/// Indexed read or write.
///
/// Debug builds index normally and panic with the usual message. Release builds use
/// `get_unchecked`/`get_unchecked_mut`, so callers must derive the index from grid
/// dimensions they have already bounds-checked.
#[macro_export]
macro_rules! fast {
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked($index) }
        }
    }};

    ($slice:expr, [$index:expr] = $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] = $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe {
                *$slice.get_unchecked_mut($index) = $val;
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn fast_reads_the_indexed_cell() {
        let row = vec![3u8, 1, 4, 1, 5];
        assert_eq!(*fast!(row, [2]), 4);
    }

    #[test]
    fn fast_writes_the_indexed_cell() {
        let mut row = vec![0u32; 5];
        fast!(row, [4] = 0xFF00_00FF);
        assert_eq!(row[4], 0xFF00_00FF);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn fast_still_bounds_checks_in_debug() {
        let row = vec![1u8, 2, 3];
        let _ = *fast!(row, [10]);
    }
}
