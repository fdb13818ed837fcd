//! Word-parallel helpers for padded 64-bit rows.
//!
//! Every occupancy row is one `u64`: bit 0 and the bit after the last usable
//! cell are padding samples from the neighboring segment, so shifting a row by
//! one cell never pulls in bits from another row.

/// Mask with the low `len` bits set. `len` may be 64.
#[inline]
pub const fn low_mask(len: u32) -> u64 {
    if len >= 64 {
        u64::MAX
    } else {
        (1u64 << len) - 1
    }
}

/// Mask of `len` set bits starting at bit `start`.
#[inline]
pub const fn run_mask(start: u32, len: u32) -> u64 {
    low_mask(len) << start
}

/// Index of the lowest set bit, if any.
#[inline]
pub const fn lowest_set(row: u64) -> Option<u32> {
    if row == 0 {
        None
    } else {
        Some(row.trailing_zeros())
    }
}

/// Length of the run of set bits beginning at `start`.
#[inline]
pub const fn run_length(row: u64, start: u32) -> u32 {
    (!(row >> start)).trailing_zeros()
}

/// Cells in `row` whose neighbor one cell toward -axis is not in `occupied`.
#[inline]
pub const fn exposed_neg(row: u64, occupied: u64) -> u64 {
    row & !(occupied << 1)
}

/// Cells in `row` whose neighbor one cell toward +axis is not in `occupied`.
#[inline]
pub const fn exposed_pos(row: u64, occupied: u64) -> u64 {
    row & !(occupied >> 1)
}

/// Convert a padded row into usable coordinates, keeping `cells` bits.
///
/// Padded bit `i + 1` becomes bit `i`; both padding bits are discarded.
#[inline]
pub const fn unpad(row: u64, cells: u32) -> u64 {
    (row >> 1) & low_mask(cells)
}

/// Iterator over the indices of set bits, lowest first.
#[derive(Clone, Copy, Debug)]
pub struct SetBits(pub u64);

impl Iterator for SetBits {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        let bit = lowest_set(self.0)?;
        self.0 &= self.0 - 1;
        Some(bit)
    }
}
