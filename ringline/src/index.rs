//! # Wrap-Safe Cursor Arithmetic
//!
//! All modular index math for the ring lives here. A [`Ring`] knows the
//! number of slots `C`; cursors are plain positions in `[0, C)` and are only
//! ever moved through [`Ring::advance`].
//!
//! ```text
//!   distance(read, write) = (write - read) mod C
//!
//!   ┌───┬───┬───┬───┬───┬───┬───┬───┐
//!   │ d │ e │   │   │   │ a │ b │ c │      C = 8, used = 5
//!   └───┴───┴───┴───┴───┴───┴───┴───┘
//!             ▲           ▲
//!           write        read
//! ```
//!
//! A ring with zero slots belongs to a released buffer: every distance is 0
//! and every cursor stays at 0.

/// A physical position inside the backing storage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Cursor(usize);

impl Cursor {
    /// Start of the storage
    pub(crate) const ZERO: Cursor = Cursor(0);

    /// Index into the backing slice
    #[inline]
    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

/// Ring geometry: the number of slots cursors wrap around
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Ring {
    slots: usize,
}

impl Ring {
    pub(crate) const fn new(slots: usize) -> Self {
        Self { slots }
    }

    #[inline]
    pub(crate) const fn slots(&self) -> usize {
        self.slots
    }

    #[inline]
    fn wrap(&self, raw: usize) -> usize {
        raw.checked_rem(self.slots).unwrap_or(0)
    }

    /// Move `cursor` forward by `n` slots
    #[inline]
    pub(crate) fn advance(&self, cursor: Cursor, n: usize) -> Cursor {
        // n is bounded by the slot count, so `n % slots` keeps the sum from overflowing
        Cursor(self.wrap(cursor.0 + self.wrap(n)))
    }

    /// Number of slots walked going forward from `from` to `to`
    #[inline]
    pub(crate) fn distance(&self, from: Cursor, to: Cursor) -> usize {
        self.wrap(to.0 + self.slots - from.0)
    }

    /// Slots from `cursor` to the physical end of the storage
    #[inline]
    pub(crate) fn until_end(&self, cursor: Cursor) -> usize {
        self.slots - cursor.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_wraps() {
        let ring = Ring::new(8);
        let c = ring.advance(Cursor::ZERO, 6);
        assert_eq!(c.get(), 6);
        assert_eq!(ring.advance(c, 3).get(), 1);
        assert_eq!(ring.advance(c, 8).get(), 6);
    }

    #[test]
    fn test_distance_is_modular() {
        let ring = Ring::new(8);
        let read = ring.advance(Cursor::ZERO, 5);
        let write = ring.advance(Cursor::ZERO, 2);
        assert_eq!(ring.distance(read, write), 5);
        assert_eq!(ring.distance(write, read), 3);
        assert_eq!(ring.distance(read, read), 0);
    }

    #[test]
    fn test_until_end() {
        let ring = Ring::new(4);
        let c = ring.advance(Cursor::ZERO, 3);
        assert_eq!(ring.until_end(c), 1);
        assert_eq!(ring.until_end(ring.advance(c, 1)), 4);
    }

    #[test]
    fn test_zero_slot_ring_is_inert() {
        let ring = Ring::default();
        assert_eq!(ring.advance(Cursor::ZERO, 5), Cursor::ZERO);
        assert_eq!(ring.distance(Cursor::ZERO, Cursor::ZERO), 0);
    }
}
