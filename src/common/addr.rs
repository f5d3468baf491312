//! Cache-line address decomposition.
//!
//! Every topology tracks memory at 64-byte line granularity. This module
//! provides the line constants and the iterator that splits an arbitrary
//! byte-ranged access into the aligned lines it touches.

/// Fixed cache line size in bytes, shared by every modeled chip.
pub const LINE_SIZE: u64 = 64;

/// Log2 of [`LINE_SIZE`]; a line tag is the address shifted right by this.
pub const LINE_SHIFT: u32 = 6;

/// Mask clearing the intra-line offset bits of an address.
const LINE_MASK: u64 = !(LINE_SIZE - 1);

/// Iterator over the aligned line base addresses touched by a byte range.
///
/// Produced by [`line_span`]; see there for the exact bounds.
#[derive(Clone, Copy, Debug)]
pub struct LineSpan {
    next: u64,
    last: u64,
    done: bool,
}

/// Returns the aligned lines covered by an access of `size` bytes at `addr`.
///
/// The span runs from the line containing `addr` through the line containing
/// `addr + size`, inclusive. An access that stays within one line yields a
/// single base address; a straddling access yields one address per touched
/// line. If `addr + size` wraps below `addr` the span is empty, matching the
/// behavior of a bounds-checked loop over the raw addresses.
#[must_use]
pub const fn line_span(addr: u64, size: u64) -> LineSpan {
    let first = addr & LINE_MASK;
    let last = addr.wrapping_add(size) & LINE_MASK;
    LineSpan {
        next: first,
        last,
        done: last < first,
    }
}

impl Iterator for LineSpan {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.done {
            return None;
        }
        let line = self.next;
        if line == self.last {
            self.done = true;
        } else {
            self.next = line + LINE_SIZE;
        }
        Some(line)
    }
}
