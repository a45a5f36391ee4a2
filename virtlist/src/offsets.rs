//! Prefix-sum table of item offsets for variable-height lists.

/// Slot `k` holds the total height of items `[0, k)`.
///
/// The backing storage is resized explicitly: it doubles when too small and
/// shrinks to the exact size once it is at least twice what is needed.
#[derive(Debug, Clone, Default)]
pub struct OffsetTable {
    slots: Vec<u32>,
}

impl OffsetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocated length of the table.
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, index: usize) -> u32 {
        self.slots.get(index).copied().unwrap_or(0)
    }

    /// Make room for `needed` slots, preserving the first `keep` of them.
    pub fn reallocate(&mut self, needed: usize, keep: usize) {
        let allocated = self.slots.len();
        let new_len = if allocated < needed {
            needed.max(allocated * 2)
        } else if allocated >= 2 * needed {
            needed
        } else {
            return;
        };
        let keep = keep.min(allocated).min(new_len);
        let mut slots = vec![0; new_len];
        slots[..keep].copy_from_slice(&self.slots[..keep]);
        self.slots = slots;
    }

    /// Rewrite slots `from + 1 ..= from + heights.len()` from the heights of
    /// items `from..`. Slot `from` must already be correct.
    pub fn rebuild_from(&mut self, from: usize, heights: impl IntoIterator<Item = u32>) {
        let mut offset = self.get(from);
        for (slot, height) in self.slots.iter_mut().skip(from + 1).zip(heights) {
            offset = offset.saturating_add(height);
            *slot = offset;
        }
    }

    /// First index `k` in `[0, len)` with `table[k] >= offset`, or `len`.
    pub fn lower_bound(&self, offset: u32, len: usize) -> usize {
        let len = len.min(self.slots.len());
        self.slots[..len].partition_point(|&slot| slot < offset)
    }
}
