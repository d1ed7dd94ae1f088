//! The inventory capability and a slot-array implementation.

use belt_core::{ItemKind, ItemStack, MAX_STACK};

/// A container items can be moved in and out of.
///
/// Both mutating calls take a `simulate` flag.  With `simulate = true` the
/// call returns the count that *would* move and leaves the inventory
/// untouched; callers are expected to simulate and then commit with the
/// simulated count.
///
/// # Example
///
/// ```rust,ignore
/// let want = ItemStack::new(kind, 16);
/// if inv.insert(&want, true) == want.count {
///     inv.insert(&want, false);
/// }
/// ```
pub trait Inventory {
    /// Insert up to `stack.count` items of `stack.kind`; returns how many
    /// were (or would be) accepted.
    fn insert(&mut self, stack: &ItemStack, simulate: bool) -> u32;

    /// Remove up to `stack.count` items of `stack.kind`; returns how many
    /// were (or would be) removed.
    fn extract(&mut self, stack: &ItemStack, simulate: bool) -> u32;

    fn slot_count(&self) -> usize;

    /// Contents of slot `slot`.  Out-of-range slots read as empty.
    fn stack_in_slot(&self, slot: usize) -> ItemStack;
}

// ── SlotInventory ─────────────────────────────────────────────────────────────

/// A fixed number of slots, each holding one stack of at most `slot_limit`.
///
/// Insertion first tops up slots already holding the same kind, then fills
/// empty slots in order.  Extraction drains matching slots in order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotInventory {
    slots: Vec<ItemStack>,
    slot_limit: u32,
}

impl SlotInventory {
    /// `slots` empty slots holding up to [`MAX_STACK`] each.
    pub fn new(slots: usize) -> Self {
        Self::with_slot_limit(slots, MAX_STACK)
    }

    pub fn with_slot_limit(slots: usize, slot_limit: u32) -> Self {
        Self {
            slots: vec![ItemStack::EMPTY; slots],
            slot_limit,
        }
    }

    /// Pre-filled slots.  Stacks above the slot limit are clamped.
    pub fn from_stacks(stacks: impl IntoIterator<Item = ItemStack>) -> Self {
        let slots = stacks
            .into_iter()
            .map(|s| if s.is_empty() { ItemStack::EMPTY } else { s.with_count(s.count.min(MAX_STACK)) })
            .collect();
        Self {
            slots,
            slot_limit: MAX_STACK,
        }
    }

    #[inline]
    pub fn slot_limit(&self) -> u32 {
        self.slot_limit
    }

    /// Overwrite one slot.  Returns `false` if `slot` is out of range.
    pub fn set_slot(&mut self, slot: usize, stack: ItemStack) -> bool {
        match self.slots.get_mut(slot) {
            Some(s) => {
                *s = if stack.is_empty() {
                    ItemStack::EMPTY
                } else {
                    stack.with_count(stack.count.min(self.slot_limit))
                };
                true
            }
            None => false,
        }
    }

    /// Total items across all slots.
    pub fn total_count(&self) -> u64 {
        self.slots.iter().map(|s| s.count as u64).sum()
    }

    /// Items of one kind across all slots.
    pub fn count_of(&self, kind: ItemKind) -> u64 {
        self.slots
            .iter()
            .filter(|s| !s.is_empty() && s.kind == kind)
            .map(|s| s.count as u64)
            .sum()
    }

    /// Largest count of `kind` that could still be inserted.
    pub fn room_for(&self, kind: ItemKind) -> u64 {
        self.slots
            .iter()
            .map(|s| {
                if s.is_empty() {
                    self.slot_limit as u64
                } else if s.kind == kind {
                    self.slot_limit.saturating_sub(s.count) as u64
                } else {
                    0
                }
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(ItemStack::is_empty)
    }

    fn accept_into(&mut self, stack: &ItemStack, simulate: bool) -> u32 {
        let mut remaining = stack.count;
        let limit = self.slot_limit;

        // Top up matching stacks before opening new slots.
        for merging in [true, false] {
            for slot in self.slots.iter_mut() {
                if remaining == 0 {
                    return stack.count;
                }
                let fits = match (merging, slot.is_empty()) {
                    (true, false) if slot.kind == stack.kind => limit.saturating_sub(slot.count),
                    (false, true) => limit,
                    _ => continue,
                };
                let moved = fits.min(remaining);
                if moved == 0 {
                    continue;
                }
                if !simulate {
                    *slot = if slot.is_empty() {
                        ItemStack::new(stack.kind, moved)
                    } else {
                        slot.with_count(slot.count + moved)
                    };
                }
                remaining -= moved;
            }
        }
        stack.count - remaining
    }
}

impl Inventory for SlotInventory {
    fn insert(&mut self, stack: &ItemStack, simulate: bool) -> u32 {
        if stack.is_empty() {
            return 0;
        }
        self.accept_into(stack, simulate)
    }

    fn extract(&mut self, stack: &ItemStack, simulate: bool) -> u32 {
        if stack.is_empty() {
            return 0;
        }
        let mut remaining = stack.count;
        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.is_empty() || slot.kind != stack.kind {
                continue;
            }
            let moved = slot.count.min(remaining);
            if !simulate {
                let left = slot.count - moved;
                *slot = if left == 0 { ItemStack::EMPTY } else { slot.with_count(left) };
            }
            remaining -= moved;
        }
        stack.count - remaining
    }

    #[inline]
    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn stack_in_slot(&self, slot: usize) -> ItemStack {
        self.slots.get(slot).copied().unwrap_or(ItemStack::EMPTY)
    }
}
