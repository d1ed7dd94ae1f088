//! Item payloads and extraction filters.

use crate::ItemKind;

/// Largest count a single extraction may move.
pub const MAX_STACK: u32 = 64;

/// A homogeneous stack of items.  A count of zero is the empty stack.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub kind: ItemKind,
    pub count: u32,
}

impl ItemStack {
    pub const EMPTY: ItemStack = ItemStack {
        kind: ItemKind::INVALID,
        count: 0,
    };

    #[inline]
    pub fn new(kind: ItemKind, count: u32) -> Self {
        Self { kind, count }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0 || !self.kind.is_valid()
    }

    /// Same kind, different count.
    #[inline]
    pub fn with_count(self, count: u32) -> Self {
        Self { count, ..self }
    }
}

impl std::fmt::Display for ItemStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.count, self.kind.0)
    }
}

/// Serialisable extraction filter descriptor.
///
/// A belt without a filter accepts everything.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemFilter {
    /// Only this kind.
    Kind(ItemKind),
    /// Any of the listed kinds.
    AnyOf(Vec<ItemKind>),
    /// Everything except the listed kinds.
    NoneOf(Vec<ItemKind>),
}

impl ItemFilter {
    pub fn matches(&self, stack: &ItemStack) -> bool {
        match self {
            ItemFilter::Kind(kind) => stack.kind == *kind,
            ItemFilter::AnyOf(kinds) => kinds.contains(&stack.kind),
            ItemFilter::NoneOf(kinds) => !kinds.contains(&stack.kind),
        }
    }

    /// Apply an optional filter; `None` matches all.
    #[inline]
    pub fn accepts(filter: Option<&ItemFilter>, stack: &ItemStack) -> bool {
        filter.is_none_or(|f| f.matches(stack))
    }
}
