//! One stack in flight.

use belt_core::{ItemStack, TransitId};

/// An item stack somewhere between source (`progress = 0`) and sink (`1`).
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitItem {
    /// Random tag for client-side interpolation.  Not unique.
    pub id: TransitId,
    pub progress: f32,
    pub payload: ItemStack,
}

impl TransitItem {
    #[inline]
    pub fn new(id: TransitId, payload: ItemStack) -> Self {
        Self { id, progress: 0.0, payload }
    }
}
