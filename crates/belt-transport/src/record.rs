//! Persisted form of a belt.

use belt_core::{BeltId, EndpointId, ItemFilter, ItemStack, TransitId};
use belt_path::Waypoint;

use crate::{Belt, BeltConfig, ConfigDelta, TransitItem, TransitQueue};

/// One queued item as stored: `(progress, payload, id)`.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordedItem {
    pub progress: f32,
    pub payload: ItemStack,
    pub id: TransitId,
}

/// Everything needed to restore a belt.
///
/// `sink = None` means the belt was idle; waypoints and filter are then
/// ignored on restore, but queued items are still kept so they can be
/// returned to the world.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeltRecord {
    pub source: EndpointId,
    pub sink: Option<EndpointId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub waypoints: Vec<Waypoint>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub filter: Option<ItemFilter>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<RecordedItem>,
}

impl Belt {
    pub fn to_record(&self) -> BeltRecord {
        let items = self
            .queue
            .iter()
            .map(|i| RecordedItem {
                progress: i.progress,
                payload:  i.payload,
                id:       i.id,
            })
            .collect();
        match &self.link {
            Some(link) => BeltRecord {
                source:    self.source,
                sink:      Some(link.sink),
                waypoints: link.waypoints.clone(),
                filter:    link.filter.clone(),
                items,
            },
            None => BeltRecord {
                source:    self.source,
                sink:      None,
                waypoints: Vec::new(),
                filter:    None,
                items,
            },
        }
    }

    /// Rebuild a belt from its record.
    ///
    /// The path is resolved on the first tick.  Items are re-sorted front to
    /// back and empty payloads are skipped.  A record whose sink equals its
    /// source restores as idle.
    pub fn from_record(id: BeltId, record: BeltRecord, seed: u64) -> Belt {
        let mut belt = Belt::new(id, record.source, seed);
        belt.queue = TransitQueue::from_unsorted(
            record
                .items
                .into_iter()
                .filter(|i| !i.payload.is_empty())
                .map(|i| TransitItem {
                    id:       i.id,
                    progress: i.progress,
                    payload:  i.payload,
                }),
        );

        match record.sink {
            Some(sink) if sink != record.source => {
                let link = BeltConfig {
                    source:    record.source,
                    sink,
                    waypoints: record.waypoints,
                    filter:    record.filter,
                };
                belt.delta = Some(link.delta());
                belt.link = Some(link);
                belt.needs_refresh = true;
            }
            Some(sink) => {
                log::info!("belt {id}: stored sink {sink} equals its source; restoring idle");
                belt.delta = Some(ConfigDelta {
                    own:       record.source,
                    sink:      None,
                    waypoints: Vec::new(),
                });
            }
            None => {}
        }
        belt.dirty = true;
        belt
    }
}
