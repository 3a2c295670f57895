//! Horizontal slot assignment within a day column.
//!
//! Each cluster of `k` events splits its column into `k` equal slots. Members
//! take slots in order of start time, ties broken by input order.

use std::collections::BTreeMap;

use log::trace;
use serde::Serialize;

use crate::event::EventRef;
use crate::overlap::Cluster;
use crate::time::TimeInterval;

/// Where an event sits within its day column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAssignment {
    /// 0-based slot, counted from the left edge of the column.
    pub slot_index: usize,
    /// Number of equal slots the column is divided into.
    pub slot_count: usize,
}

impl SlotAssignment {
    /// The whole column.
    pub const FULL: SlotAssignment = SlotAssignment {
        slot_index: 0,
        slot_count: 1,
    };
}

/// Assign a slot to every member of every cluster.
///
/// `intervals` is indexed by [`EventRef`] and supplies the start times used
/// to order members.
pub fn assign_slots(
    clusters: &[Cluster],
    intervals: &[TimeInterval],
) -> BTreeMap<EventRef, SlotAssignment> {
    let mut slots = BTreeMap::new();
    for cluster in clusters {
        let mut members = cluster.members.clone();
        members.sort_by_key(|r| (intervals[r.index()].start_minute, r.index()));

        let slot_count = members.len();
        for (slot_index, member) in members.into_iter().enumerate() {
            slots.insert(
                member,
                SlotAssignment {
                    slot_index,
                    slot_count,
                },
            );
        }
        if slot_count > 1 {
            trace!("cluster {:?} split into {slot_count} slots", cluster.members);
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start_minute: u32, end_minute: u32) -> TimeInterval {
        TimeInterval {
            day: 1,
            start_minute,
            end_minute,
        }
    }

    fn cluster(indices: &[usize]) -> Cluster {
        Cluster {
            members: indices.iter().copied().map(EventRef).collect(),
        }
    }

    #[test]
    fn test_singleton_gets_full_column() {
        let slots = assign_slots(&[cluster(&[0])], &[iv(540, 600)]);
        assert_eq!(slots[&EventRef(0)], SlotAssignment::FULL);
    }

    #[test]
    fn test_members_ordered_by_start_time() {
        // Input order is 0, 1, 2 but start order is 2, 0, 1.
        let intervals = [iv(600, 660), iv(630, 700), iv(540, 620)];
        let slots = assign_slots(&[cluster(&[0, 1, 2])], &intervals);
        assert_eq!(slots[&EventRef(2)].slot_index, 0);
        assert_eq!(slots[&EventRef(0)].slot_index, 1);
        assert_eq!(slots[&EventRef(1)].slot_index, 2);
        assert!(slots.values().all(|s| s.slot_count == 3));
    }

    #[test]
    fn test_equal_starts_break_ties_by_input_order() {
        let intervals = [iv(540, 600), iv(540, 660)];
        let slots = assign_slots(&[cluster(&[0, 1])], &intervals);
        assert_eq!(slots[&EventRef(0)].slot_index, 0);
        assert_eq!(slots[&EventRef(1)].slot_index, 1);
    }

    #[test]
    fn test_detected_clusters_assign_every_event() {
        let intervals = vec![
            iv(540, 600),
            TimeInterval { day: 2, ..iv(540, 600) },
            iv(570, 630),
            iv(700, 760),
        ];
        let report = crate::overlap::cluster_intervals(intervals);
        let slots = assign_slots(&report.clusters, &report.intervals);
        let keys: Vec<_> = slots.keys().copied().collect();
        assert_eq!(keys, (0..4).map(EventRef).collect::<Vec<_>>());
        assert_eq!(slots[&EventRef(1)], SlotAssignment::FULL);
        assert_eq!(slots[&EventRef(2)].slot_count, 2);
    }

    #[test]
    fn test_every_event_assigned_once() {
        let intervals = [iv(540, 600), iv(560, 620), iv(700, 760)];
        let slots = assign_slots(&[cluster(&[0, 1]), cluster(&[2])], &intervals);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[&EventRef(2)], SlotAssignment::FULL);
    }
}
