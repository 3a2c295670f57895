//! Overlap detection and clustering.
//!
//! Events are bucketed by day, every same-day pair is tested with
//! [`overlaps`], and the resulting overlap graph is reduced to its connected
//! components with a union-find. Components do not depend on the order the
//! events were supplied in, and two events in different clusters never
//! overlap.

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::error::Result;
use crate::event::{Event, EventRef};
use crate::time::{overlaps, TimeInterval};

/// An unordered pair of overlapping events, stored with `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct OverlapPair {
    pub first: EventRef,
    pub second: EventRef,
}

impl OverlapPair {
    pub fn new(a: EventRef, b: EventRef) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }
}

/// A connected component of the overlap graph. Members are in ascending
/// input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cluster {
    pub members: Vec<EventRef>,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Result of one detection pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapReport {
    /// One interval per input event, in input order.
    #[serde(skip)]
    pub intervals: Vec<TimeInterval>,
    /// Every overlapping pair, sorted.
    pub pairs: Vec<OverlapPair>,
    /// Every event in exactly one cluster, singletons included. Ordered by
    /// day, then earliest start, then lowest input index.
    pub clusters: Vec<Cluster>,
}

/// Find all overlapping pairs in `events` and group them into clusters.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidEvent`](crate::LayoutError::InvalidEvent)
/// for the first event with a malformed time, an empty or inverted range,
/// or a day outside the week.
pub fn detect_overlaps(events: &[Event]) -> Result<OverlapReport> {
    let intervals = events
        .iter()
        .enumerate()
        .map(|(i, event)| event.interval(i))
        .collect::<Result<Vec<_>>>()?;
    Ok(cluster_intervals(intervals))
}

/// Cluster already-validated intervals. Index `i` of `intervals` becomes
/// `EventRef(i)`.
pub fn cluster_intervals(intervals: Vec<TimeInterval>) -> OverlapReport {
    let mut by_day: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (i, iv) in intervals.iter().enumerate() {
        by_day.entry(iv.day).or_default().push(i);
    }

    let mut sets = UnionFind::new(intervals.len());
    let mut pairs = Vec::new();
    for bucket in by_day.values() {
        for (pos, &a) in bucket.iter().enumerate() {
            for &b in &bucket[pos + 1..] {
                if overlaps(&intervals[a], &intervals[b]) {
                    pairs.push(OverlapPair::new(EventRef(a), EventRef(b)));
                    sets.union(a, b);
                }
            }
        }
    }
    pairs.sort_unstable();

    let mut components: BTreeMap<usize, Vec<EventRef>> = BTreeMap::new();
    for i in 0..intervals.len() {
        components.entry(sets.find(i)).or_default().push(EventRef(i));
    }
    let mut clusters: Vec<Cluster> = components
        .into_values()
        .map(|members| Cluster { members })
        .collect();
    clusters.sort_by_key(|cluster| canonical_key(cluster, &intervals));

    debug!(
        "overlap pass: {} events, {} pairs, {} clusters",
        intervals.len(),
        pairs.len(),
        clusters.len()
    );

    OverlapReport {
        intervals,
        pairs,
        clusters,
    }
}

fn canonical_key(cluster: &Cluster, intervals: &[TimeInterval]) -> (u32, u32, usize) {
    let first = cluster.members[0];
    let day = intervals[first.index()].day;
    let earliest = cluster
        .members
        .iter()
        .map(|r| intervals[r.index()].start_minute)
        .min()
        .unwrap_or(0);
    (day, earliest, first.index())
}

/// Disjoint-set forest with union by rank and path halving.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}
