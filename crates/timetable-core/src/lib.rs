//! # timetable-core
//!
//! Deterministic layout for weekly schedule grids.
//!
//! Events are placed in day columns at pixel positions derived from their
//! time of day. Events that overlap in time are grouped into clusters and
//! shown side by side, each cluster splitting its column into equal slots.
//!
//! ## Modules
//!
//! - [`time`] — `"HH:MM"` lexing, [`TimeInterval`], the overlap predicate
//! - [`event`] — [`Event`] records and references into the input
//! - [`config`] — Grid geometry, defaults and validation
//! - [`overlap`] — Overlap pairs and connected-component clusters
//! - [`slots`] — Slot assignment within a day column
//! - [`geometry`] — Pixel rectangles
//! - [`engine`] — The [`layout`] entry point
//! - [`groups`] — Course/section groups → flat events
//! - [`error`] — Error types

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod geometry;
pub mod groups;
pub mod overlap;
pub mod slots;
pub mod time;

pub use config::{resolve_configs, Configs, PartialConfigs};
pub use engine::{layout, validate_events, LaidOutEvent};
pub use error::LayoutError;
pub use event::{Event, EventRef, EventSelectHandler};
pub use geometry::{to_rect, Rect};
pub use groups::{expand_groups, EventGroup, ExpandedSchedule, SectionTimes};
pub use overlap::{cluster_intervals, detect_overlaps, Cluster, OverlapPair, OverlapReport};
pub use slots::{assign_slots, SlotAssignment};
pub use time::{overlaps, TimeInterval};
