//! Expansion of course/section groups into flat events.
//!
//! A group describes one course with any number of named sections, each
//! holding parallel arrays of meeting times. Layout only understands flat
//! [`Event`]s, so groups are expanded first and the grid is widened to fit
//! whatever they contain.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::Configs;
use crate::error::{LayoutError, Result};
use crate::event::Event;
use crate::time::MINUTES_PER_HOUR;

/// Meeting times of one section as parallel arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionTimes {
    pub start_times: Vec<String>,
    pub end_times: Vec<String>,
    pub days: Vec<u32>,
    /// Either empty or one entry per meeting.
    pub locations: Vec<String>,
}

impl SectionTimes {
    fn len(&self) -> usize {
        self.start_times.len()
    }

    fn consistent(&self) -> bool {
        let n = self.len();
        self.end_times.len() == n
            && self.days.len() == n
            && (self.locations.is_empty() || self.locations.len() == n)
    }
}

/// A course and its sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventGroup {
    pub course_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Keyed by section name; expanded in name order.
    pub sections: BTreeMap<String, SectionTimes>,
}

/// Flat events plus a grid large enough to hold them.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedSchedule {
    pub events: Vec<Event>,
    pub configs: Configs,
}

/// Expand `groups` into events and widen `configs` to fit them.
///
/// The grid only ever grows: start hour drops to the earliest start's hour,
/// end hour rises to the latest end rounded up to a whole hour, and the day
/// count rises to the largest day used.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidEvent`](crate::LayoutError::InvalidEvent)
/// when a section's arrays differ in length or a meeting has malformed
/// times. The reported index is the position in the expanded event list.
pub fn expand_groups(groups: &[EventGroup], configs: &Configs) -> Result<ExpandedSchedule> {
    let mut events = Vec::new();
    let mut widened = configs.clone();

    for (group_index, group) in groups.iter().enumerate() {
        for (section, times) in &group.sections {
            if !times.consistent() {
                return Err(LayoutError::InvalidEvent {
                    index: events.len(),
                    id: group.course_id.clone(),
                    field: "sections",
                    value: section.clone(),
                    reason: format!(
                        "parallel arrays differ in length (startTimes {}, endTimes {}, days {}, locations {})",
                        times.start_times.len(),
                        times.end_times.len(),
                        times.days.len(),
                        times.locations.len()
                    ),
                });
            }

            for i in 0..times.len() {
                let mut event = Event::new(
                    group.course_id.as_str(),
                    times.days[i],
                    times.start_times[i].as_str(),
                    times.end_times[i].as_str(),
                );
                event.title = group.title.clone();
                event.section = Some(section.clone());
                event.location = times.locations.get(i).cloned();
                event.group_index = Some(group_index);

                let interval = event.interval(events.len())?;
                widened.start_hour = widened
                    .start_hour
                    .min(interval.start_minute / MINUTES_PER_HOUR);
                widened.end_hour = widened
                    .end_hour
                    .max(interval.end_minute.div_ceil(MINUTES_PER_HOUR));
                widened.num_of_days = widened.num_of_days.max(interval.day);

                events.push(event);
            }
        }
    }

    Ok(ExpandedSchedule {
        events,
        configs: widened,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(meetings: &[(u32, &str, &str, &str)]) -> SectionTimes {
        SectionTimes {
            start_times: meetings.iter().map(|m| m.1.to_string()).collect(),
            end_times: meetings.iter().map(|m| m.2.to_string()).collect(),
            days: meetings.iter().map(|m| m.0).collect(),
            locations: meetings.iter().map(|m| m.3.to_string()).collect(),
        }
    }

    fn group(course_id: &str, sections: Vec<(&str, SectionTimes)>) -> EventGroup {
        EventGroup {
            course_id: course_id.to_string(),
            title: Some(format!("{course_id} title")),
            sections: sections
                .into_iter()
                .map(|(name, times)| (name.to_string(), times))
                .collect(),
        }
    }

    #[test]
    fn test_expands_every_meeting() {
        let groups = vec![
            group(
                "CS101",
                vec![
                    ("LEC", section(&[(1, "09:00", "10:20", "MC 1"), (3, "09:00", "10:20", "MC 1")])),
                    ("LAB", section(&[(2, "14:00", "16:00", "Lab 3")])),
                ],
            ),
            group("MATH200", vec![("LEC", section(&[(4, "11:30", "12:20", "DC 2")]))]),
        ];
        let expanded = expand_groups(&groups, &Configs::default()).unwrap();
        assert_eq!(expanded.events.len(), 4);

        // Sections expand in name order: LAB before LEC.
        let first = &expanded.events[0];
        assert_eq!(first.section.as_deref(), Some("LAB"));
        assert_eq!(first.location.as_deref(), Some("Lab 3"));
        assert_eq!(first.title.as_deref(), Some("CS101 title"));
        assert_eq!(first.group_index, Some(0));
        assert_eq!(expanded.events[3].group_index, Some(1));
        assert_eq!(expanded.events[3].label(), "MATH200 LEC");
    }

    #[test]
    fn test_grid_widened_to_fit() {
        let groups = vec![group(
            "LATE",
            vec![("A", section(&[(7, "07:15", "08:00", ""), (2, "19:00", "21:10", "")]))],
        )];
        let expanded = expand_groups(&groups, &Configs::default()).unwrap();
        assert_eq!(expanded.configs.start_hour, 7);
        assert_eq!(expanded.configs.end_hour, 22);
        assert_eq!(expanded.configs.num_of_days, 7);
    }

    #[test]
    fn test_grid_never_shrinks() {
        let groups = vec![group("MID", vec![("A", section(&[(1, "12:00", "13:00", "")]))])];
        let expanded = expand_groups(&groups, &Configs::default()).unwrap();
        assert_eq!(expanded.configs, Configs::default());
    }

    #[test]
    fn test_missing_locations_allowed() {
        let mut times = section(&[(1, "09:00", "10:00", "")]);
        times.locations.clear();
        let expanded = expand_groups(&[group("X", vec![("A", times)])], &Configs::default()).unwrap();
        assert_eq!(expanded.events[0].location, None);
    }

    #[test]
    fn test_mismatched_arrays_rejected() {
        let mut times = section(&[(1, "09:00", "10:00", "R")]);
        times.days.push(2);
        let err = expand_groups(&[group("X", vec![("A", times)])], &Configs::default()).unwrap_err();
        match err {
            LayoutError::InvalidEvent { id, field, value, .. } => {
                assert_eq!(id, "X");
                assert_eq!(field, "sections");
                assert_eq!(value, "A");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_meeting_rejected() {
        let times = section(&[(1, "09:00", "10:00", ""), (1, "10:00", "09:00", "")]);
        let err = expand_groups(&[group("X", vec![("A", times)])], &Configs::default()).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidEvent { index: 1, .. }), "got: {err:?}");
    }

    #[test]
    fn test_deserialize_group_json() {
        let group: EventGroup = serde_json::from_str(
            r#"{"courseId":"CS101","sections":{"LEC 001":{"startTimes":["09:00"],"endTimes":["10:20"],"days":[2],"locations":["MC 4020"]}}}"#,
        )
        .unwrap();
        assert_eq!(group.sections["LEC 001"].days, vec![2]);
        assert_eq!(group.title, None);
    }
}
