//! External requirements evaluated against produced schedules.

use crate::model::{Schedule, TimeSlot};
use crate::Id;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A requirement on the produced timetable.
///
/// A closed set of kinds, each with its own payload and satisfaction logic;
/// dispatch is by match, not runtime type inspection.
/// [`Consecutive`](Requirement::Consecutive) additionally drives the
/// PQ-tree reduction step, since adjacency in the section ordering is what
/// makes back-to-back placement possible.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Requirement {
    /// Every section of `course` should be taught by `teacher`.
    TeacherPreference { course: Id, teacher: Id },
    /// Some section of `course` should occupy exactly `slot`.
    FixedTimeSlot { course: Id, slot: TimeSlot },
    /// The named sections must run back-to-back on a single day.
    Consecutive { sections: Vec<Id> },
}

impl Requirement {
    /// Evaluates this requirement against a fully placed schedule.
    pub fn is_satisfied(&self, schedule: &Schedule) -> bool {
        match self {
            Requirement::TeacherPreference { course, teacher } => {
                let placements = schedule.placements_for_course(course);
                !placements.is_empty() && placements.iter().all(|p| &p.teacher == teacher)
            }
            Requirement::FixedTimeSlot { course, slot } => schedule
                .placements_for_course(course)
                .iter()
                .any(|p| &p.slot == slot),
            Requirement::Consecutive { sections } => consecutive_in(schedule, sections),
        }
    }

    /// The section subset that must stay contiguous in the ordering, for
    /// requirement kinds that constrain the ordering at all.
    pub fn contiguity_subset(&self) -> Option<&[Id]> {
        match self {
            Requirement::Consecutive { sections } => Some(sections),
            _ => None,
        }
    }

    /// Human-readable description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Requirement::TeacherPreference { course, teacher } => {
                format!("course {course} taught by teacher {teacher}")
            }
            Requirement::FixedTimeSlot { course, slot } => {
                format!("course {course} meets at {slot}")
            }
            Requirement::Consecutive { sections } => {
                format!("sections {} run back-to-back", sections.join(", "))
            }
        }
    }
}

/// True when every named section is placed on one day, back-to-back with no
/// gaps, in some order.
fn consecutive_in(schedule: &Schedule, sections: &[Id]) -> bool {
    if sections.len() <= 1 {
        return true;
    }
    let mut slots = Vec::with_capacity(sections.len());
    for id in sections {
        match schedule.placement_of(id) {
            Some(p) => slots.push(p.slot),
            None => return false,
        }
    }
    let day = slots[0].day();
    if slots.iter().any(|s| s.day() != day) {
        return false;
    }
    slots.sort_by_key(|s| s.start().minutes_from_midnight());
    slots
        .windows(2)
        .all(|pair| pair[0].end_minutes() == pair[1].start().minutes_from_midnight())
}
