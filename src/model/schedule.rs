//! Produced timetables and their conflict rules.

use crate::model::TimeSlot;
use crate::Id;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One section fixed to a concrete calendar slot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    pub section: Id,
    pub course: Id,
    pub teacher: Id,
    pub slot: TimeSlot,
}

/// An ordered collection of placed sections.
///
/// The invariant, checked on demand rather than assumed, is that no two
/// placements sharing a teacher overlap in time; see
/// [`conflicts`](Self::conflicts).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schedule {
    placements: Vec<Placement>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, placement: Placement) {
        self.placements.push(placement);
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn placement_of(&self, section: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.section == section)
    }

    pub fn placements_for_course(&self, course: &str) -> Vec<&Placement> {
        self.placements
            .iter()
            .filter(|p| p.course == course)
            .collect()
    }

    /// Every pair of placements sharing a teacher with overlapping slots.
    pub fn conflicts(&self) -> Vec<(&Placement, &Placement)> {
        let mut found = Vec::new();
        for (i, a) in self.placements.iter().enumerate() {
            for b in &self.placements[i + 1..] {
                if a.teacher == b.teacher && a.slot.overlaps(&b.slot) {
                    found.push((a, b));
                }
            }
        }
        found
    }

    pub fn is_conflict_free(&self) -> bool {
        self.conflicts().is_empty()
    }
}
