//! The scheduling layer: builds a PQ-tree over the registered sections,
//! applies ordering constraints as reductions, and maps the surviving
//! orderings onto conflict-free weekly timetables.

pub mod config;
pub mod error;
mod placement;


pub use config::SchedulerConfig;
pub use error::{PlacementError, SchedulerError};

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::model::{Course, Requirement, Schedule, Section, Teacher};
use crate::pqtree::{PQTree, ReduceError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordering constraint that could not be applied this attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DroppedConstraint {
    /// Human-readable description of the requirement.
    pub requirement: String,
    pub reason: ReduceError,
}

/// Result of one scheduling attempt, with its honesty diagnostics: what was
/// dropped, whether enumeration was exhaustive, and whether the returned
/// timetable actually meets every requirement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleOutcome {
    pub schedule: Schedule,
    /// True iff every registered requirement holds for `schedule`.
    pub fully_satisfied: bool,
    /// Descriptions of the requirements `schedule` does not meet.
    pub unmet_requirements: Vec<String>,
    /// Ordering constraints dropped because their reduction failed.
    pub dropped_constraints: Vec<DroppedConstraint>,
    /// False when the frontier enumeration hit its budget; the candidates
    /// examined were then a subset of the family.
    pub enumeration_complete: bool,
    /// Number of orderings examined.
    pub candidates_considered: usize,
    /// Fraction of requirements met, in `[0, 1]`.
    pub satisfaction_ratio: f64,
}

/// Registry of courses, teachers, sections, and requirements from which
/// timetables are generated.
///
/// Each call to [`generate_schedule`](Self::generate_schedule) builds a
/// fresh PQ-tree over the current sections; no tree state survives between
/// attempts.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    courses: Vec<Course>,
    teachers: Vec<Teacher>,
    sections: Vec<Section>,
    requirements: Vec<Requirement>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a course; a course with the same code is kept once.
    pub fn add_course(&mut self, course: Course) {
        if !self.courses.iter().any(|c| c.code == course.code) {
            self.courses.push(course);
        }
    }

    /// Registers a teacher; a teacher with the same id is kept once.
    pub fn add_teacher(&mut self, teacher: Teacher) {
        if !self.teachers.iter().any(|t| t.id == teacher.id) {
            self.teachers.push(teacher);
        }
    }

    /// Registers a section; a section with the same id is kept once.
    pub fn add_section(&mut self, section: Section) {
        if !self.sections.iter().any(|s| s.id == section.id) {
            self.sections.push(section);
        }
    }

    pub fn add_requirement(&mut self, requirement: Requirement) {
        if !self.requirements.contains(&requirement) {
            self.requirements.push(requirement);
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn clear(&mut self) {
        self.courses.clear();
        self.teachers.clear();
        self.sections.clear();
        self.requirements.clear();
    }

    /// Fraction of registered requirements a schedule meets.
    pub fn evaluate(&self, schedule: &Schedule) -> f64 {
        if self.requirements.is_empty() {
            return 1.0;
        }
        let met = self
            .requirements
            .iter()
            .filter(|r| r.is_satisfied(schedule))
            .count();
        met as f64 / self.requirements.len() as f64
    }

    /// Generates a conflict-free timetable for the registered sections.
    ///
    /// Consecutivity requirements become PQ-tree reductions; one that cannot
    /// be applied is dropped (and reported in the outcome) rather than
    /// aborting the attempt. Candidates with teacher conflicts are filtered
    /// out unconditionally. If no candidate meets every requirement, the
    /// best surviving candidate is returned with `fully_satisfied == false`;
    /// zero survivors is the hard failure
    /// [`SchedulerError::NoFeasibleSchedule`].
    pub fn generate_schedule(
        &self,
        config: &SchedulerConfig,
    ) -> Result<ScheduleOutcome, SchedulerError> {
        if self.sections.is_empty() {
            return Err(SchedulerError::NoSections);
        }

        let mut tree = PQTree::new(self.sections.iter().map(|s| s.id.clone()))?;

        let mut dropped = Vec::new();
        for requirement in &self.requirements {
            let Some(subset) = requirement.contiguity_subset() else {
                continue;
            };
            match tree.reduce(subset) {
                Ok(outcome) => {
                    debug!(
                        requirement = %requirement.describe(),
                        ?outcome,
                        "ordering constraint applied"
                    );
                }
                Err(reason) => {
                    debug!(
                        requirement = %requirement.describe(),
                        %reason,
                        "ordering constraint dropped"
                    );
                    dropped.push(DroppedConstraint {
                        requirement: requirement.describe(),
                        reason,
                    });
                }
            }
        }

        let frontiers = tree.all_frontiers(config.budget);
        if !frontiers.complete() {
            debug!(
                materialized = frontiers.len(),
                "frontier enumeration truncated at budget"
            );
        }

        let by_id: HashMap<&str, &Section> =
            self.sections.iter().map(|s| (s.id.as_str(), s)).collect();
        let mut survivors: Vec<Schedule> = Vec::new();
        for frontier in frontiers.iter() {
            let order: Vec<&Section> = frontier
                .iter()
                .filter_map(|id| by_id.get(id.as_str()).copied())
                .collect();
            debug_assert_eq!(order.len(), frontier.len());
            match placement::place_frontier(&order, config) {
                Ok(candidate) => {
                    if candidate.is_conflict_free() {
                        survivors.push(candidate);
                    } else {
                        trace!("candidate discarded: teacher conflict");
                    }
                }
                Err(reason) => {
                    trace!(%reason, "candidate discarded: no calendar placement");
                }
            }
        }

        if survivors.is_empty() {
            return Err(SchedulerError::NoFeasibleSchedule);
        }

        let schedule = match survivors
            .iter()
            .find(|s| self.requirements.iter().all(|r| r.is_satisfied(s)))
        {
            Some(winner) => winner.clone(),
            None => {
                // No candidate meets everything; fall back to the best one.
                let mut best = survivors[0].clone();
                let mut best_ratio = self.evaluate(&best);
                for candidate in &survivors[1..] {
                    let ratio = self.evaluate(candidate);
                    if ratio > best_ratio {
                        best = candidate.clone();
                        best_ratio = ratio;
                    }
                }
                best
            }
        };

        let unmet_requirements: Vec<String> = self
            .requirements
            .iter()
            .filter(|r| !r.is_satisfied(&schedule))
            .map(Requirement::describe)
            .collect();
        let satisfaction_ratio = self.evaluate(&schedule);

        Ok(ScheduleOutcome {
            fully_satisfied: unmet_requirements.is_empty(),
            unmet_requirements,
            dropped_constraints: dropped,
            enumeration_complete: frontiers.complete(),
            candidates_considered: frontiers.len(),
            satisfaction_ratio,
            schedule,
        })
    }
}
