//! Courses, teachers, and the sections awaiting placement.

use crate::model::TimeSlot;
use crate::Id;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A teacher who can be assigned sections.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Teacher {
    pub id: Id,
    pub name: String,
}

impl Teacher {
    pub fn new(id: impl Into<Id>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A course offered in one or more sections.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Course {
    pub code: Id,
    pub name: String,
    pub credits: u32,
}

impl Course {
    pub fn new(code: impl Into<Id>, name: impl Into<String>, credits: u32) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            credits,
        }
    }

    /// Teaching minutes per week implied by the credit count.
    pub fn credit_minutes(&self) -> u32 {
        self.credits * 60
    }
}

/// One section of a course, waiting for a calendar placement.
///
/// `course` and `teacher` are plain id references into the scheduler's
/// registries; sections do not own or share the referenced objects.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Section {
    pub id: Id,
    pub course: Id,
    pub teacher: Id,
    pub duration_minutes: u32,
    /// Externally fixed placement the packer must honor, if any.
    pub pinned: Option<TimeSlot>,
}

impl Section {
    /// Creates a section with a freshly generated id.
    pub fn new(course: impl Into<Id>, teacher: impl Into<Id>, duration_minutes: u32) -> Self {
        Self::with_id(crate::generate_id(), course, teacher, duration_minutes)
    }

    /// Creates a section with a caller-chosen id.
    pub fn with_id(
        id: impl Into<Id>,
        course: impl Into<Id>,
        teacher: impl Into<Id>,
        duration_minutes: u32,
    ) -> Self {
        Self {
            id: id.into(),
            course: course.into(),
            teacher: teacher.into(),
            duration_minutes,
            pinned: None,
        }
    }

    /// Creates a section whose weekly duration follows the course credits.
    pub fn for_course(course: &Course, teacher: impl Into<Id>) -> Self {
        Self::new(course.code.clone(), teacher, course.credit_minutes())
    }

    /// Fixes this section to a concrete slot ahead of scheduling.
    pub fn pinned_at(mut self, slot: TimeSlot) -> Self {
        self.pinned = Some(slot);
        self
    }
}
