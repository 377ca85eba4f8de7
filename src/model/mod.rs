//! Scheduling-layer value objects: days, time slots, sections, schedules,
//! and the requirement predicates evaluated against produced schedules.

pub mod requirement;
pub mod schedule;
pub mod section;
pub mod time;

pub use requirement::Requirement;
pub use schedule::{Placement, Schedule};
pub use section::{Course, Section, Teacher};
pub use time::{Day, TimeOfDay, TimeSlot};
