//! pq_timetable - PQ-tree driven course-section timetabling
//!
//! A constraint engine that represents whole families of section orderings
//! as a PQ-tree, restricts them through consecutivity constraints, and maps
//! the surviving orderings onto conflict-free weekly timetables.

pub mod model;
pub mod pqtree;
pub mod scheduler;

/// Identifier type used for sections, courses, teachers, and tree leaves.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
