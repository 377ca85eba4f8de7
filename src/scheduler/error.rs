use crate::pqtree::TreeError;
use crate::Id;
use thiserror::Error;

/// Why one candidate frontier could not be mapped onto the calendar.
///
/// Local to a single candidate; the scheduler discards the candidate and
/// moves on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("Section {0} does not fit inside the working week")]
    DoesNotFit(Id),

    #[error("Section {0} is pinned outside the working hours")]
    PinnedOutsideHours(Id),
}

/// Terminal failures of a scheduling attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("No sections have been registered")]
    NoSections,

    #[error("Every candidate timetable had a teacher conflict")]
    NoFeasibleSchedule,

    #[error(transparent)]
    Tree(#[from] TreeError),
}
