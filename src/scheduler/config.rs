//! Scheduling attempt configuration.

use crate::model::{Day, TimeOfDay};
use crate::pqtree::EnumerationBudget;

/// Working window and resource limits for one scheduling attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Earliest start of any placed section.
    pub day_start: TimeOfDay,
    /// Latest end of any placed section.
    pub day_end: TimeOfDay,
    /// Days available for packing, tried in order.
    pub days: Vec<Day>,
    /// Cap on the orderings materialized from the PQ-tree.
    pub budget: EnumerationBudget,
}

impl Default for SchedulerConfig {
    /// 8:00–18:00, Monday through Friday.
    fn default() -> Self {
        Self {
            day_start: TimeOfDay::new(8, 0),
            day_end: TimeOfDay::new(18, 0),
            days: Day::WEEK.to_vec(),
            budget: EnumerationBudget::default(),
        }
    }
}

impl SchedulerConfig {
    /// Minutes available per day for unpinned sections.
    pub fn minutes_per_day(&self) -> u32 {
        self.day_end
            .minutes_from_midnight()
            .saturating_sub(self.day_start.minutes_from_midnight())
    }
}
