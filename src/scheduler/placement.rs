//! Mapping an abstract section ordering onto the weekly calendar.

use std::collections::HashMap;

use super::config::SchedulerConfig;
use super::error::PlacementError;
use crate::model::{Day, Placement, Schedule, Section, TimeOfDay, TimeSlot};

/// Walks the ordering and packs sections back-to-back inside the working
/// hours, one cursor per day, spilling to the next day when a section no
/// longer fits. A pinned section takes its pinned slot verbatim and pushes
/// that day's cursor past it.
pub(crate) fn place_frontier(
    order: &[&Section],
    config: &SchedulerConfig,
) -> Result<Schedule, PlacementError> {
    let day_start = config.day_start.minutes_from_midnight();
    let day_end = config.day_end.minutes_from_midnight();
    let mut cursors: HashMap<Day, u32> = HashMap::new();
    let mut schedule = Schedule::new();

    for section in order {
        let slot = match section.pinned {
            Some(pinned) => {
                if pinned.start().minutes_from_midnight() < day_start
                    || pinned.end_minutes() > day_end
                {
                    return Err(PlacementError::PinnedOutsideHours(section.id.clone()));
                }
                let cursor = cursors.entry(pinned.day()).or_insert(day_start);
                *cursor = (*cursor).max(pinned.end_minutes());
                pinned
            }
            None => pack(section, config, &mut cursors, day_start, day_end)?,
        };
        schedule.push(Placement {
            section: section.id.clone(),
            course: section.course.clone(),
            teacher: section.teacher.clone(),
            slot,
        });
    }

    Ok(schedule)
}

fn pack(
    section: &Section,
    config: &SchedulerConfig,
    cursors: &mut HashMap<Day, u32>,
    day_start: u32,
    day_end: u32,
) -> Result<TimeSlot, PlacementError> {
    for &day in &config.days {
        let cursor = cursors.entry(day).or_insert(day_start);
        if *cursor + section.duration_minutes <= day_end {
            let start = *cursor;
            *cursor += section.duration_minutes;
            return Ok(TimeSlot::new(
                day,
                TimeOfDay::from_minutes(start),
                section.duration_minutes,
            ));
        }
    }
    Err(PlacementError::DoesNotFit(section.id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, duration: u32) -> Section {
        Section::with_id(id, "C1", "t1", duration)
    }

    fn config() -> SchedulerConfig {
        SchedulerConfig::default()
    }

    #[test]
    fn packs_back_to_back_from_the_day_start() {
        let a = section("s1", 60);
        let b = section("s2", 90);
        let schedule = place_frontier(&[&a, &b], &config()).unwrap();

        let first = schedule.placement_of("s1").unwrap();
        let second = schedule.placement_of("s2").unwrap();
        assert_eq!(first.slot.day(), Day::Monday);
        assert_eq!(first.slot.start(), TimeOfDay::new(8, 0));
        assert_eq!(second.slot.day(), Day::Monday);
        assert_eq!(second.slot.start(), TimeOfDay::new(9, 0));
    }

    #[test]
    fn spills_to_the_next_day_when_full() {
        let sections: Vec<Section> = (1..=6).map(|i| section(&format!("s{i}"), 120)).collect();
        let order: Vec<&Section> = sections.iter().collect();
        let schedule = place_frontier(&order, &config()).unwrap();

        // five two-hour sections fill Monday 8:00-18:00
        assert_eq!(schedule.placement_of("s5").unwrap().slot.day(), Day::Monday);
        let spilled = schedule.placement_of("s6").unwrap();
        assert_eq!(spilled.slot.day(), Day::Tuesday);
        assert_eq!(spilled.slot.start(), TimeOfDay::new(8, 0));
    }

    #[test]
    fn pinned_slot_is_used_verbatim_and_advances_the_cursor() {
        let pinned = section("s1", 60).pinned_at(TimeSlot::new(
            Day::Monday,
            TimeOfDay::new(9, 0),
            60,
        ));
        let after = section("s2", 60);
        let schedule = place_frontier(&[&pinned, &after], &config()).unwrap();

        assert_eq!(
            schedule.placement_of("s1").unwrap().slot,
            TimeSlot::new(Day::Monday, TimeOfDay::new(9, 0), 60)
        );
        // cursor moved past the pin; the next section follows it
        assert_eq!(
            schedule.placement_of("s2").unwrap().slot.start(),
            TimeOfDay::new(10, 0)
        );
    }

    #[test]
    fn pinned_outside_working_hours_is_rejected() {
        let early = section("s1", 60).pinned_at(TimeSlot::new(
            Day::Monday,
            TimeOfDay::new(7, 0),
            60,
        ));
        assert_eq!(
            place_frontier(&[&early], &config()).unwrap_err(),
            PlacementError::PinnedOutsideHours("s1".to_string())
        );
    }

    #[test]
    fn oversized_section_does_not_fit() {
        let huge = section("s1", 11 * 60);
        assert_eq!(
            place_frontier(&[&huge], &config()).unwrap_err(),
            PlacementError::DoesNotFit("s1".to_string())
        );
    }

    #[test]
    fn no_available_days_means_nothing_fits() {
        let mut cfg = config();
        cfg.days.clear();
        let a = section("s1", 60);
        assert_eq!(
            place_frontier(&[&a], &cfg).unwrap_err(),
            PlacementError::DoesNotFit("s1".to_string())
        );
    }
}
