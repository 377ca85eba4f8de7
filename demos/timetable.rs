//! Demonstration of PQ-tree driven timetable generation.

use pq_timetable::model::{Course, Day, Requirement, Section, Teacher, TimeOfDay, TimeSlot};
use pq_timetable::scheduler::{Scheduler, SchedulerConfig};

fn main() {
    let mut scheduler = Scheduler::new();

    scheduler.add_teacher(Teacher::new("t-rivera", "Rivera"));
    scheduler.add_teacher(Teacher::new("t-chen", "Chen"));

    scheduler.add_course(Course::new("CS101", "Introduction to Computing", 2));
    scheduler.add_course(Course::new("MA201", "Linear Algebra", 2));

    // Two lecture sections, a lab, and a pinned seminar
    scheduler.add_section(Section::with_id("cs-lec", "CS101", "t-rivera", 60));
    scheduler.add_section(Section::with_id("cs-lab", "CS101", "t-rivera", 120));
    scheduler.add_section(Section::with_id("ma-lec", "MA201", "t-chen", 90));
    scheduler.add_section(
        Section::with_id("ma-sem", "MA201", "t-chen", 60).pinned_at(TimeSlot::new(
            Day::Wednesday,
            TimeOfDay::new(14, 0),
            60,
        )),
    );

    // The lecture must flow straight into the lab
    scheduler.add_requirement(Requirement::Consecutive {
        sections: vec!["cs-lec".into(), "cs-lab".into()],
    });
    scheduler.add_requirement(Requirement::TeacherPreference {
        course: "CS101".into(),
        teacher: "t-rivera".into(),
    });

    match scheduler.generate_schedule(&SchedulerConfig::default()) {
        Ok(outcome) => {
            println!("Generated timetable ({} candidates considered):", outcome.candidates_considered);
            for placement in outcome.schedule.placements() {
                println!("  {:<8} {:<8} {}", placement.section, placement.course, placement.slot);
            }
            if !outcome.fully_satisfied {
                println!("Unmet requirements:");
                for unmet in &outcome.unmet_requirements {
                    println!("  - {unmet}");
                }
            }
            for dropped in &outcome.dropped_constraints {
                println!("Dropped ordering constraint: {} ({})", dropped.requirement, dropped.reason);
            }
            if !outcome.enumeration_complete {
                println!("Note: enumeration was truncated at the budget.");
            }
            println!("Satisfaction ratio: {:.2}", outcome.satisfaction_ratio);
        }
        Err(err) => println!("No schedule found: {err}"),
    }
}
