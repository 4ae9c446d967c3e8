//! Plain-text views of the four collections.

use crate::core::stats::{
    assignments_by_due, format_time_left, is_urgent, notices_newest_first, overall_attendance,
    sessions_for_day,
};
use crate::models::{Assignment, ClassSession, Day, Notice, Subject};
use crate::ui::messages::header;
use crate::utils::colors::{color_for_percentage, color_for_priority, paint};
use crate::utils::formatting::{bold, or_dash, progress_bar};
use crate::utils::table::{Column, Table};
use chrono::{DateTime, Local};

const NOTICE_WRAP: usize = 72;

pub fn print_timetable(classes: &[ClassSession]) {
    header("Timetable");

    if classes.is_empty() {
        println!("No classes yet. Add your first class!\n");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("Day"),
        Column::new("Time"),
        Column::new("Subject"),
        Column::new("Room"),
        Column::new("Professor"),
        Column::new("ID"),
    ]);

    for day in Day::ALL {
        for c in sessions_for_day(classes, day) {
            table.add_row(vec![
                day.label().to_string(),
                c.time.clone(),
                c.subject.clone(),
                or_dash(&c.room).to_string(),
                or_dash(&c.professor).to_string(),
                c.id.to_string(),
            ]);
        }
    }

    println!("{}", table.render());
}

pub fn print_assignments(assignments: &[Assignment], now: DateTime<Local>) {
    header("Assignments");

    if assignments.is_empty() {
        println!("No assignments yet. Add your first assignment!\n");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("ID"),
        Column::new("Title"),
        Column::new("Subject"),
        Column::new("Due"),
        Column::new("Status"),
        Column::new("Done"),
    ]);

    for a in assignments_by_due(assignments) {
        let left = a.time_left(now);
        let mut status = format_time_left(left);
        if is_urgent(left) && !a.is_overdue(now) {
            status.push_str(" (!)");
        }

        table.add_row(vec![
            a.id.to_string(),
            a.title.clone(),
            a.subject.clone(),
            a.due_date.format("%Y-%m-%d %H:%M").to_string(),
            status,
            if a.completed { "yes" } else { "no" }.to_string(),
        ]);
    }

    println!("{}", table.render());
}

pub fn print_attendance(subjects: &[Subject]) {
    header("Attendance");

    let overall = overall_attendance(subjects);
    println!(
        "{} {}   Present: {}   Absent: {}\n",
        bold("Overall:"),
        paint(
            color_for_percentage(overall.percentage),
            &format!("{}%", overall.percentage)
        ),
        overall.present,
        overall.absent
    );

    if subjects.is_empty() {
        println!("No subjects yet. Add your first subject!\n");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("ID"),
        Column::new("Subject"),
        Column::new("Progress"),
        Column::new("%"),
        Column::new("Present"),
        Column::new("Absent"),
        Column::new("Total"),
    ]);

    for s in subjects {
        let pct = s.percentage();
        table.add_row(vec![
            s.id.to_string(),
            s.name.clone(),
            progress_bar(pct, 20),
            format!("{}%", pct),
            s.present_days.to_string(),
            s.absent_days.to_string(),
            s.total_classes.to_string(),
        ]);
    }

    println!("{}", table.render());
}

pub fn print_notices(notices: &[Notice]) {
    header("Notices");

    if notices.is_empty() {
        println!("No notices yet. Add your first notice!\n");
        return;
    }

    for n in notices_newest_first(notices) {
        println!(
            "{} [{}] #{}",
            bold(&n.title),
            paint(color_for_priority(n.priority), n.priority.as_str()),
            n.id
        );
        for line in textwrap::wrap(&n.content, NOTICE_WRAP) {
            println!("    {}", line);
        }
        println!("    Posted on: {}\n", n.created_at.format("%Y-%m-%d"));
    }
}
