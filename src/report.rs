use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::config::LeaderboardConfig;
use crate::models::Student;
use crate::roster::StudentRoster;
use crate::stats;
use crate::view::{ActiveView, ViewController};

pub const PROFILE_PLACEHOLDER: &str = "Select a student from the rankings to see their profile";

/// Render whatever the controller's active view shows.
pub fn render_view(controller: &ViewController<'_>, config: &LeaderboardConfig) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", tab_bar(controller.active_view()));
    let _ = writeln!(output);

    let body = match controller.active_view() {
        ActiveView::Rankings => render_rankings(controller.roster()),
        ActiveView::Profiles => render_profile(controller.current_selection()),
        ActiveView::Achievements => render_achievements(controller.roster(), config),
    };
    output.push_str(&body);
    output
}

pub fn tab_bar(active: ActiveView) -> String {
    ActiveView::ALL
        .iter()
        .map(|view| {
            if *view == active {
                format!("[{}]", view.label())
            } else {
                format!(" {} ", view.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_rankings(roster: &StudentRoster) -> String {
    let mut output = String::new();

    if roster.is_empty() {
        let _ = writeln!(output, "No students in the roster.");
        return output;
    }

    for student in roster.all() {
        let medal = student
            .medal()
            .map(|m| format!(" ({})", m.label()))
            .unwrap_or_default();
        let _ = writeln!(
            output,
            "#{} {} {}{} - {} points [id {}]",
            student.rank, student.avatar, student.name, medal, student.score, student.id
        );
    }

    output
}

pub fn render_profile(selection: Option<&Student>) -> String {
    let mut output = String::new();

    let Some(student) = selection else {
        let _ = writeln!(output, "{PROFILE_PLACEHOLDER}");
        return output;
    };

    let _ = writeln!(output, "{} {}", student.avatar, student.name);
    let _ = writeln!(output, "Rank #{} | {} points", student.rank, student.score);
    let _ = writeln!(output);
    let _ = writeln!(output, "Achievements:");
    if student.achievements.is_empty() {
        let _ = writeln!(output, "- none yet");
    } else {
        for achievement in &student.achievements {
            let _ = writeln!(output, "- {achievement}");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "Subjects:");
    if student.subjects.is_empty() {
        let _ = writeln!(output, "- no subject scores");
    } else {
        for subject in &student.subjects {
            let _ = writeln!(
                output,
                "- {}: {}% {}",
                subject.name,
                subject.score,
                progress_bar(subject.score)
            );
        }
    }

    output
}

pub fn render_achievements(roster: &StudentRoster, config: &LeaderboardConfig) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Top achievements:");
    let count = i64::try_from(config.top_achievers).unwrap_or(i64::MAX);
    let top = stats::top_achievers(roster, count).unwrap_or_default();
    if top.is_empty() {
        let _ = writeln!(output, "No data");
    } else {
        for student in top {
            let _ = writeln!(
                output,
                "- {} {}: {}",
                student.avatar,
                student.name,
                student.headline_achievement().unwrap_or("no achievements yet")
            );
        }
    }

    let _ = writeln!(output);
    output.push_str(&render_stats(roster, config));
    output
}

pub fn render_stats(roster: &StudentRoster, config: &LeaderboardConfig) -> String {
    let mut output = String::new();
    let summary = stats::summarize(roster, config.activity_percent);

    let _ = writeln!(output, "Statistics:");
    match summary.average_score {
        Some(average) => {
            let _ = writeln!(output, "- Average score: {average:.0}");
        }
        None => {
            let _ = writeln!(output, "- Average score: No data");
        }
    }
    let _ = writeln!(output, "- Total students: {}", summary.student_count);
    let _ = writeln!(
        output,
        "- Activity: {}% {}",
        summary.activity_percent,
        progress_bar(summary.activity_percent)
    );

    output
}

/// Markdown snapshot of all three views.
pub fn build_report(
    roster: &StudentRoster,
    config: &LeaderboardConfig,
    generated_at: DateTime<Utc>,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Student Leaderboard");
    let _ = writeln!(
        output,
        "Generated at {}",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Rankings");
    output.push_str(&bulleted(&render_rankings(roster)));

    for student in roster.all() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Profile: {}", student.name);
        output.push_str(&render_profile(Some(student)));
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Achievements");
    output.push_str(&render_achievements(roster, config));

    output
}

fn bulleted(block: &str) -> String {
    block.lines().map(|line| format!("- {line}\n")).collect()
}

fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) / 10;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(10 - filled))
}
