use crate::error::LeaderboardError;
use crate::models::{RosterSummary, Student};
use crate::roster::StudentRoster;

pub fn average_score(roster: &StudentRoster) -> Result<f64, LeaderboardError> {
    if roster.is_empty() {
        return Err(LeaderboardError::EmptyInput);
    }
    let total: u64 = roster.all().iter().map(|s| u64::from(s.score)).sum();
    Ok(total as f64 / roster.len() as f64)
}

pub fn count(roster: &StudentRoster) -> usize {
    roster.len()
}

/// The first `n` students in roster order. Deliberately not a ranking by
/// number of achievements.
pub fn top_achievers(roster: &StudentRoster, n: i64) -> Result<&[Student], LeaderboardError> {
    roster.top_n(n)
}

pub fn summarize(roster: &StudentRoster, activity_percent: u8) -> RosterSummary {
    RosterSummary {
        average_score: average_score(roster).ok(),
        student_count: count(roster),
        activity_percent,
    }
}
