use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

use crate::error::LeaderboardError;
use crate::models::{Student, Subject};

const EMBEDDED_ROSTER: &str = include_str!("../data/roster.json");

/// Immutable, ordered collection of students. Order is presentation order
/// as supplied and is never re-sorted.
#[derive(Debug, Clone)]
pub struct StudentRoster {
    students: Vec<Student>,
}

impl StudentRoster {
    pub fn new(students: Vec<Student>) -> Result<Self, LeaderboardError> {
        let mut ids = HashSet::new();
        let mut ranks = HashSet::new();

        for student in &students {
            if student.rank == 0 {
                return Err(LeaderboardError::InvalidRoster(format!(
                    "student {} has rank 0, ranks start at 1",
                    student.id
                )));
            }
            if !ids.insert(student.id) {
                return Err(LeaderboardError::InvalidRoster(format!(
                    "duplicate id {}",
                    student.id
                )));
            }
            if !ranks.insert(student.rank) {
                return Err(LeaderboardError::InvalidRoster(format!(
                    "duplicate rank {} (student {})",
                    student.rank, student.id
                )));
            }
            if let Some(subject) = student.subjects.iter().find(|s| s.score > 100) {
                return Err(LeaderboardError::InvalidRoster(format!(
                    "student {} has {} score {} above 100",
                    student.id, subject.name, subject.score
                )));
            }
        }

        if !ranks_follow_score(&students) {
            warn!("roster ranks are not consistent with descending score");
        }

        Ok(Self { students })
    }

    pub fn embedded() -> anyhow::Result<Self> {
        Self::from_json_str(EMBEDDED_ROSTER).context("embedded roster is malformed")
    }

    pub fn from_json_str(raw: &str) -> anyhow::Result<Self> {
        let students: Vec<Student> = serde_json::from_str(raw)?;
        Ok(Self::new(students)?)
    }

    /// Load a roster from a `.json` or `.csv` file, chosen by extension.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let roster = match extension.as_deref() {
            Some("csv") => {
                let reader = csv::Reader::from_path(path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                Self::from_csv(reader)?
            }
            Some("json") => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                Self::from_json_str(&raw)
                    .with_context(|| format!("failed to parse {}", path.display()))?
            }
            _ => anyhow::bail!(
                "unsupported roster format for {} (expected .json or .csv)",
                path.display()
            ),
        };

        info!(path = %path.display(), students = roster.len(), "roster loaded");
        Ok(roster)
    }

    pub fn from_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> anyhow::Result<Self> {
        #[derive(serde::Deserialize)]
        struct CsvRow {
            id: u32,
            name: String,
            score: u32,
            rank: u32,
            avatar: String,
            #[serde(default)]
            achievements: String,
            #[serde(default)]
            subjects: String,
        }

        let mut students = Vec::new();
        for result in reader.deserialize::<CsvRow>() {
            let row = result?;
            let achievements = split_list(&row.achievements)
                .map(str::to_string)
                .collect();
            let subjects = split_list(&row.subjects)
                .map(|cell| parse_subject(row.id, cell))
                .collect::<Result<Vec<_>, _>>()?;

            students.push(Student {
                id: row.id,
                name: row.name,
                score: row.score,
                rank: row.rank,
                avatar: row.avatar,
                achievements,
                subjects,
            });
        }

        Ok(Self::new(students)?)
    }

    pub fn all(&self) -> &[Student] {
        &self.students
    }

    pub fn by_id(&self, id: u32) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Leading `n` students in roster order; the whole roster when `n` exceeds it.
    pub fn top_n(&self, n: i64) -> Result<&[Student], LeaderboardError> {
        if n < 0 {
            return Err(LeaderboardError::InvalidArgument(format!(
                "count must be non-negative, got {n}"
            )));
        }
        let take = usize::try_from(n).unwrap_or(usize::MAX).min(self.students.len());
        Ok(&self.students[..take])
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

/// Better ranks never carry a lower score. Ties are allowed.
fn ranks_follow_score(students: &[Student]) -> bool {
    let mut by_rank: Vec<&Student> = students.iter().collect();
    by_rank.sort_by_key(|s| s.rank);
    by_rank.windows(2).all(|pair| pair[0].score >= pair[1].score)
}

fn split_list(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(';').map(str::trim).filter(|part| !part.is_empty())
}

fn parse_subject(student_id: u32, cell: &str) -> Result<Subject, LeaderboardError> {
    let (name, score) = cell.rsplit_once(':').ok_or_else(|| {
        LeaderboardError::InvalidRoster(format!(
            "student {student_id}: subject `{cell}` is not name:score"
        ))
    })?;
    let score = score.trim().parse::<u8>().map_err(|_| {
        LeaderboardError::InvalidRoster(format!(
            "student {student_id}: subject `{cell}` score is not a whole number from 0 to 100"
        ))
    })?;
    Ok(Subject {
        name: name.trim().to_string(),
        score,
    })
}
