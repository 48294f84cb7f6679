use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: u32,
    pub name: String,
    pub score: u32,
    /// Assigned by whoever produced the roster; never recomputed here.
    pub rank: u32,
    pub avatar: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl Student {
    /// First achievement in display priority order.
    pub fn headline_achievement(&self) -> Option<&str> {
        self.achievements.first().map(String::as_str)
    }

    pub fn medal(&self) -> Option<Medal> {
        Medal::for_rank(self.rank)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn for_rank(rank: u32) -> Option<Medal> {
        match rank {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Medal::Gold => "gold trophy",
            Medal::Silver => "silver medal",
            Medal::Bronze => "bronze medal",
        }
    }
}

/// Values shown on the statistics panel.
#[derive(Debug, Clone, Serialize)]
pub struct RosterSummary {
    pub average_score: Option<f64>,
    pub student_count: usize,
    pub activity_percent: u8,
}
