use std::fmt;
use std::str::FromStr;

use tracing::debug;
use uuid::Uuid;

use crate::error::LeaderboardError;
use crate::models::Student;
use crate::roster::StudentRoster;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Rankings,
    Profiles,
    Achievements,
}

impl ActiveView {
    pub const ALL: [Self; 3] = [Self::Rankings, Self::Profiles, Self::Achievements];

    pub fn label(self) -> &'static str {
        match self {
            Self::Rankings => "Rankings",
            Self::Profiles => "Profiles",
            Self::Achievements => "Achievements",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Rankings => Self::Profiles,
            Self::Profiles => Self::Achievements,
            Self::Achievements => Self::Rankings,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Rankings => Self::Achievements,
            Self::Profiles => Self::Rankings,
            Self::Achievements => Self::Profiles,
        }
    }
}

impl fmt::Display for ActiveView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActiveView {
    type Err = LeaderboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|view| view.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LeaderboardError::InvalidArgument(format!("unknown view `{s}`")))
    }
}

/// Owns the UI state of one session. The roster is only ever read.
#[derive(Debug)]
pub struct ViewController<'a> {
    roster: &'a StudentRoster,
    session_id: Uuid,
    active_view: ActiveView,
    selected_student_id: Option<u32>,
}

impl<'a> ViewController<'a> {
    pub fn new(roster: &'a StudentRoster) -> Self {
        let session_id = Uuid::new_v4();
        debug!(%session_id, "view session started");
        Self {
            roster,
            session_id,
            active_view: ActiveView::default(),
            selected_student_id: None,
        }
    }

    pub fn roster(&self) -> &'a StudentRoster {
        self.roster
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    #[cfg(test)]
    pub fn selected_student_id(&self) -> Option<u32> {
        self.selected_student_id
    }

    pub fn set_active_view(&mut self, view: ActiveView) {
        if self.active_view == view {
            return;
        }
        debug!(session_id = %self.session_id, from = %self.active_view, to = %view, "view switched");
        self.active_view = view;
    }

    /// Parse a view identifier and switch to it.
    pub fn set_active_view_named(&mut self, name: &str) -> Result<ActiveView, LeaderboardError> {
        let view = name.parse::<ActiveView>()?;
        self.set_active_view(view);
        Ok(view)
    }

    /// Select a student. On an unknown id the selection is left untouched.
    pub fn select_student(&mut self, id: u32) -> Result<&'a Student, LeaderboardError> {
        let student = self.roster.by_id(id).ok_or(LeaderboardError::NotFound(id))?;
        debug!(session_id = %self.session_id, student_id = id, "student selected");
        self.selected_student_id = Some(id);
        Ok(student)
    }

    /// Select a student and jump to their profile, as clicking a ranking
    /// entry does. Nothing changes if the id does not resolve.
    pub fn open_profile(&mut self, id: u32) -> Result<&'a Student, LeaderboardError> {
        let student = self.select_student(id)?;
        self.set_active_view(ActiveView::Profiles);
        Ok(student)
    }

    pub fn clear_selection(&mut self) {
        if self.selected_student_id.take().is_some() {
            debug!(session_id = %self.session_id, "selection cleared");
        }
    }

    /// Resolved at read time against the roster.
    pub fn current_selection(&self) -> Option<&'a Student> {
        self.selected_student_id.and_then(|id| self.roster.by_id(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::tests::sample_roster;

    #[test]
    fn starts_on_rankings_with_no_selection() {
        let roster = sample_roster();
        let controller = ViewController::new(&roster);
        assert_eq!(controller.active_view(), ActiveView::Rankings);
        assert!(controller.current_selection().is_none());
    }

    #[test]
    fn last_view_write_wins() {
        let roster = sample_roster();
        let mut controller = ViewController::new(&roster);
        controller.set_active_view(ActiveView::Achievements);
        controller.set_active_view(ActiveView::Profiles);
        assert_eq!(controller.active_view(), ActiveView::Profiles);
    }

    #[test]
    fn setting_same_view_twice_is_idempotent() {
        let roster = sample_roster();
        let mut controller = ViewController::new(&roster);
        controller.set_active_view(ActiveView::Achievements);
        let before = (controller.active_view(), controller.selected_student_id());
        controller.set_active_view(ActiveView::Achievements);
        assert_eq!(before, (controller.active_view(), controller.selected_student_id()));
    }

    #[test]
    fn view_names_parse_case_insensitively() {
        assert_eq!("profiles".parse::<ActiveView>(), Ok(ActiveView::Profiles));
        assert_eq!(" ACHIEVEMENTS ".parse::<ActiveView>(), Ok(ActiveView::Achievements));
        assert!(matches!(
            "settings".parse::<ActiveView>(),
            Err(LeaderboardError::InvalidArgument(_))
        ));
    }

    #[test]
    fn unknown_view_name_leaves_state_alone() {
        let roster = sample_roster();
        let mut controller = ViewController::new(&roster);
        controller.set_active_view(ActiveView::Profiles);
        assert!(controller.set_active_view_named("history").is_err());
        assert_eq!(controller.active_view(), ActiveView::Profiles);
    }

    #[test]
    fn tabs_cycle_in_both_directions() {
        for view in ActiveView::ALL {
            assert_eq!(view.next().prev(), view);
        }
        assert_eq!(ActiveView::Achievements.next(), ActiveView::Rankings);
    }

    #[test]
    fn select_then_clear() {
        let roster = sample_roster();
        let mut controller = ViewController::new(&roster);
        controller.select_student(1).unwrap();
        assert_eq!(controller.current_selection().map(|s| s.id), Some(1));
        controller.clear_selection();
        assert!(controller.current_selection().is_none());
    }

    #[test]
    fn selecting_another_student_overwrites() {
        let roster = sample_roster();
        let mut controller = ViewController::new(&roster);
        controller.select_student(1).unwrap();
        controller.select_student(3).unwrap();
        assert_eq!(controller.selected_student_id(), Some(3));
    }

    #[test]
    fn unknown_id_is_not_found_and_keeps_selection() {
        let roster = sample_roster();
        let mut controller = ViewController::new(&roster);
        controller.select_student(2).unwrap();
        assert_eq!(controller.select_student(42), Err(LeaderboardError::NotFound(42)));
        assert_eq!(controller.selected_student_id(), Some(2));
    }

    #[test]
    fn open_profile_switches_view_only_on_success() {
        let roster = sample_roster();
        let mut controller = ViewController::new(&roster);
        assert!(controller.open_profile(77).is_err());
        assert_eq!(controller.active_view(), ActiveView::Rankings);
        assert!(controller.selected_student_id().is_none());

        controller.open_profile(2).unwrap();
        assert_eq!(controller.active_view(), ActiveView::Profiles);
        assert_eq!(controller.selected_student_id(), Some(2));
    }

    #[test]
    fn sessions_are_independent() {
        let roster = sample_roster();
        let mut first = ViewController::new(&roster);
        let second = ViewController::new(&roster);
        first.select_student(1).unwrap();
        first.set_active_view(ActiveView::Achievements);
        assert_ne!(first.session_id(), second.session_id());
        assert!(second.current_selection().is_none());
        assert_eq!(second.active_view(), ActiveView::Rankings);
    }
}
