mod analysis;
pub mod conflicts;
pub mod fill;
pub mod preferences;
mod types;

pub use types::{
    PlanOptions, Refusal, RunSummary, SchedError, UnderFill, Violation, ViolationKind,
};

use crate::grid::ScheduleGrid;
use crate::model::{Preferences, Roster};
use rand::Rng;
use tracing::info;

/// Scheduler : possède le Roster et la grille de la semaine en cours de construction
#[derive(Debug)]
pub struct Scheduler {
    roster: Roster,
    grid: ScheduleGrid,
}

impl Scheduler {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            grid: ScheduleGrid::new(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn grid(&self) -> &ScheduleGrid {
        &self.grid
    }

    pub fn match_preferences(&mut self, prefs: &Preferences) -> usize {
        preferences::apply(&mut self.roster, prefs, &mut self.grid)
    }

    pub fn resolve_conflicts(&mut self) -> usize {
        conflicts::apply(&mut self.roster, &mut self.grid)
    }

    pub fn fill_random<R: Rng>(&mut self, rng: &mut R) -> usize {
        fill::apply(&mut self.roster, &mut self.grid, rng)
    }

    /// Enchaîne les trois phases ; chacune part de l'état laissé par la précédente.
    pub fn run<R: Rng>(&mut self, prefs: &Preferences, rng: &mut R) -> RunSummary {
        let summary = RunSummary {
            preferred: self.match_preferences(prefs),
            resolved: self.resolve_conflicts(),
            filled: self.fill_random(rng),
        };
        info!(
            employees = self.roster.len(),
            preferred = summary.preferred,
            resolved = summary.resolved,
            filled = summary.filled,
            under_filled = self.under_fills().len(),
            "week planned"
        );
        summary
    }

    pub fn under_fills(&self) -> Vec<UnderFill> {
        analysis::under_fills(&self.grid)
    }

    pub fn check_invariants(&self) -> Vec<Violation> {
        analysis::check_invariants(&self.roster, &self.grid)
    }

    pub fn into_parts(self) -> (Roster, ScheduleGrid) {
        (self.roster, self.grid)
    }
}

/// Postes sous leur capacité, ordre calendaire.
pub fn under_fills(grid: &ScheduleGrid) -> Vec<UnderFill> {
    analysis::under_fills(grid)
}

/// Audit des invariants roster/grille ; vide pour tout état construit par [`Roster::assign`].
pub fn check_invariants(roster: &Roster, grid: &ScheduleGrid) -> Vec<Violation> {
    analysis::check_invariants(roster, grid)
}
