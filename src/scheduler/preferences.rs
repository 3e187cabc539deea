//! Phase 1 : affectation selon les préférences.

use crate::grid::ScheduleGrid;
use crate::model::{Preferences, Roster};
use tracing::{debug, trace};

/// Place chaque employé sur ses créneaux souhaités quand le poste, le jour et
/// son plafond le permettent. Un souhait impossible est reporté aux phases
/// suivantes sans erreur. Renvoie le nombre d'affectations.
pub fn apply(roster: &mut Roster, preferences: &Preferences, grid: &mut ScheduleGrid) -> usize {
    let mut placed = 0usize;

    for index in 0..roster.len() {
        let name = roster.employees()[index].name().clone();

        for (day, shift) in preferences.for_employee(name.as_str()) {
            match roster.assign(index, day, shift, grid) {
                Ok(()) => {
                    trace!(employee = %name, %day, %shift, "preference honored");
                    placed += 1;
                }
                Err(reason) => {
                    trace!(employee = %name, %day, %shift, %reason, "preference deferred");
                }
            }
        }
    }

    debug!(placed, "preference phase done");
    placed
}
