//! Phase 3 : complète les postes incomplets par tirage aléatoire.

use crate::grid::ScheduleGrid;
use crate::model::{Day, Roster, ShiftKind};
use rand::Rng;
use tracing::{debug, trace, warn};

/// Pour chaque poste sous sa capacité, tire uniformément parmi les employés
/// encore éligibles ce jour-là jusqu'à remplir le poste ou épuiser les
/// candidats. Le générateur est fourni par l'appelant, semé une fois par run.
pub fn apply<R: Rng>(roster: &mut Roster, grid: &mut ScheduleGrid, rng: &mut R) -> usize {
    let mut placed = 0usize;

    for day in Day::ALL {
        for shift in ShiftKind::ALL {
            while grid.has_room(day, shift) {
                let candidates: Vec<usize> = roster.eligible_on(day).collect();
                if candidates.is_empty() {
                    debug!(%day, %shift, assigned = grid.cell(day, shift).len(), "under-filled");
                    break;
                }

                let chosen = candidates[rng.random_range(0..candidates.len())];
                let name = roster.employees()[chosen].name().clone();
                if let Err(reason) = roster.assign(chosen, day, shift, grid) {
                    // un candidat éligible ne peut être refusé que si la grille est incohérente
                    warn!(employee = %name, %day, %shift, %reason, "random pick refused");
                    break;
                }
                trace!(employee = %name, %day, %shift, "random pick");
                placed += 1;
            }
        }
    }

    debug!(placed, "fill phase done");
    placed
}
