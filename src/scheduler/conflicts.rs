//! Phase 2 : repli first-fit pour les jours restés libres.

use crate::grid::ScheduleGrid;
use crate::model::{Day, Roster, ShiftKind};
use tracing::{debug, trace, warn};

/// Pour chaque employé sous le plafond, jour par jour (lundi → dimanche),
/// prend le premier créneau du jour qui a encore de la place. Ne tient plus
/// compte des préférences.
pub fn apply(roster: &mut Roster, grid: &mut ScheduleGrid) -> usize {
    let mut placed = 0usize;

    for index in 0..roster.len() {
        for day in Day::ALL {
            let employee = &roster.employees()[index];
            if !employee.has_capacity() {
                break;
            }
            if !employee.is_free_on(day) {
                continue;
            }

            let Some(shift) = ShiftKind::ALL
                .into_iter()
                .find(|s| grid.has_room(day, *s))
            else {
                continue;
            };

            let name = employee.name().clone();
            match roster.assign(index, day, shift, grid) {
                Ok(()) => {
                    trace!(employee = %name, %day, %shift, "first fit");
                    placed += 1;
                }
                Err(reason) => warn!(employee = %name, %day, %shift, %reason, "first fit refused"),
            }
        }
    }

    debug!(placed, "conflict phase done");
    placed
}
