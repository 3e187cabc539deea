use crate::model::{Day, EmployeeName, ShiftKind, SHIFT_CAPACITY};
use crate::scheduler::Refusal;

/// Grille hebdomadaire : pour chaque (jour, créneau), les employés affectés
/// dans l'ordre d'affectation. Ajout seulement, jamais de retrait.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleGrid {
    cells: [[Vec<EmployeeName>; 3]; 7],
}

impl ScheduleGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, day: Day, shift: ShiftKind) -> &[EmployeeName] {
        &self.cells[day.index()][shift.index()]
    }

    pub fn has_room(&self, day: Day, shift: ShiftKind) -> bool {
        self.cell(day, shift).len() < SHIFT_CAPACITY
    }

    /// Parcourt les postes jour par jour, créneau par créneau.
    pub fn cells(&self) -> impl Iterator<Item = (Day, ShiftKind, &[EmployeeName])> + '_ {
        Day::ALL.into_iter().flat_map(move |d| {
            ShiftKind::ALL
                .into_iter()
                .map(move |s| (d, s, self.cell(d, s)))
        })
    }

    /// Nombre total d'affectations sur la semaine.
    pub fn total_assigned(&self) -> usize {
        self.cells().map(|(_, _, names)| names.len()).sum()
    }

    /// Ajoute un nom au poste. Appelé uniquement par [`Roster::assign`](crate::Roster::assign)
    /// qui tient l'état de l'employé à jour dans le même appel.
    pub(crate) fn place(
        &mut self,
        day: Day,
        shift: ShiftKind,
        employee: &EmployeeName,
    ) -> Result<(), Refusal> {
        let cell = &mut self.cells[day.index()][shift.index()];
        if cell.len() >= SHIFT_CAPACITY {
            return Err(Refusal::CellFull { day, shift });
        }
        if cell.contains(employee) {
            return Err(Refusal::AlreadyInCell {
                employee: employee.clone(),
                day,
                shift,
            });
        }
        cell.push(employee.clone());
        Ok(())
    }
}
