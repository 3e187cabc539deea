use super::{UnderFill, Violation, ViolationKind};
use crate::grid::ScheduleGrid;
use crate::model::{Day, Roster, MAX_DAYS_PER_WEEK, SHIFT_CAPACITY};
use std::collections::HashSet;

pub(super) fn under_fills(grid: &ScheduleGrid) -> Vec<UnderFill> {
    grid.cells()
        .filter(|(_, _, names)| names.len() < SHIFT_CAPACITY)
        .map(|(day, shift, names)| UnderFill {
            day,
            shift,
            assigned: names.len(),
        })
        .collect()
}

pub(super) fn check_invariants(roster: &Roster, grid: &ScheduleGrid) -> Vec<Violation> {
    let mut out = Vec::new();

    for employee in roster.employees() {
        let assigned = employee.assigned_days().count();
        if usize::from(employee.days_worked()) != assigned {
            out.push(Violation {
                kind: ViolationKind::DayCountMismatch,
                employee: Some(employee.name().clone()),
                day: None,
                shift: None,
            });
        }
        if employee.days_worked() > MAX_DAYS_PER_WEEK {
            out.push(Violation {
                kind: ViolationKind::DayCapExceeded,
                employee: Some(employee.name().clone()),
                day: None,
                shift: None,
            });
        }
        for (day, shift) in employee.assigned_days() {
            if !grid.cell(day, shift).contains(employee.name()) {
                out.push(Violation {
                    kind: ViolationKind::MissingFromCell,
                    employee: Some(employee.name().clone()),
                    day: Some(day),
                    shift: Some(shift),
                });
            }
        }
    }

    for (day, shift, names) in grid.cells() {
        if names.len() > SHIFT_CAPACITY {
            out.push(Violation {
                kind: ViolationKind::CellOverCapacity,
                employee: None,
                day: Some(day),
                shift: Some(shift),
            });
        }
        let mut seen = HashSet::new();
        for name in names {
            if !seen.insert(name) {
                out.push(Violation {
                    kind: ViolationKind::DuplicateInCell,
                    employee: Some(name.clone()),
                    day: Some(day),
                    shift: Some(shift),
                });
            }
            let matches = roster
                .find(name.as_str())
                .and_then(|e| e.shift_on(day))
                == Some(shift);
            if !matches {
                out.push(Violation {
                    kind: ViolationKind::UnexpectedInCell,
                    employee: Some(name.clone()),
                    day: Some(day),
                    shift: Some(shift),
                });
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EmployeeName, ShiftKind};

    #[test]
    fn consistent_state_has_no_violation() {
        let mut roster = Roster::new(["ann", "bob"]).unwrap();
        let mut grid = ScheduleGrid::new();
        roster.assign(0, Day::Mon, ShiftKind::Morning, &mut grid).unwrap();
        roster.assign(1, Day::Sun, ShiftKind::Evening, &mut grid).unwrap();
        assert!(check_invariants(&roster, &grid).is_empty());
    }

    #[test]
    fn grid_entry_without_assignment_is_reported() {
        let roster = Roster::new(["ann"]).unwrap();
        let mut grid = ScheduleGrid::new();
        grid.place(Day::Thu, ShiftKind::Afternoon, &EmployeeName::new("ann"))
            .unwrap();
        let violations = check_invariants(&roster, &grid);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::UnexpectedInCell);
        assert_eq!(violations[0].day, Some(Day::Thu));
    }

    #[test]
    fn under_fills_lists_every_short_cell() {
        let mut roster = Roster::new(["ann", "bob"]).unwrap();
        let mut grid = ScheduleGrid::new();
        roster.assign(0, Day::Mon, ShiftKind::Morning, &mut grid).unwrap();
        roster.assign(1, Day::Mon, ShiftKind::Morning, &mut grid).unwrap();
        let short = under_fills(&grid);
        assert_eq!(short.len(), 20);
        assert_eq!(
            short[0],
            UnderFill {
                day: Day::Mon,
                shift: ShiftKind::Afternoon,
                assigned: 0
            }
        );
    }
}
