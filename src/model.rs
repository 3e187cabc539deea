use crate::grid::ScheduleGrid;
use crate::scheduler::{Refusal, SchedError};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Nombre maximal de jours travaillés par semaine.
pub const MAX_DAYS_PER_WEEK: u8 = 5;

/// Nombre d'employés par poste (jour × créneau).
pub const SHIFT_CAPACITY: usize = 2;

/// Jour de la semaine, ordre calendaire (lundi → dimanche).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Day {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::ALL
            .into_iter()
            .find(|d| d.label() == s)
            .ok_or_else(|| SchedError::UnknownDay(s.to_string()))
    }
}

impl From<Weekday> for Day {
    fn from(w: Weekday) -> Self {
        Day::ALL[w.num_days_from_monday() as usize]
    }
}

impl From<Day> for Weekday {
    fn from(d: Day) -> Self {
        match d {
            Day::Mon => Weekday::Mon,
            Day::Tue => Weekday::Tue,
            Day::Wed => Weekday::Wed,
            Day::Thu => Weekday::Thu,
            Day::Fri => Weekday::Fri,
            Day::Sat => Weekday::Sat,
            Day::Sun => Weekday::Sun,
        }
    }
}

/// Créneau de la journée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKind {
    Morning,
    Afternoon,
    Evening,
}

impl ShiftKind {
    pub const ALL: [ShiftKind; 3] = [ShiftKind::Morning, ShiftKind::Afternoon, ShiftKind::Evening];

    pub fn label(self) -> &'static str {
        match self {
            ShiftKind::Morning => "morning",
            ShiftKind::Afternoon => "afternoon",
            ShiftKind::Evening => "evening",
        }
    }

    /// Correspondance exacte (sensible à la casse) avec un des trois libellés.
    pub fn from_label(label: &str) -> Option<Self> {
        ShiftKind::ALL.into_iter().find(|s| s.label() == label)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShiftKind {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShiftKind::from_label(s).ok_or_else(|| SchedError::UnknownShift(s.to_string()))
    }
}

/// Vrai si `label` est exactement `morning`, `afternoon` ou `evening`.
pub fn is_valid_shift(label: &str) -> bool {
    ShiftKind::from_label(label).is_some()
}

/// Identifiant fort pour Employee (le nom, unique dans le roster)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EmployeeName(String);

impl EmployeeName {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EmployeeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Employé et son état d'affectation pour la semaine.
///
/// Les champs ne sont modifiables qu'à travers [`Roster::assign`], ce qui
/// garantit `days_worked == nombre de jours affectés`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    name: EmployeeName,
    days_worked: u8,
    assignment: [Option<ShiftKind>; 7],
}

impl Employee {
    fn new(name: EmployeeName) -> Self {
        Self {
            name,
            days_worked: 0,
            assignment: [None; 7],
        }
    }

    pub fn name(&self) -> &EmployeeName {
        &self.name
    }

    pub fn days_worked(&self) -> u8 {
        self.days_worked
    }

    pub fn shift_on(&self, day: Day) -> Option<ShiftKind> {
        self.assignment[day.index()]
    }

    pub fn is_free_on(&self, day: Day) -> bool {
        self.shift_on(day).is_none()
    }

    /// Encore sous le plafond hebdomadaire.
    pub fn has_capacity(&self) -> bool {
        self.days_worked < MAX_DAYS_PER_WEEK
    }

    /// Jours affectés, ordre calendaire.
    pub fn assigned_days(&self) -> impl Iterator<Item = (Day, ShiftKind)> + '_ {
        Day::ALL
            .into_iter()
            .filter_map(|d| self.shift_on(d).map(|s| (d, s)))
    }
}

/// Équipe complète, dans l'ordre fourni au démarrage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    employees: Vec<Employee>,
}

impl Roster {
    /// Construit le roster ; les noms sont nettoyés (`trim`) et doivent être uniques.
    pub fn new<I, S>(names: I) -> Result<Self, SchedError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut employees = Vec::new();
        for raw in names {
            let name = raw.as_ref().trim();
            if name.is_empty() {
                return Err(SchedError::BlankName);
            }
            if !seen.insert(name.to_string()) {
                return Err(SchedError::DuplicateEmployee(name.to_string()));
            }
            employees.push(Employee::new(EmployeeName::new(name)));
        }
        if employees.is_empty() {
            return Err(SchedError::EmptyRoster);
        }
        Ok(Self { employees })
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.name.as_str() == name)
    }

    /// Indices des employés encore disponibles ce jour-là (sous le plafond, jour libre).
    pub fn eligible_on(&self, day: Day) -> impl Iterator<Item = usize> + '_ {
        self.employees
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.has_capacity() && e.is_free_on(day))
            .map(|(idx, _)| idx)
    }

    /// Affecte l'employé `index` au poste `(day, shift)` et l'inscrit dans la grille.
    ///
    /// Toutes les vérifications précèdent la moindre mutation : en cas de refus,
    /// ni le roster ni la grille ne changent.
    pub fn assign(
        &mut self,
        index: usize,
        day: Day,
        shift: ShiftKind,
        grid: &mut ScheduleGrid,
    ) -> Result<(), Refusal> {
        let employee = self
            .employees
            .get_mut(index)
            .ok_or(Refusal::UnknownEmployee(index))?;
        if !employee.has_capacity() {
            return Err(Refusal::DayCapReached(employee.name.clone()));
        }
        if let Some(current) = employee.shift_on(day) {
            return Err(Refusal::DayTaken {
                employee: employee.name.clone(),
                day,
                current,
            });
        }
        grid.place(day, shift, &employee.name)?;
        employee.assignment[day.index()] = Some(shift);
        employee.days_worked += 1;
        Ok(())
    }
}

/// Préférences : employé → (jour → créneau souhaité).
///
/// Les jours sont rangés dans l'ordre calendaire, ce qui fixe l'ordre de
/// traitement de la phase de préférences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences(BTreeMap<EmployeeName, BTreeMap<Day, ShiftKind>>);

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enregistre un souhait ; remplace celui déjà présent pour ce jour.
    pub fn insert(&mut self, employee: &str, day: Day, shift: ShiftKind) -> Option<ShiftKind> {
        self.0
            .entry(EmployeeName::new(employee))
            .or_default()
            .insert(day, shift)
    }

    pub fn get(&self, employee: &str, day: Day) -> Option<ShiftKind> {
        self.0.get(employee).and_then(|days| days.get(&day)).copied()
    }

    /// Souhaits d'un employé, ordre calendaire.
    pub fn for_employee<'a>(
        &'a self,
        employee: &str,
    ) -> impl Iterator<Item = (Day, ShiftKind)> + 'a {
        self.0
            .get(employee)
            .into_iter()
            .flat_map(|days| days.iter().map(|(d, s)| (*d, *s)))
    }

    /// Nombre total de souhaits (employé, jour).
    pub fn len(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_labels_are_case_sensitive() {
        assert!(is_valid_shift("morning"));
        assert!(is_valid_shift("evening"));
        assert!(!is_valid_shift("Morning"));
        assert!(!is_valid_shift(" morning"));
        assert!(!is_valid_shift(""));
        assert!(!is_valid_shift("night"));
    }

    #[test]
    fn day_parsing_and_weekday_conversion() {
        assert_eq!("Wed".parse::<Day>().unwrap(), Day::Wed);
        assert!("wed".parse::<Day>().is_err());
        assert_eq!(Day::from(Weekday::Sun), Day::Sun);
        assert_eq!(Weekday::from(Day::Mon), Weekday::Mon);
        assert!(Day::Mon < Day::Sun);
    }

    #[test]
    fn roster_rejects_bad_names() {
        assert!(matches!(
            Roster::new(Vec::<String>::new()),
            Err(SchedError::EmptyRoster)
        ));
        assert!(matches!(Roster::new(["ann", "  "]), Err(SchedError::BlankName)));
        assert!(matches!(
            Roster::new(["ann", " ann"]),
            Err(SchedError::DuplicateEmployee(n)) if n == "ann"
        ));
    }

    #[test]
    fn preferences_iterate_in_calendar_order() {
        let mut prefs = Preferences::new();
        prefs.insert("ann", Day::Fri, ShiftKind::Evening);
        prefs.insert("ann", Day::Mon, ShiftKind::Morning);
        prefs.insert("ann", Day::Wed, ShiftKind::Afternoon);
        let days: Vec<Day> = prefs.for_employee("ann").map(|(d, _)| d).collect();
        assert_eq!(days, vec![Day::Mon, Day::Wed, Day::Fri]);
        assert_eq!(prefs.for_employee("bob").count(), 0);
        assert_eq!(prefs.len(), 3);
    }

    #[test]
    fn refused_assignment_leaves_state_untouched() {
        let mut roster = Roster::new(["ann", "bob", "cid"]).unwrap();
        let mut grid = ScheduleGrid::new();
        roster.assign(0, Day::Mon, ShiftKind::Morning, &mut grid).unwrap();
        roster.assign(1, Day::Mon, ShiftKind::Morning, &mut grid).unwrap();

        let before = (roster.clone(), grid.clone());
        let err = roster
            .assign(2, Day::Mon, ShiftKind::Morning, &mut grid)
            .unwrap_err();
        assert!(matches!(err, Refusal::CellFull { .. }));
        let err = roster
            .assign(0, Day::Mon, ShiftKind::Evening, &mut grid)
            .unwrap_err();
        assert!(matches!(err, Refusal::DayTaken { current: ShiftKind::Morning, .. }));
        assert_eq!(before, (roster, grid));
    }

    #[test]
    fn day_cap_is_enforced() {
        let mut roster = Roster::new(["ann"]).unwrap();
        let mut grid = ScheduleGrid::new();
        for day in &Day::ALL[..5] {
            roster.assign(0, *day, ShiftKind::Evening, &mut grid).unwrap();
        }
        let err = roster
            .assign(0, Day::Sat, ShiftKind::Evening, &mut grid)
            .unwrap_err();
        assert!(matches!(err, Refusal::DayCapReached(_)));
        assert_eq!(roster.employees()[0].days_worked(), MAX_DAYS_PER_WEEK);
        assert!(grid.cell(Day::Sat, ShiftKind::Evening).is_empty());
    }
}
