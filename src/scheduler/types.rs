use crate::model::{Day, EmployeeName, ShiftKind, MAX_DAYS_PER_WEEK, SHIFT_CAPACITY};
use serde::Serialize;
use thiserror::Error;

/// Options de planification
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    /// Graine du remplissage aléatoire ; tirée au hasard si absente.
    pub seed: Option<u64>,
}

impl PlanOptions {
    /// Graine effective pour ce run (une seule par run).
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// Motif de refus d'une affectation. Les phases le traitent comme un simple saut.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Refusal {
    #[error("{0} already works {} days", MAX_DAYS_PER_WEEK)]
    DayCapReached(EmployeeName),
    #[error("{employee} already works {current} on {day}")]
    DayTaken {
        employee: EmployeeName,
        day: Day,
        current: ShiftKind,
    },
    #[error("{day} {shift} already holds {} employees", SHIFT_CAPACITY)]
    CellFull { day: Day, shift: ShiftKind },
    #[error("{employee} already listed on {day} {shift}")]
    AlreadyInCell {
        employee: EmployeeName,
        day: Day,
        shift: ShiftKind,
    },
    #[error("unknown employee index: {0}")]
    UnknownEmployee(usize),
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("roster needs at least one employee")]
    EmptyRoster,
    #[error("employee name cannot be blank")]
    BlankName,
    #[error("duplicate employee name: {0}")]
    DuplicateEmployee(String),
    #[error("unknown day label: {0}")]
    UnknownDay(String),
    #[error("unknown shift label: {0}")]
    UnknownShift(String),
}

/// Nombre d'affectations réalisées par chaque phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub preferred: usize,
    pub resolved: usize,
    pub filled: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.preferred + self.resolved + self.filled
    }
}

/// Poste resté sous sa capacité faute de candidat. Issue valide, pas une erreur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnderFill {
    pub day: Day,
    pub shift: ShiftKind,
    pub assigned: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    DayCountMismatch, // days_worked ≠ jours affectés
    DayCapExceeded,
    CellOverCapacity,
    DuplicateInCell,
    MissingFromCell,  // affecté mais absent de la grille
    UnexpectedInCell, // présent dans la grille sans affectation correspondante
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub employee: Option<EmployeeName>,
    pub day: Option<Day>,
    pub shift: Option<ShiftKind>,
}
