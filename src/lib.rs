#![forbid(unsafe_code)]
//! Roulement — répartition hebdomadaire d'une équipe sur des postes (matin, après-midi, soir).
//!
//! - Deux employés par poste, cinq jours maximum par employé.
//! - Trois phases gloutonnes : préférences, repli first-fit, tirage aléatoire.
//! - Aucune I/O dans le cœur ; saisie et rendu dans `io` et `report`.

pub mod grid;
pub mod io;
pub mod model;
pub mod report;
pub mod scheduler;

pub use grid::ScheduleGrid;
pub use model::{
    is_valid_shift, Day, Employee, EmployeeName, Preferences, Roster, ShiftKind,
    MAX_DAYS_PER_WEEK, SHIFT_CAPACITY,
};
pub use report::{ScheduleRenderer, TextReport};
pub use scheduler::{
    PlanOptions, Refusal, RunSummary, SchedError, Scheduler, UnderFill, Violation, ViolationKind,
};
