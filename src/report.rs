use crate::grid::ScheduleGrid;
use crate::model::{Day, ShiftKind, SHIFT_CAPACITY};
use crate::scheduler::under_fills;
use std::fmt::Write;

/// Permet de customiser le rendu du planning (terminal, mail, etc.).
pub trait ScheduleRenderer {
    fn render(&self, grid: &ScheduleGrid) -> String;
}

/// Rendu texte : un bloc par jour, une ligne par créneau.
#[derive(Debug, Clone, Copy)]
pub struct TextReport {
    /// Ajoute la liste des postes incomplets en fin de rapport.
    pub list_under_fills: bool,
}

impl Default for TextReport {
    fn default() -> Self {
        Self {
            list_under_fills: true,
        }
    }
}

impl TextReport {
    pub fn grid_only() -> Self {
        Self {
            list_under_fills: false,
        }
    }
}

impl ScheduleRenderer for TextReport {
    fn render(&self, grid: &ScheduleGrid) -> String {
        let mut out = String::new();
        for day in Day::ALL {
            let _ = writeln!(out, "{day}");
            for shift in ShiftKind::ALL {
                let list = grid
                    .cell(day, shift)
                    .iter()
                    .map(|n| n.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                let _ = writeln!(out, "  {shift} : [{list}]");
            }
            out.push('\n');
        }

        if self.list_under_fills {
            let short = under_fills(grid);
            if !short.is_empty() {
                out.push_str("Under-filled:\n");
                for u in short {
                    let _ = writeln!(
                        out,
                        "  {} {} ({}/{})",
                        u.day, u.shift, u.assigned, SHIFT_CAPACITY
                    );
                }
            }
        }
        out
    }
}
