use crate::grid::ScheduleGrid;
use crate::model::{Day, EmployeeName, Preferences, Roster, ShiftKind};
use crate::scheduler::{under_fills, UnderFill};
use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Saisie interactive : pour chaque employé, un créneau par jour (ordre calendaire).
///
/// Seul le libellé exact est retenu (casse et espaces compris) ; une réponse
/// vide ou hors libellé vaut « pas de préférence ». Une entrée
/// épuisée (EOF) vaut réponse vide pour les jours restants.
pub fn collect_preferences<R: BufRead, W: Write>(
    roster: &Roster,
    mut input: R,
    mut prompt: W,
) -> anyhow::Result<Preferences> {
    let mut prefs = Preferences::new();
    let mut line = String::new();
    for employee in roster.employees() {
        writeln!(prompt, "Enter preferences for {}", employee.name())?;
        for day in Day::ALL {
            write!(prompt, "{day} shift (morning/afternoon/evening or enter to skip): ")?;
            prompt.flush()?;
            line.clear();
            input
                .read_line(&mut line)
                .with_context(|| format!("reading preference of {} for {day}", employee.name()))?;
            let answer = line.trim_end_matches(['\r', '\n']);
            match ShiftKind::from_label(answer) {
                Some(shift) => {
                    prefs.insert(employee.name().as_str(), day, shift);
                }
                None if !answer.is_empty() => {
                    debug!(employee = %employee.name(), %day, answer, "ignored shift label");
                }
                None => {}
            }
        }
    }
    Ok(prefs)
}

/// Import de préférences depuis un fichier : CSV si extension `.csv`, JSON sinon.
pub fn import_preferences<P: AsRef<Path>>(
    path: P,
    roster: &Roster,
) -> anyhow::Result<Preferences> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if is_csv {
        import_preferences_csv(path, roster)
    } else {
        import_preferences_json(path, roster)
    }
}

/// Import CSV: header `employee,day,shift`
///
/// Employé hors roster ou créneau invalide : ligne ignorée. Jour inconnu : erreur.
pub fn import_preferences_csv<P: AsRef<Path>>(
    path: P,
    roster: &Roster,
) -> anyhow::Result<Preferences> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut prefs = Preferences::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let employee = rec.get(0).context("missing employee")?.trim();
        let day = rec.get(1).context("missing day")?.trim();
        let shift = rec.get(2).unwrap_or("").trim();
        keep_preference(&mut prefs, roster, employee, day, shift)
            .with_context(|| format!("invalid preference row {}", row + 1))?;
    }
    Ok(prefs)
}

/// Import JSON: `{ "alice": { "Mon": "morning", "Wed": "evening" } }`
pub fn import_preferences_json<P: AsRef<Path>>(
    path: P,
    roster: &Roster,
) -> anyhow::Result<Preferences> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let raw: BTreeMap<String, BTreeMap<String, String>> =
        serde_json::from_slice(&data).with_context(|| "parsing preferences json")?;
    let mut prefs = Preferences::new();
    for (employee, days) in &raw {
        for (day, shift) in days {
            keep_preference(&mut prefs, roster, employee.trim(), day.trim(), shift.trim())
                .with_context(|| format!("invalid preference for {employee}"))?;
        }
    }
    Ok(prefs)
}

fn keep_preference(
    prefs: &mut Preferences,
    roster: &Roster,
    employee: &str,
    day: &str,
    shift: &str,
) -> anyhow::Result<()> {
    if roster.find(employee).is_none() {
        warn!(employee, "preference for unknown employee dropped");
        return Ok(());
    }
    let day: Day = day.parse()?;
    match ShiftKind::from_label(shift) {
        Some(shift) => {
            if let Some(previous) = prefs.insert(employee, day, shift) {
                debug!(employee, %day, %previous, %shift, "preference overridden");
            }
        }
        None if shift.is_empty() => {}
        None => debug!(employee, %day, shift, "ignored shift label"),
    }
    Ok(())
}

/// Planning exporté (JSON).
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleExport {
    pub generated_at: DateTime<Utc>,
    pub seed: Option<u64>,
    pub days: Vec<DayExport>,
    pub under_filled: Vec<UnderFill>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayExport {
    pub day: Day,
    pub shifts: Vec<ShiftExport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShiftExport {
    pub shift: ShiftKind,
    pub employees: Vec<EmployeeName>,
}

impl ScheduleExport {
    pub fn from_grid(grid: &ScheduleGrid, seed: Option<u64>, generated_at: DateTime<Utc>) -> Self {
        let days = Day::ALL
            .into_iter()
            .map(|day| DayExport {
                day,
                shifts: ShiftKind::ALL
                    .into_iter()
                    .map(|shift| ShiftExport {
                        shift,
                        employees: grid.cell(day, shift).to_vec(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            generated_at,
            seed,
            days,
            under_filled: under_fills(grid),
        }
    }
}

/// Export JSON du planning, écrit de manière atomique.
pub fn export_schedule_json<P: AsRef<Path>>(
    path: P,
    export: &ScheduleExport,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        bail!("empty output path");
    }
    let json = serde_json::to_vec_pretty(export)?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).with_context(|| "atomic rename")?;
    Ok(())
}

/// Export CSV: header `day,shift,slot,employee`, une ligne par affectation
pub fn export_schedule_csv<P: AsRef<Path>>(path: P, grid: &ScheduleGrid) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["day", "shift", "slot", "employee"])?;
    for (day, shift, names) in grid.cells() {
        for (slot, name) in names.iter().enumerate() {
            let slot = (slot + 1).to_string();
            w.write_record([day.label(), shift.label(), slot.as_str(), name.as_str()])?;
        }
    }
    w.flush()?;
    Ok(())
}
