#![forbid(unsafe_code)]
use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use roulement::{
    io::{self, ScheduleExport},
    model::Roster,
    report::{ScheduleRenderer, TextReport},
    scheduler::{PlanOptions, Scheduler},
};
use std::path::PathBuf;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de planning hebdomadaire (2 personnes par poste, 5 jours max)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Noms des employés
    #[arg(required = true, num_args = 1.., value_name = "NAME")]
    names: Vec<String>,

    /// Fichier de préférences (CSV `employee,day,shift` ou JSON) au lieu de la saisie
    #[arg(long)]
    preferences: Option<PathBuf>,

    /// Graine du tirage aléatoire (reproductibilité)
    #[arg(long)]
    seed: Option<u64>,

    /// Export JSON du planning
    #[arg(long)]
    out_json: Option<PathBuf>,

    /// Export CSV du planning
    #[arg(long)]
    out_csv: Option<PathBuf>,

    /// Active les logs (feature `logging`)
    #[arg(long)]
    log: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }
    #[cfg(not(feature = "logging"))]
    let _ = cli.log;

    let roster = Roster::new(&cli.names)?;
    let prefs = match &cli.preferences {
        Some(path) => io::import_preferences(path, &roster)?,
        None => {
            let stdin = std::io::stdin();
            io::collect_preferences(&roster, stdin.lock(), std::io::stderr())?
        }
    };

    let opts = PlanOptions { seed: cli.seed };
    let seed = opts.resolve_seed();
    if opts.seed.is_none() {
        eprintln!("seed: {seed}");
    }
    let mut rng = StdRng::seed_from_u64(seed);

    let mut scheduler = Scheduler::new(roster);
    scheduler.run(&prefs, &mut rng);

    print!("{}", TextReport::default().render(scheduler.grid()));

    if let Some(path) = cli.out_json {
        let export = ScheduleExport::from_grid(scheduler.grid(), Some(seed), Utc::now());
        io::export_schedule_json(path, &export)?;
    }
    if let Some(path) = cli.out_csv {
        io::export_schedule_csv(path, scheduler.grid())?;
    }
    Ok(())
}
