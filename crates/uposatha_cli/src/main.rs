use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow, bail};
use chrono::{Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uposatha_config::UposathaConfig;
use uposatha_search::{
    ObservanceDay, ObservanceView, classify, month_observances, next_occurrence_within,
    year_observances,
};
use uposatha_store::{
    FileKv, ObservanceLog, ObservanceRecord, PracticeLevel, PracticeMinutes, RecordStore,
    SkipReason, compute_stats, create_backup, restore_backup, sync_missed_within,
    validate_backup,
};
use uposatha_vedic::{AlmanacOracle, GeoLocation};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "uposatha", version, about = "Uposatha observance calendar and tracker")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, env = "UPOSATHA_CONFIG")]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a date (default: today)
    Status {
        /// Civil date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
    /// Next Uposatha on or after a date
    Next {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
    /// All Uposatha days in a month
    Month {
        #[arg(long)]
        year: i32,
        /// Month number (1-12)
        #[arg(long)]
        month: u32,
        #[arg(long)]
        json: bool,
    },
    /// All Uposatha days in a year
    Year {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        json: bool,
    },
    /// Record an observed Uposatha
    Observe {
        #[arg(long)]
        date: Option<NaiveDate>,
        /// full, partial or minimal
        #[arg(long)]
        level: Option<PracticeLevel>,
        /// Precept or practice tag (repeatable)
        #[arg(long = "precept")]
        precepts: Vec<String>,
        #[arg(long, default_value_t = 0)]
        meditation: u32,
        #[arg(long, default_value_t = 0)]
        chanting: u32,
        #[arg(long, default_value_t = 0)]
        study: u32,
        /// Self-rated quality (1-5)
        #[arg(long)]
        quality: Option<u8>,
        #[arg(long)]
        reflection: Option<String>,
    },
    /// Record a skipped Uposatha
    Skip {
        #[arg(long)]
        date: Option<NaiveDate>,
        /// work, travel, health, forgot or other
        #[arg(long)]
        reason: SkipReason,
        #[arg(long)]
        note: Option<String>,
    },
    /// Delete a record by id
    Delete {
        #[arg(long)]
        id: Uuid,
    },
    /// List records, most recent first
    History {
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Observance rate, streaks and breakdowns
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Mark untracked past Uposatha days as forgotten
    Sync {
        /// Treat this date as today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Write a backup file
    Export {
        #[arg(long)]
        out: PathBuf,
    },
    /// Replace history from a backup file
    Import {
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete all records
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

struct App {
    config: UposathaConfig,
    oracle: AlmanacOracle,
    location: GeoLocation,
}

impl App {
    fn new(config: UposathaConfig) -> Self {
        let location = config.observer.location();
        Self {
            config,
            oracle: AlmanacOracle::default(),
            location,
        }
    }

    /// Current civil date at the observer's local mean time.
    fn today(&self) -> NaiveDate {
        let offset = Duration::seconds((self.location.longitude_deg * 240.0) as i64);
        (Utc::now() + offset).date_naive()
    }

    fn open_store(&self) -> anyhow::Result<ObservanceLog<FileKv>> {
        let dir = self.config.store.resolved_data_dir();
        let kv = FileKv::open(&dir)
            .with_context(|| format!("cannot open data directory {}", dir.display()))?;
        Ok(ObservanceLog::new(kv))
    }

    fn observance_phase(&self, date: NaiveDate) -> anyhow::Result<uposatha_search::MoonPhase> {
        let status = classify(&self.oracle, date, &self.location)?;
        status
            .moon_phase()
            .filter(|_| status.is_uposatha())
            .ok_or_else(|| {
                anyhow!(
                    "{date} is not an Uposatha day ({})",
                    uposatha_search::display_label(&status)
                )
            })
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_days(days: &[ObservanceDay], json: bool) -> anyhow::Result<()> {
    if json {
        let views: Vec<_> = days.iter().map(|d| ObservanceView::from_status(&d.status)).collect();
        return print_json(&views);
    }
    if days.is_empty() {
        println!("No Uposatha days found");
    }
    for day in days {
        println!("{}  {}", day.date, ObservanceView::from_status(&day.status).label);
    }
    Ok(())
}

fn print_status(view: &ObservanceView) {
    println!("Date:    {}", view.date);
    println!("Day:     {}", view.label);
    if let (Some(rise), Some(set)) = (view.sunrise, view.sunset) {
        println!("Sunrise: {} UTC", rise.format("%H:%M"));
        println!("Sunset:  {} UTC", set.format("%H:%M"));
    }
}

fn write_backup(path: &Path, app: &App) -> anyhow::Result<usize> {
    let store = app.open_store()?;
    let payload = create_backup(&store, env!("CARGO_PKG_VERSION"), Utc::now())?;
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))?;
    Ok(payload.data.uposatha_observances.len())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = UposathaConfig::load_or_default(cli.config.as_deref())?;
    info!(observer = %config.observer.name, "using observer location");
    let app = App::new(config);

    match cli.command {
        Commands::Status { date, json } => {
            let date = date.unwrap_or_else(|| app.today());
            let status = classify(&app.oracle, date, &app.location)?;
            let view = ObservanceView::from_status(&status);
            if json {
                print_json(&view)?;
            } else {
                print_status(&view);
            }
        }

        Commands::Next { date, json } => {
            let start = date.unwrap_or_else(|| app.today());
            let max_days = app.config.search.max_forward_days;
            match next_occurrence_within(&app.oracle, start, &app.location, max_days)? {
                Some(day) => print_days(&[day], json)?,
                None => bail!("no Uposatha within {max_days} days of {start}"),
            }
        }

        Commands::Month { year, month, json } => {
            let days = month_observances(&app.oracle, year, month, &app.location)?;
            print_days(&days, json)?;
        }

        Commands::Year { year, json } => {
            let days = year_observances(&app.oracle, year, &app.location)?;
            print_days(&days, json)?;
        }

        Commands::Observe {
            date,
            level,
            precepts,
            meditation,
            chanting,
            study,
            quality,
            reflection,
        } => {
            let date = date.unwrap_or_else(|| app.today());
            let phase = app.observance_phase(date)?;
            let mut record = ObservanceRecord::observed(date, phase, Utc::now())
                .with_precepts(precepts);
            if let Some(level) = level {
                record = record.with_level(level);
            }
            let minutes = PracticeMinutes {
                meditation,
                chanting,
                study,
            };
            if minutes.total() > 0 {
                record = record.with_practice_minutes(minutes);
            }
            if let Some(q) = quality {
                record = record.with_quality(q);
            }
            if let Some(text) = reflection {
                record = record.with_reflection(text);
            }
            let id = record.id;
            app.open_store()?.put(record)?;
            println!("Recorded observance for {date} ({id})");
        }

        Commands::Skip { date, reason, note } => {
            let date = date.unwrap_or_else(|| app.today());
            let phase = app.observance_phase(date)?;
            let mut record = ObservanceRecord::skipped(date, phase, reason, Utc::now());
            if let Some(note) = note {
                record = record.with_skip_note(note);
            }
            let id = record.id;
            app.open_store()?.put(record)?;
            println!("Recorded skip for {date} ({}, {id})", reason.name());
        }

        Commands::Delete { id } => {
            if !app.open_store()?.delete(id)? {
                bail!("no record with id {id}");
            }
            println!("Deleted {id}");
        }

        Commands::History { limit, json } => {
            let mut records = app.open_store()?.history()?;
            if let Some(n) = limit {
                records.truncate(n);
            }
            if json {
                return print_json(&records);
            }
            if records.is_empty() {
                println!("No observances recorded");
            }
            for r in &records {
                let detail = match (r.level, r.skip_reason) {
                    (Some(level), _) => level.name(),
                    (None, Some(reason)) => reason.name(),
                    (None, None) => "-",
                };
                println!(
                    "{}  {:<11} {:<8} {:<8} {}",
                    r.date,
                    r.moon_phase.name(),
                    if r.is_observed() { "observed" } else { "skipped" },
                    detail,
                    r.id
                );
            }
        }

        Commands::Stats { json } => {
            let stats = compute_stats(&app.open_store()?.get_all()?);
            if json {
                return print_json(&stats);
            }
            println!("Tracked:        {}", stats.total_tracked);
            println!("Observed:       {}", stats.observed);
            println!("Skipped:        {}", stats.skipped);
            println!("Rate:           {:.2}%", stats.rate);
            println!("Current streak: {}", stats.current_streak);
            println!("Longest streak: {}", stats.longest_streak);
            for phase in uposatha_search::ALL_MOON_PHASES {
                let t = stats.by_moon_phase.get(phase);
                println!("  {:<12} {}/{}", phase.name(), t.observed, t.total);
            }
            for m in &stats.monthly {
                println!("  {}      {}/{}", m.month, m.observed, m.total);
            }
        }

        Commands::Sync { date } => {
            let today = date.unwrap_or_else(|| app.today());
            let mut store = app.open_store()?;
            let inserted = sync_missed_within(
                &mut store,
                &app.oracle,
                &app.location,
                today,
                Utc::now(),
                app.config.search.backfill_days,
            )?;
            println!("Backfilled {} missed observance(s)", inserted.len());
            for r in &inserted {
                println!("  {}  {}", r.date, r.moon_phase.name());
            }
        }

        Commands::Export { out } => {
            let n = write_backup(&out, &app)?;
            println!("Exported {n} observance(s) to {}", out.display());
        }

        Commands::Import { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("cannot read {}", file.display()))?;
            let payload = validate_backup(&raw, Utc::now())?;
            let n = restore_backup(&mut app.open_store()?, payload)?;
            println!("Restored {n} observance(s)");
        }

        Commands::Clear { yes } => {
            if !yes {
                bail!("refusing to delete all records without --yes");
            }
            app.open_store()?.clear()?;
            println!("History cleared");
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
