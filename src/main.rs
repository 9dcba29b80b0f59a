mod app;
mod config;
mod domain;
mod input;
mod logging;
mod notifications;
mod persistence;
mod report;
mod scheduler;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::App;
use chrono::{Duration, Local, NaiveDate};
use clap::{Parser, Subcommand};
use config::Config;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{
    current_streak, daily_tip, day_counter, group_by_season, inventory_level, AppState,
    CongestionLevel, Exercise, InventoryLevel, LogDraft, RunnyNoseLevel, SneezingLevel, Symptoms,
    Treatments,
};
use persistence::{
    backup_file, config_file, ensure_data_dir, init_local_dir, log_file, state_file, Store,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info};

#[derive(Parser)]
#[command(name = "allerease")]
#[command(about = "A terminal tracker for daily allergy medication, symptoms and spray stock", long_about = None)]
struct Cli {
    /// Use this data directory instead of searching for .allerease
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .allerease directory in the current directory
    Init,
    /// Show today's status: day counter, dose, stock, reminder
    Status,
    /// Record today's dose (antihistamine + spray) if not logged yet
    Confirm,
    /// Save a detailed record for today, replacing any existing one
    Log {
        /// Took the antihistamine
        #[arg(long)]
        antihistamine: bool,
        /// Used the nasal spray
        #[arg(long)]
        spray: bool,
        /// Did a nasal wash
        #[arg(long)]
        wash: bool,
        /// mild, bearable or dizzying
        #[arg(long)]
        sneezing: Option<SneezingLevel>,
        /// dry, half_pack or two_packs
        #[arg(long)]
        runny_nose: Option<RunnyNoseLevel>,
        /// clear, one_side or blocked
        #[arg(long)]
        congestion: Option<CongestionLevel>,
        /// running, swimming, cycling, strength, hiking, aerobics or none
        #[arg(long)]
        exercise: Option<Exercise>,
    },
    /// Print the history grouped by season
    History,
    /// Generate an adherence report
    Report {
        /// First day (YYYY-MM-DD). Defaults to 29 days before --to.
        #[arg(short, long)]
        from: Option<String>,
        /// Last day (YYYY-MM-DD). Defaults to today.
        #[arg(short, long)]
        to: Option<String>,
        /// Output file path. Defaults to <data dir>/report-FROM_to_TO.md
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Back up the state file and start over with defaults
    Reset {
        /// Only delete the history, keep settings
        #[arg(long)]
        logs_only: bool,
    },
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e))
}

/// Open the store, telling the user how to recover from an unreadable file
fn open_store(data_dir: &Path) -> Result<Store> {
    match Store::open(state_file(data_dir)) {
        Ok(store) => Ok(store),
        Err(e) => {
            error!(error = %e, "failed to load state");
            if e.needs_reset() {
                eprintln!("Error: {}", e);
                eprintln!("Run 'allerease reset' to back up the file and start fresh.");
                std::process::exit(1);
            }
            Err(e.into())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => init(),
        command => run_command(cli.data_dir.as_deref(), command),
    }
}

/// Create .allerease in the current directory
fn init() -> Result<()> {
    let current_dir = std::env::current_dir().context("Could not determine current directory")?;
    let data_dir = init_local_dir(&current_dir)?;
    println!("Initialized data directory: {}", data_dir.display());
    println!();
    println!("AllerEase will now keep its records in this directory.");
    println!("Run 'allerease' to start.");
    Ok(())
}

fn run_command(data_dir: Option<&Path>, command: Option<Commands>) -> Result<()> {
    let data_dir = ensure_data_dir(data_dir)?;
    let config = Config::load(&config_file(&data_dir))?;
    logging::init_file_logging(&log_file(&data_dir), &config.logging.level)?;

    match command {
        Some(Commands::Init) => init(),
        Some(Commands::Status) => print_status(&open_store(&data_dir)?),
        Some(Commands::Confirm) => {
            let mut store = open_store(&data_dir)?;
            let now = Local::now();
            if store.mutate(|s| s.quick_confirm(now))? {
                info!(date = %now.date_naive(), "medication confirmed");
                println!("Logged today's medication ({}).", now.date_naive());
            } else {
                println!("Today ({}) is already logged.", now.date_naive());
            }
            Ok(())
        }
        Some(Commands::Log {
            antihistamine,
            spray,
            wash,
            sneezing,
            runny_nose,
            congestion,
            exercise,
        }) => {
            let draft = LogDraft {
                treatments: Treatments {
                    anti_histamine: antihistamine,
                    nasal_spray: spray,
                    nasal_wash: wash,
                },
                symptoms: Symptoms {
                    sneezing: sneezing.unwrap_or_default(),
                    runny_nose: runny_nose.unwrap_or_default(),
                    congestion: congestion.unwrap_or_default(),
                },
                exercise: exercise.unwrap_or_default(),
            };

            let mut store = open_store(&data_dir)?;
            let now = Local::now();
            store.mutate(|s| {
                s.save_log(draft, now);
            })?;
            info!(date = %now.date_naive(), exercise = draft.exercise.key(), "log saved");
            println!("Saved the record for {}.", now.date_naive());
            Ok(())
        }
        Some(Commands::History) => {
            print_history(open_store(&data_dir)?.state());
            Ok(())
        }
        Some(Commands::Report { from, to, output }) => {
            let to = match to {
                Some(value) => parse_date(&value)?,
                None => Local::now().date_naive(),
            };
            let from = match from {
                Some(value) => parse_date(&value)?,
                None => to - Duration::days(29),
            };

            let store = open_store(&data_dir)?;
            println!("Generating report for {} to {}...", from, to);
            let report_path = report::generate_report(
                store.state(),
                &data_dir,
                from,
                to,
                output.map(PathBuf::from),
            )?;
            println!("Report generated: {}", report_path.display());
            Ok(())
        }
        Some(Commands::Reset { logs_only }) => reset(&data_dir, logs_only),
        None => run_tui(&data_dir, &config),
    }
}

fn print_status(store: &Store) -> Result<()> {
    let state = store.state();
    let settings = &state.settings;
    let now = Local::now();
    let today = now.date_naive();

    println!(
        "Day {} of treatment (since {})",
        day_counter(settings.start_date, now),
        settings.start_date
    );
    if state.has_log_for(today) {
        println!("Today: taken");
    } else {
        println!("Today: not yet taken");
    }
    println!("Streak: {} days", current_streak(&state.logs, today));

    let warning = match inventory_level(settings) {
        InventoryLevel::Critical => " (last bottle!)",
        InventoryLevel::Low => " (running low)",
        InventoryLevel::Ok => "",
    };
    println!(
        "Spray stock: {} / {} bottles{}",
        settings.inventory_count, settings.total_bottles, warning
    );

    println!("Reminder: daily at {}", settings.reminder_time);
    if state.is_snoozed && !state.snooze_expired(now) {
        println!("Reminder snoozed");
    }
    println!();
    println!("Tip: {}", daily_tip(today));
    Ok(())
}

fn print_history(state: &AppState) {
    if state.logs.is_empty() {
        println!("No records yet.");
        return;
    }

    for group in group_by_season(&state.logs) {
        println!("{} ({})", group.season, group.logs.len());
        for log in group.logs {
            let mut line = format!("  {}  {}", log.date_string, log.treatment_badges().join(", "));
            if log.exercise != Exercise::None {
                line.push_str(&format!("  [{}]", log.exercise.label()));
            }
            if log.has_severe_symptom() {
                line.push_str("  !severe");
            }
            println!("{}", line);
        }
    }
}

fn reset(data_dir: &Path, logs_only: bool) -> Result<()> {
    let path = state_file(data_dir);

    if logs_only {
        let mut store = open_store(data_dir)?;
        let count = store.state().logs.len();
        store.mutate(|s| s.clear_logs())?;
        info!(count, "history cleared");
        println!("Deleted {} records. Settings were kept.", count);
        return Ok(());
    }

    if let Some(backup) = backup_file(&path)? {
        println!("Backed up previous state to {}", backup.display());
    }
    Store::with_state(path.clone(), AppState::default()).flush()?;
    info!(path = %path.display(), "state reset to defaults");
    println!("State reset: {}", path.display());
    Ok(())
}

fn run_tui(data_dir: &Path, config: &Config) -> Result<()> {
    // Show which directory we're using
    eprintln!("Using data directory: {}", data_dir.display());

    let mut store = open_store(data_dir)?;
    store.subscribe(|state| {
        debug!(
            logs = state.logs.len(),
            snoozed = state.is_snoozed,
            "state updated"
        )
    });
    let mut app = App::new(store, config, Box::new(notifications::TerminalHaptics));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Print any errors
    if let Err(err) = &result {
        error!(error = %err, "event loop failed");
        eprintln!("Error: {}", err);
    }

    info!("session ended");
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app, Local::now()))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key, Local::now()) {
                    return Ok(());
                }
            }
        }

        // Reminder poll
        app.tick(Instant::now(), Local::now());
    }
}
