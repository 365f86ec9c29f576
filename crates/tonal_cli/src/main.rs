//! tonal: spell, transform and lay out musical scales from the terminal
//!
//! - `scale`: resolve a scale and show its degrees and context status
//! - `layout`: project a scale onto an instrument's rows
//! - `notes`: list the selectable tonic spellings
//! - `instruments`: list preset and configured instruments
//! - `explore`: fold explorer actions from a starting state and show the view

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use tracing::Level;

use tonal_core::note::CHROMATIC_SPELLINGS;
use tonal_core::{
    Action, ExplorerState, ExplorerView, InstrumentSet, IntervalPattern, LayoutRow, NoteName,
    Origin, PitchClass, ResolvedScale, apply_degree_rotation, apply_harmonic_transform,
    map_scale_to_layout, resolve_scale, scale_to_map,
};

/// Spell, transform and lay out musical scales
#[derive(Parser)]
#[command(name = "tonal")]
#[command(about = "Resolve diatonic scales and project them onto instruments")]
#[command(version)]
struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "table")]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Instrument config file (default: <config dir>/tonal/instruments.json)
    #[arg(long, global = true, env = "TONAL_INSTRUMENTS")]
    instruments: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Args, Clone, Debug)]
struct ScaleArgs {
    /// Tonic, e.g. "C", "F♯" or "Bb"
    #[arg(short, long, default_value = "C")]
    tonic: NoteName,

    /// Interval pattern in semitones
    #[arg(short, long, default_value = "2 2 1 2 2 2 1")]
    pattern: IntervalPattern,

    /// Read the pattern starting from this step
    #[arg(long, default_value_t = 0)]
    mode_shift: usize,

    /// Re-anchor the scale on this member (0-based)
    #[arg(long, default_value_t = 0)]
    rotate: usize,

    /// Move the tonal center by this many semitones
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    transform: i32,
}

impl ScaleArgs {
    /// Scale after the modal shift and context transform, before rotation.
    fn home(&self) -> ResolvedScale {
        let base = resolve_scale(self.tonic, &self.pattern, self.mode_shift);
        apply_harmonic_transform(&base, self.transform)
    }

    /// Rows for `origins`, or `None` when the context transform is out of range.
    fn project(
        &self,
        origins: &[Origin],
        hidden: &BTreeSet<usize>,
    ) -> (ResolvedScale, Option<Vec<LayoutRow>>) {
        let home = self.home();
        let resolved = apply_degree_rotation(&home, self.rotate);
        let rows = home.can_transform().then(|| {
            map_scale_to_layout(&scale_to_map(resolved.scale()), origins)
                .iter()
                .map(|row| row.hide_degrees(hidden))
                .collect()
        });
        (home, rows)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a scale and print its degrees
    Scale(ScaleArgs),

    /// Project a scale onto an instrument
    Layout {
        #[command(flatten)]
        scale: ScaleArgs,

        /// Instrument preset or configured instrument
        #[arg(short, long, default_value = "guitar")]
        instrument: String,

        /// Row origins overriding the instrument, e.g. --origin E4 --origin B3
        #[arg(long = "origin")]
        origins: Vec<Origin>,

        /// Scale degrees to hide
        #[arg(long = "hide")]
        hidden: Vec<usize>,
    },

    /// List the selectable tonic spellings
    Notes,

    /// List preset and configured instruments
    Instruments,

    /// Fold explorer actions (tonic+1, mode-1, degree+2, context+7, toggle:4,
    /// origin:0=D4, pattern:2 1 2 2 1 2 2) and print the resulting view
    Explore {
        /// Action to apply; repeat to apply several in order
        #[arg(short, long = "action")]
        actions: Vec<Action>,

        /// Starting state as JSON (default: C major on guitar)
        #[arg(long)]
        state: Option<PathBuf>,

        /// Start from this instrument's origins
        #[arg(short, long)]
        instrument: Option<String>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn default_instruments_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tonal").join("instruments.json"))
}

fn load_instruments(explicit: Option<&Path>) -> Result<InstrumentSet> {
    let presets = InstrumentSet::presets();
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_instruments_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(presets),
        },
    };

    let source = fs::read_to_string(&path)
        .with_context(|| format!("failed to read instruments file {}", path.display()))?;
    let configured = InstrumentSet::from_json(&source)
        .with_context(|| format!("invalid instruments file {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        count = configured.instruments.len(),
        "loaded instruments"
    );
    Ok(presets.merge(configured))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn join_notes(notes: &[NoteName]) -> String {
    notes
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_context(resolved: &ResolvedScale) {
    let targets = join_notes(resolved.transform_targets());
    if resolved.can_transform() {
        println!("context: {} {}", "reachable".green(), targets.cyan());
    } else {
        println!(
            "context: {} {}",
            "out of range".red(),
            format!("no spelling of {} contains the center", targets).dimmed()
        );
    }
}

fn print_scale_table(home: &ResolvedScale, resolved: &ResolvedScale) {
    println!("pattern: {}", resolved.interval_pattern().to_string().cyan());
    print_context(home);
    println!();
    println!("{:>8} {:>6} {:>4}", "DEGREE", "NOTE", "PC");
    println!("{}", "-".repeat(20));
    for member in resolved.scale() {
        println!(
            "{:>8} {:>6} {:>4}",
            member.degree.to_string().dimmed(),
            member.note.to_string().yellow(),
            member.pitch_class.to_string()
        );
    }
}

fn print_layout_table(rows: &[LayoutRow]) {
    // One width for every row so the columns line up across strings
    let width = rows.iter().map(LayoutRow::cell_width).max().unwrap_or(0);
    for row in rows {
        println!(
            "{:>5} {}",
            row.origin.to_string().cyan(),
            row.render_with_width(width)
        );
    }
}

fn cmd_scale(args: &ScaleArgs, format: OutputFormat) -> Result<()> {
    let home = args.home();
    let resolved = apply_degree_rotation(&home, args.rotate);
    match format {
        OutputFormat::Table => print_scale_table(&home, &resolved),
        OutputFormat::Json => print_json(&serde_json::json!({
            "home": home,
            "resolved": resolved,
        }))?,
    }
    Ok(())
}

fn cmd_layout(
    args: &ScaleArgs,
    instruments: &InstrumentSet,
    instrument: &str,
    origins: Vec<Origin>,
    hidden: Vec<usize>,
    format: OutputFormat,
) -> Result<()> {
    let origins = if origins.is_empty() {
        instruments
            .find(instrument)
            .map(|found| found.origins.clone())
            .ok_or_else(|| anyhow!("unknown instrument '{}'", instrument))?
    } else {
        origins
    };
    let hidden: BTreeSet<usize> = hidden.into_iter().collect();

    let (home, rows) = args.project(&origins, &hidden);

    match format {
        OutputFormat::Table => {
            print_context(&home);
            if let Some(rows) = &rows {
                println!();
                print_layout_table(rows);
            }
        }
        OutputFormat::Json => print_json(&rows)?,
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpellingEntry {
    note: NoteName,
    pitch_class: PitchClass,
}

fn cmd_notes(format: OutputFormat) -> Result<()> {
    let entries: Vec<SpellingEntry> = CHROMATIC_SPELLINGS
        .iter()
        .map(|&note| SpellingEntry {
            note,
            pitch_class: note.pitch_class(),
        })
        .collect();

    match format {
        OutputFormat::Table => {
            println!("{:>6} {:>4}", "NOTE", "PC");
            println!("{}", "-".repeat(12));
            for entry in &entries {
                println!(
                    "{:>6} {:>4}",
                    entry.note.to_string().yellow(),
                    entry.pitch_class.to_string().dimmed()
                );
            }
        }
        OutputFormat::Json => print_json(&entries)?,
    }
    Ok(())
}

fn cmd_instruments(instruments: &InstrumentSet, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{:>12} {}", "INSTRUMENT", "ORIGINS");
            println!("{}", "-".repeat(40));
            for instrument in &instruments.instruments {
                let origins = instrument
                    .origins
                    .iter()
                    .map(|o| o.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("{:>12} {}", instrument.name.cyan(), origins);
            }
        }
        OutputFormat::Json => print_json(instruments)?,
    }
    Ok(())
}

fn print_view_table(state: &ExplorerState, view: &ExplorerView) {
    println!(
        "tonic {}  pattern {}  mode {}  degree {}  context +{}",
        state.tonic.to_string().yellow(),
        state.interval_pattern.to_string().cyan(),
        state.modal_shift,
        state.degree_rotation,
        state.context_offset
    );
    println!("home:     {}", join_notes(&view.home.note_names()));
    println!("resolved: {}", join_notes(&view.resolved.note_names()));
    print_context(&view.home);
    if let Some(rows) = &view.layout {
        println!();
        print_layout_table(rows);
    }
}

fn cmd_explore(
    actions: &[Action],
    state_path: Option<&Path>,
    instrument: Option<&str>,
    instruments: &InstrumentSet,
    format: OutputFormat,
) -> Result<()> {
    let mut state = match state_path {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read state file {}", path.display()))?;
            serde_json::from_str(&source)
                .with_context(|| format!("invalid state file {}", path.display()))?
        }
        None => ExplorerState::default(),
    };

    if let Some(name) = instrument {
        state.origins = instruments
            .find(name)
            .map(|found| found.origins.clone())
            .ok_or_else(|| anyhow!("unknown instrument '{}'", name))?;
    }

    for action in actions {
        tracing::debug!(action = %action, "applying action");
        state = state.reduce(action);
    }
    let view = state.view();

    match format {
        OutputFormat::Table => print_view_table(&state, &view),
        OutputFormat::Json => print_json(&serde_json::json!({
            "state": state,
            "view": view,
        }))?,
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Scale(args) => cmd_scale(&args, cli.format),
        Commands::Layout {
            scale,
            instrument,
            origins,
            hidden,
        } => {
            let instruments = load_instruments(cli.instruments.as_deref())?;
            cmd_layout(&scale, &instruments, &instrument, origins, hidden, cli.format)
        }
        Commands::Notes => cmd_notes(cli.format),
        Commands::Instruments => {
            let instruments = load_instruments(cli.instruments.as_deref())?;
            cmd_instruments(&instruments, cli.format)
        }
        Commands::Explore {
            actions,
            state,
            instrument,
        } => {
            let instruments = load_instruments(cli.instruments.as_deref())?;
            cmd_explore(
                &actions,
                state.as_deref(),
                instrument.as_deref(),
                &instruments,
                cli.format,
            )
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}
