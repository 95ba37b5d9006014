pub mod menu;
pub mod output;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use menu::Menu;
use output::{print_chart, print_entries, print_summary, Palette};
use tracing::{debug, level_filters::LevelFilter};

use crate::{
    store::{
        entities::{fixture_entries, MetricEntry},
        record_store::RecordStore,
    },
    utils::{
        clock::DefaultClock,
        dir::create_application_default_path,
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "healthlog", version, long_about = None)]
#[command(about = "Log of daily steps, calories burned and sleep", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Option<Commands>,
    #[arg(long = "log-filter", help = "Log level. By default RUST_LOG or info is used")]
    log: Option<LevelFilter>,
    #[arg(long = "log-console", help = "Mirror logs to stderr")]
    log_console: bool,
    #[arg(
        long = "log-dir",
        help = "Directory for log files. By default tries to save into $XDG_STATE_HOME/healthlog/logs or $HOME/.local/state/healthlog/logs"
    )]
    log_dir: Option<PathBuf>,
    #[arg(long = "no-color", help = "Print without ANSI colors")]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Interactive menu for adding and reviewing records. Used by default")]
    Menu {
        #[command(flatten)]
        source: EntrySource,
    },
    #[command(about = "Print all records as a table")]
    List {
        #[command(flatten)]
        report: ReportArgs,
    },
    #[command(about = "Print totals, averages and best/worst step days")]
    Summary {
        #[command(flatten)]
        report: ReportArgs,
    },
    #[command(about = "Draw step counts as a text bar chart")]
    Chart {
        #[command(flatten)]
        report: ReportArgs,
    },
}

// Where the entries of a session come from. Nothing is kept between runs, so a session starts
// from the sample days plus whatever is passed with `--entry`.
#[derive(Debug, Default, Clone, clap::Args)]
pub struct EntrySource {
    #[arg(
        long = "entry",
        value_name = "DATE,STEPS,CALORIES,SLEEP",
        help = "Record to add before anything else. Can be repeated, e.g. --entry 2025-01-04,9000,2100,7.5"
    )]
    entries: Vec<MetricEntry>,
    #[arg(long = "no-seed", help = "Start without the three sample days")]
    no_seed: bool,
}

impl EntrySource {
    pub fn new(entries: Vec<MetricEntry>, no_seed: bool) -> Self {
        Self { entries, no_seed }
    }

    pub fn into_store(self) -> RecordStore {
        let seed = if self.no_seed {
            vec![]
        } else {
            fixture_entries()
        };
        RecordStore::with_entries(seed.into_iter().chain(self.entries))
    }
}

#[derive(Debug, Default, Clone, clap::Args)]
pub struct ReportArgs {
    #[command(flatten)]
    source: EntrySource,
    #[arg(long, help = "Print the result as JSON")]
    json: bool,
}

impl ReportArgs {
    pub fn new(source: EntrySource, json: bool) -> Self {
        Self { source, json }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    List,
    Summary,
    Chart,
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    let log_dir = args.log_dir.map_or_else(
        || create_application_default_path().map(|v| v.join("logs")),
        Ok,
    )?;
    enable_logging(CLI_PREFIX, &log_dir, args.log, args.log_console)?;

    let palette = Palette::new(!args.no_color);
    let command = args.commands.unwrap_or(Commands::Menu {
        source: EntrySource::default(),
    });
    debug!("Running {command:?}");

    match command {
        Commands::Menu { source } => {
            let mut store = source.into_store();
            Menu::new(
                io::stdin().lock(),
                io::stdout().lock(),
                palette,
                Box::new(DefaultClock),
            )
            .run(&mut store)
        }
        Commands::List { report } => print_report(ReportKind::List, report, &palette),
        Commands::Summary { report } => print_report(ReportKind::Summary, report, &palette),
        Commands::Chart { report } => print_report(ReportKind::Chart, report, &palette),
    }
}

fn print_report(kind: ReportKind, report: ReportArgs, palette: &Palette) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_report(&mut stdout, kind, report, palette)?;
    stdout.flush()?;
    Ok(())
}

/// Builds a store from `report` and writes a single report over it, either as text or as JSON.
pub fn write_report(
    out: &mut impl Write,
    kind: ReportKind,
    ReportArgs { source, json }: ReportArgs,
    palette: &Palette,
) -> Result<()> {
    let store = source.into_store();
    match (kind, json) {
        (ReportKind::List, false) => print_entries(out, palette, &store)?,
        (ReportKind::Summary, false) => print_summary(out, palette, store.summarize().as_ref())?,
        (ReportKind::Chart, false) => print_chart(out, palette, &store.visualize())?,
        (ReportKind::List, true) => {
            serde_json::to_writer_pretty(&mut *out, &store.entries().collect::<Vec<_>>())?
        }
        (ReportKind::Summary, true) => serde_json::to_writer_pretty(&mut *out, &store.summarize())?,
        (ReportKind::Chart, true) => serde_json::to_writer_pretty(&mut *out, &store.visualize())?,
    }
    if json {
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use clap::{CommandFactory, Parser};

    use super::{write_report, Args, Commands, EntrySource, Palette, ReportArgs, ReportKind};

    fn report(kind: ReportKind, args: ReportArgs) -> Result<String> {
        let mut out = Vec::new();
        write_report(&mut out, kind, args, &Palette::plain())?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_entries_from_command_line() -> Result<()> {
        let args = Args::try_parse_from([
            "healthlog",
            "--no-color",
            "chart",
            "--entry",
            "2025-01-04,9000,2100,7.5",
            "--entry",
            "2025-01-05,0,1500,9",
            "--no-seed",
        ])?;
        assert!(args.no_color);
        let Some(Commands::Chart { report }) = args.commands else {
            panic!("Expected chart command");
        };
        let store = report.source.into_store();
        assert_eq!(store.len(), 2);
        assert_eq!(store.entries().next().map(|v| v.steps), Some(9000));
        Ok(())
    }

    #[test]
    fn rejects_malformed_entry() {
        assert!(Args::try_parse_from(["healthlog", "list", "--entry", "2025-01-04,9000"]).is_err());
        assert!(
            Args::try_parse_from(["healthlog", "list", "--entry", "2025-01-044,9000,1,1"]).is_err()
        );
    }

    #[test]
    fn menu_is_default_command() -> Result<()> {
        let args = Args::try_parse_from(["healthlog"])?;
        assert!(args.commands.is_none());
        Ok(())
    }

    #[test]
    fn seeded_entries_come_first() -> Result<()> {
        let source = EntrySource::new(vec!["2025-01-04,1,1,1".parse()?], false);
        let store = source.into_store();
        let dates = store.entries().map(|v| v.date.to_string()).collect::<Vec<_>>();
        assert_eq!(
            dates,
            vec!["2025-01-01", "2025-01-02", "2025-01-03", "2025-01-04"]
        );
        Ok(())
    }

    #[test]
    fn summary_as_json() -> Result<()> {
        let text = report(ReportKind::Summary, ReportArgs::new(EntrySource::default(), true))?;
        let value: serde_json::Value = serde_json::from_str(&text)?;
        assert_eq!(value["count"], 3);
        assert_eq!(value["total_steps"], 35500);
        assert_eq!(value["best_step_day"]["date"], "2025-01-03");
        assert_eq!(value["worst_step_day"]["date"], "2025-01-02");
        Ok(())
    }

    #[test]
    fn empty_reports_as_json() -> Result<()> {
        let empty = || ReportArgs::new(EntrySource::new(vec![], true), true);
        assert_eq!(report(ReportKind::Summary, empty())?.trim(), "null");
        assert_eq!(report(ReportKind::List, empty())?.trim(), "[]");
        let chart: serde_json::Value = serde_json::from_str(&report(ReportKind::Chart, empty())?)?;
        assert_eq!(chart["status"], "no_data");
        Ok(())
    }

    #[test]
    fn chart_as_json() -> Result<()> {
        let text = report(ReportKind::Chart, ReportArgs::new(EntrySource::default(), true))?;
        let value: serde_json::Value = serde_json::from_str(&text)?;
        assert_eq!(value["status"], "bars");
        assert_eq!(value["scale_unit"], 305);
        assert_eq!(value["bars"][2]["bar_length"], 50);
        Ok(())
    }

    #[test]
    fn list_as_text() -> Result<()> {
        let text = report(ReportKind::List, ReportArgs::default())?;
        assert!(text.contains("| 2025-01-03 | 15200    |"));
        Ok(())
    }
}
