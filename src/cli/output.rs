use std::io::{self, Write};

use ansi_term::{Colour, Style};

use crate::store::{
    record_store::RecordStore,
    report::{StepChart, Summary},
};

/// Styles used for everything printed to the terminal. Without color every style is plain, so
/// nothing but the text itself is written.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub header: Style,
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub bar: Style,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        if !color {
            return Self::plain();
        }
        Self {
            header: Style::new().bold(),
            info: Colour::Cyan.normal(),
            success: Colour::Green.normal(),
            warning: Colour::Yellow.normal(),
            error: Colour::Red.bold(),
            bar: Colour::Green.normal(),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            info: Style::new(),
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            bar: Style::new(),
        }
    }
}

pub fn print_info(out: &mut impl Write, palette: &Palette, message: &str) -> io::Result<()> {
    writeln!(out, "\n{}", palette.info.paint(format!("[INFO] {message}")))
}

pub fn print_success(out: &mut impl Write, palette: &Palette, message: &str) -> io::Result<()> {
    writeln!(out, "\n{}", palette.success.paint(format!("[SUCCESS] {message}")))
}

pub fn print_warning(out: &mut impl Write, palette: &Palette, message: &str) -> io::Result<()> {
    writeln!(out, "\n{}", palette.warning.paint(format!("[WARNING] {message}")))
}

pub fn print_error(out: &mut impl Write, palette: &Palette, message: &str) -> io::Result<()> {
    writeln!(out, "{}", palette.error.paint(format!("[ERROR] {message}")))
}

const TABLE_SEPARATOR: &str = "|------------|----------|--------------|----------|";

/// Prints every entry of the store as a table, oldest first.
pub fn print_entries(out: &mut impl Write, palette: &Palette, store: &RecordStore) -> io::Result<()> {
    if store.is_empty() {
        return print_info(out, palette, "No records found. Add some data first.");
    }

    writeln!(out, "\n{}", palette.header.paint("--- Historical Health Records ---"))?;
    writeln!(
        out,
        "| {:<10} | {:<8} | {:<12} | {:<8} |",
        "Date", "Steps", "Calories", "Sleep (h)"
    )?;
    writeln!(out, "{TABLE_SEPARATOR}")?;
    for entry in store {
        writeln!(
            out,
            "| {:<10} | {:<8} | {:<12} | {:<8.1} |",
            entry.date, entry.steps, entry.calories_burned, entry.sleep_hours
        )?;
    }
    writeln!(out, "{TABLE_SEPARATOR}")
}

pub fn print_summary(
    out: &mut impl Write,
    palette: &Palette,
    summary: Option<&Summary>,
) -> io::Result<()> {
    let Some(summary) = summary else {
        return print_info(out, palette, "No records found to calculate summary.");
    };

    writeln!(
        out,
        "\n{}",
        palette.header.paint(format!(
            "--- Health Metrics Summary ({} Days) ---",
            summary.count
        ))
    )?;

    writeln!(out, "\n[Average Metrics]")?;
    writeln!(out, "  Average Steps:             {:.2}", summary.average_steps)?;
    writeln!(out, "  Average Calories Burned:   {:.2}", summary.average_calories)?;
    writeln!(out, "  Average Sleep Hours:       {:.2}", summary.average_sleep_hours)?;

    writeln!(out, "\n[Total Metrics]")?;
    writeln!(out, "  Total Steps Tracked:       {}", summary.total_steps)?;
    writeln!(out, "  Total Calories Tracked:    {}", summary.total_calories)?;
    writeln!(out, "  Total Sleep Hours Tracked: {:.1}", summary.total_sleep_hours)?;

    writeln!(out, "\n[Performance Analysis]")?;
    writeln!(
        out,
        "  Best Step Day:  {} steps on {}",
        summary.best_step_day.steps, summary.best_step_day.date
    )?;
    writeln!(
        out,
        "  Worst Step Day: {} steps on {}",
        summary.worst_step_day.steps, summary.worst_step_day.date
    )
}

pub fn print_chart(out: &mut impl Write, palette: &Palette, chart: &StepChart) -> io::Result<()> {
    let (scale_unit, bars) = match chart {
        StepChart::NoData => {
            return print_info(out, palette, "No records found for visualization.");
        }
        StepChart::AllZero => return print_info(out, palette, "All step counts are zero."),
        StepChart::Bars { scale_unit, bars } => (scale_unit, bars),
    };

    writeln!(out, "\n{}", palette.header.paint("--- Text Visualization: Step Count ---"))?;
    writeln!(out, "Scale: One '#' represents approx. {scale_unit} steps.\n")?;
    for bar in bars {
        writeln!(
            out,
            "{} | {:<5} | {}",
            bar.date,
            bar.steps,
            palette.bar.paint("#".repeat(bar.bar_length as usize))
        )?;
    }
    writeln!(out)
}
