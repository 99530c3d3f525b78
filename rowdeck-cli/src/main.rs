mod records;

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use log::{info, warn};
use rowdeck_lib::export::to_tsv;
use rowdeck_lib::filter::FilterSet;
use rowdeck_lib::model::RowData;
use rowdeck_lib::schedule::{self, FIELDS};
use rowdeck_lib::sort::SortCriterion;
use rowdeck_lib::table::{ActionKind, ActionOutcome, RenderOutput, Table, TableOptions, TriState};
use simplelog::{Config, LevelFilter, SimpleLogger, WriteLogger};

use records::Format;

#[derive(Parser)]
#[command(name = "rowdeck")]
#[command(about = "Filter, sort and select class-schedule rows")]
#[command(version)]
struct Cli {
    /// Schedule file
    file: PathBuf,

    /// Input format (guessed from the extension when omitted)
    #[arg(long, short = 'f')]
    format: Option<Format>,

    /// Text filter, comma-separated terms. Repeatable.
    /// Example: 'instructor=ana,luis'
    #[arg(long, value_name = "COLUMN=TERMS")]
    filter: Vec<String>,

    /// Sort criterion, primary first. Repeatable.
    /// Example: 'date' or 'start_time:desc'
    #[arg(long, value_name = "COLUMN[:asc|desc]")]
    sort: Vec<String>,

    /// Select every visible, selectable row
    #[arg(long)]
    select_all: bool,

    /// Keep only overlapping classes
    #[arg(long)]
    overlap_only: bool,

    /// Hide deleted rows
    #[arg(long)]
    active_only: bool,

    /// Print the selection as TSV instead of the visible rows
    #[arg(long)]
    copy: bool,

    /// Table options as JSON
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Log verbosity
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,

    /// Write logs to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_logging(cli: &Cli) -> Result<()> {
    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            WriteLogger::init(cli.log_level, Config::default(), file)
                .context("Failed to initialize logger")
        }
        None => SimpleLogger::init(cli.log_level, Config::default())
            .context("Failed to initialize logger"),
    }
}

fn load_options(path: Option<&PathBuf>) -> Result<TableOptions> {
    let Some(path) = path else {
        return Ok(TableOptions::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read options {}", path.display()))?;
    TableOptions::from_json(&json).with_context(|| format!("Invalid options in {}", path.display()))
}

fn parse_filter(arg: &str) -> Result<(&str, &str)> {
    let (column, terms) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("Filter '{}' must look like COLUMN=TERMS", arg))?;
    let column = column.trim();
    if !FIELDS.contains(&column) {
        bail!("Unknown filter column '{}'", column);
    }
    Ok((column, terms))
}

fn parse_sort(arg: &str) -> Result<SortCriterion> {
    let (column, direction) = arg.split_once(':').unwrap_or((arg, "asc"));
    let column = column.trim();
    if !FIELDS.contains(&column) {
        bail!("Unknown sort column '{}'", column);
    }
    match direction.trim().to_ascii_lowercase().as_str() {
        "asc" => Ok(SortCriterion::asc(column)),
        "desc" => Ok(SortCriterion::desc(column)),
        other => bail!("Sort direction must be asc or desc, got '{}'", other),
    }
}

fn build_table(cli: &Cli, options: TableOptions) -> Result<Table> {
    let mut table = Table::builder()
        .columns(schedule::columns())
        .row_key(schedule::row_key)
        .selectable(schedule::is_selectable)
        .options(options)
        .veto(ActionKind::Copy, |ctx| ctx.has_selection())
        .build()?;

    let mut filters = FilterSet::new();
    for arg in &cli.filter {
        let (column, terms) = parse_filter(arg)?;
        filters = filters.with_field(column, terms);
    }
    if cli.overlap_only {
        filters = filters.require_flag(schedule::OVERLAPPED);
    }

    if cli.active_only {
        let filters = filters.case_sensitive(table.options().case_sensitive_filters);
        table.set_filter(move |data| Ok(filters.matches(data) && schedule::is_active(data)));
    } else {
        table.apply_filter_set(filters);
    }

    let criteria = cli
        .sort
        .iter()
        .map(|arg| parse_sort(arg))
        .collect::<Result<Vec<_>>>()?;
    table.set_sort(criteria);
    Ok(table)
}

fn summary(output: &RenderOutput) -> String {
    let select_all = match output.select_all {
        TriState::Unchecked => "unchecked",
        TriState::Indeterminate => "indeterminate",
        TriState::Checked => "checked",
    };
    let mut line = format!(
        "{} visible, {} selected, select-all {}",
        output.visible_count, output.selected_count, select_all
    );
    if let Some(label) = &output.empty_label {
        line.push_str(&format!(" ({})", label));
    }
    line
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let options = load_options(cli.options.as_ref())?;
    let format = cli.format.unwrap_or_else(|| Format::from_path(&cli.file));
    let mut records = records::read(&cli.file, format)?;
    schedule::mark_overlaps(&mut records);

    let mut table = build_table(&cli, options)?;
    table
        .load(records)
        .with_context(|| format!("Failed to load {}", cli.file.display()))?;

    let mut output = table.render()?;
    if cli.select_all {
        table.toggle_all(true);
        output = table.render()?;
    }

    if cli.copy {
        match table.begin_action(ActionKind::Copy) {
            Some(ticket) => {
                println!("{}", to_tsv(&FIELDS, &ticket.rows));
                table.finish_action(&ticket, ActionOutcome::Completed);
            }
            None => warn!("Nothing selected to copy"),
        }
    } else {
        let visible: Vec<RowData> = output.visible_rows().map(|r| r.data.clone()).collect();
        if !visible.is_empty() {
            println!("{}", to_tsv(&FIELDS, &visible));
        }
    }

    info!("rowdeck: rendered {} rows", output.rows.len());
    eprintln!("{}", summary(&output));
    Ok(())
}
