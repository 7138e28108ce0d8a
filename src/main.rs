//! taboo - inspect and join tabular files

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, Level};

use taboo::config::{parse_where_term, Config, OutputFormat};
use taboo::engine::{compute_join, JoinKind, Predicate};
use taboo::model::{RowFormat, RowInput, RowView, Table};
use taboo::output::render_to_stdout;
use taboo::loader::{parse_cell_value, Loaders};
use taboo::WriteOptions;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Grid,
    Text,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Grid => OutputFormat::Grid,
            CliOutputFormat::Text => OutputFormat::Text,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Inspect and join tabular files
#[derive(Parser, Debug)]
#[command(name = "taboo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a table, optionally filtered
    Show {
        /// File to load
        file: PathBuf,

        /// Keep rows where header=value (repeatable, all must hold)
        #[arg(short = 'w', long = "where", value_parser = parse_where_term)]
        filter: Vec<(String, String)>,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// List column headers with their inferred types
    Headers {
        /// File to load
        file: PathBuf,

        /// For Excel files: which sheet to load
        #[arg(long)]
        sheet: Option<String>,
    },
    /// Join two tables on a key column
    Join {
        /// Left table
        left: PathBuf,

        /// Right table
        right: PathBuf,

        /// Key column in the left table
        #[arg(long)]
        left_key: String,

        /// Key column in the right table (defaults to the left key)
        #[arg(long)]
        right_key: Option<String>,

        /// Drop left rows without a match
        #[arg(long)]
        inner: bool,

        #[command(flatten)]
        render: RenderArgs,
    },
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "grid")]
    format: CliOutputFormat,

    /// Minimum column width for text output
    #[arg(long, default_value_t = taboo::output::DEFAULT_COLUMN_WIDTH)]
    width: usize,

    /// Bold grid header
    #[arg(long)]
    color: bool,

    /// For Excel files: which sheet to load
    #[arg(long)]
    sheet: Option<String>,
}

impl RenderArgs {
    fn apply(self, mut config: Config) -> Config {
        config = config
            .with_output_format(self.format.into())
            .with_column_width(self.width)
            .with_color(self.color);
        if let Some(sheet) = self.sheet {
            config = config.with_sheet_name(sheet);
        }
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(has_rows) => {
            if has_rows {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1) // Empty result
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<bool> {
    let loaders = Loaders::new();

    match command {
        Command::Show {
            file,
            filter,
            render,
        } => {
            let config = render.apply(Config::new(vec![file.clone()]).with_where_terms(filter));
            let table = load(&loaders, &file, &config)?;
            let table = if config.where_terms.is_empty() {
                table
            } else {
                filter_table(&table, &config.where_terms)?
            };
            info!(rows = table.row_count(), "rendering");
            render_to_stdout(&table, &config)?;
            Ok(table.row_count() > 0)
        }
        Command::Headers { file, sheet } => {
            let mut config = Config::new(vec![file.clone()]);
            if let Some(sheet) = sheet {
                config = config.with_sheet_name(sheet);
            }
            let table = load(&loaders, &file, &config)?;
            for column in table.columns() {
                println!("{}\t{}", column.header, column.inferred_type());
            }
            Ok(table.column_count() > 0)
        }
        Command::Join {
            left,
            right,
            left_key,
            right_key,
            inner,
            render,
        } => {
            let right_key = right_key.unwrap_or_else(|| left_key.clone());
            let kind = if inner { JoinKind::Inner } else { JoinKind::Left };
            let config = render.apply(
                Config::new(vec![left.clone(), right.clone()])
                    .with_keys(left_key, right_key)
                    .with_join_kind(kind),
            );

            let left_table = load(&loaders, &left, &config)?;
            let right_table = load(&loaders, &right, &config)?;

            let left_key = config.left_key.as_deref().unwrap_or_default();
            let right_key = config.right_key.as_deref().unwrap_or_default();
            let joined = compute_join(&left_table, left_key, &right_table, right_key, kind);
            info!(
                left_rows = left_table.row_count(),
                right_rows = right_table.row_count(),
                rows = joined.row_count(),
                "joined"
            );

            render_to_stdout(&joined, &config)?;
            Ok(joined.row_count() > 0)
        }
    }
}

fn load(loaders: &Loaders, path: &Path, config: &Config) -> Result<Table> {
    loaders
        .load(path, config)
        .with_context(|| format!("Failed to load file: {}", path.display()))
}

/// Copy the rows matching every `header=value` term into a new table
fn filter_table(table: &Table, terms: &[(String, String)]) -> Result<Table> {
    let predicate: Predicate = terms
        .iter()
        .map(|(header, value)| (header.clone(), parse_cell_value(value)))
        .collect();

    let mut filtered = Table::new();
    filtered.add_columns(table.column_headers(), Default::default())?;
    let rows = table
        .get_rows_where(&predicate, RowFormat::Values)
        .into_iter()
        .filter_map(|row| match row {
            RowView::Values(values) => Some(RowInput::Values(values)),
            RowView::Record(_) => None,
        });
    filtered.add_rows(rows, WriteOptions::silent())?;
    Ok(filtered)
}
