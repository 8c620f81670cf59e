//! CLI entry point for the restaurant review dashboard.
//!
//! Loads and normalizes the restaurant dataset once, then renders one of the
//! dashboard pages (overview, countries, cities, cuisines) as JSON or a
//! pretty dump, optionally writing it to a file.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use restaurant_review::analyzers::filter::ResultLimit;
use restaurant_review::analyzers::views::{
    available_cuisines, city_view, country_view, cuisine_view, overview,
};
use restaurant_review::config::{
    DEFAULT_COUNTRIES, DEFAULT_DATASET_PATH, OVERVIEW_COUNTRIES, Selection, SelectionFile,
};
use restaurant_review::normalize::Dataset;
use restaurant_review::output::{print_json, print_pretty, write_json, write_table};
use restaurant_review::parser::load_records;
use serde::Serialize;
use std::ffi::OsStr;
use std::fmt::Debug;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "restaurant_review")]
#[command(about = "Filterable views over a restaurant listing dataset", long_about = None)]
struct Cli {
    /// Path to the restaurant CSV (defaults to $DATASET_PATH, then zomato.csv)
    #[arg(short, long, global = true)]
    dataset: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Headline counters and the restaurant map
    Overview {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Restaurants, cities, votes and prices per country
    Countries {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Top cities by restaurant count, rating band and cuisine variety
    Cities {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Best restaurants, restaurant table and best/worst cuisines
    Cuisines {
        #[command(flatten)]
        view: ViewArgs,

        /// Primary cuisines to include, comma separated
        #[arg(long, value_delimiter = ',')]
        cuisines: Option<Vec<String>>,

        /// Number of rows in the restaurant table
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(3..=20))]
        limit: Option<u8>,

        /// Optional: write the restaurant table to this CSV file
        #[arg(long)]
        table_csv: Option<String>,

        /// List the cuisines available for the selected countries and exit
        #[arg(long, default_value_t = false)]
        list_cuisines: bool,
    },
}

#[derive(Args)]
struct ViewArgs {
    /// Countries to include, comma separated
    #[arg(short, long, value_delimiter = ',')]
    countries: Option<Vec<String>>,

    /// JSON file with saved selections
    #[arg(short, long)]
    selection: Option<String>,

    /// How to render the view
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Optional: write the view as JSON to this path
    #[arg(short, long)]
    out: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Pretty,
}

impl ViewArgs {
    fn selection(&self, base: Selection) -> Result<Selection> {
        let mut selection = match &self.selection {
            Some(path) => base.merge_file(SelectionFile::load(path)?),
            None => base,
        };
        if let Some(countries) = &self.countries {
            selection.countries = countries.clone();
        }
        Ok(selection)
    }

    fn render<V: Serialize + Debug>(&self, view: &V) -> Result<()> {
        match self.format {
            Format::Json => print_json(view)?,
            Format::Pretty => print_pretty(view),
        }
        if let Some(out) = &self.out {
            write_json(out, view)?;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/restaurant_review.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("restaurant_review.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let dataset_path = cli
        .dataset
        .or_else(|| std::env::var("DATASET_PATH").ok())
        .unwrap_or_else(|| DEFAULT_DATASET_PATH.to_string());
    let dataset = load_dataset(&dataset_path)?;

    match cli.command {
        Commands::Overview { view } => {
            let selection = view.selection(Selection::with_defaults(OVERVIEW_COUNTRIES))?;
            view.render(&overview(&dataset, &selection.filter()))?;
        }
        Commands::Countries { view } => {
            let selection = view.selection(Selection::with_defaults(DEFAULT_COUNTRIES))?;
            view.render(&country_view(&dataset, &selection.filter()))?;
        }
        Commands::Cities { view } => {
            let selection = view.selection(Selection::with_defaults(DEFAULT_COUNTRIES))?;
            view.render(&city_view(&dataset, &selection.filter()))?;
        }
        Commands::Cuisines {
            view,
            cuisines,
            limit,
            table_csv,
            list_cuisines,
        } => {
            let base = Selection::with_defaults(DEFAULT_COUNTRIES).with_default_cuisines();
            let mut selection = view.selection(base)?;
            if let Some(cuisines) = cuisines {
                selection.cuisines = Some(cuisines);
            }
            if let Some(limit) = limit {
                selection.result_limit = ResultLimit::new(limit.into())?;
            }

            let filter = selection.filter();

            if list_cuisines {
                let options = available_cuisines(&dataset, &filter);
                info!(count = options.len(), "Available cuisines");
                return view.render(&options);
            }

            let page = cuisine_view(&dataset, &filter, selection.result_limit);
            view.render(&page)?;

            if let Some(path) = table_csv {
                write_table(&path, &page.restaurants)?;
                info!(path = %path, rows = page.restaurants.len(), "Wrote restaurant table");
            }
        }
    }

    Ok(())
}

/// Loads and normalizes the dataset; any integrity failure stops the program.
#[tracing::instrument]
fn load_dataset(path: &str) -> Result<Dataset> {
    let raw = load_records(path)?;
    let dataset = Dataset::from_raw(raw)
        .with_context(|| format!("dataset '{path}' failed integrity checks"))?;
    info!(
        restaurants = dataset.len(),
        countries = dataset.countries().len(),
        "Dataset ready"
    );
    Ok(dataset)
}
