use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;

use invoicegen::config::ConfigDir;
use invoicegen::generate::{self, DEFAULT_LANGUAGE, Options};

#[derive(Parser)]
#[command(
    author,
    version,
    name = env!("CARGO_BIN_NAME"),
    about = "Generate an invoice PDF per language from YAML profiles"
)]
struct Args {
    /// Comma-delimited list of languages to render, e.g. "EN,DE"
    #[arg(short, long, default_value = DEFAULT_LANGUAGE, value_name = "LANGS")]
    languages: String,

    /// Base name for the PDF files instead of the invoice number
    #[arg(short, long, value_name = "NAME")]
    pdf_name: Option<String>,

    /// Config directory [default: ~/.invoice-generator]
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    config_dir: Option<PathBuf>,

    /// Output directory [default: the config directory]
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    output_dir: Option<PathBuf>,

    /// Issue date (YYYY-MM-DD) instead of today
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Print verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config_dir = match args.config_dir {
        Some(path) => ConfigDir::new(path),
        None => ConfigDir::default_location().context("failed to load config")?,
    };
    config_dir.init().context("failed to load config")?;
    let data = config_dir
        .load()
        .with_context(|| format!("failed to load config from {}", config_dir.path().display()))?;

    let languages = generate::parse_languages(&args.languages).context("invalid --languages")?;
    let options = Options {
        languages,
        pdf_name: args.pdf_name,
        output_dir: args
            .output_dir
            .unwrap_or_else(|| config_dir.path().to_path_buf()),
        issue_date: args.date.unwrap_or_else(|| Local::now().date_naive()),
    };

    let written = generate::generate(&data, &options).context("failed to render invoice")?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
