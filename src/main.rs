use clap::{Parser, Subcommand};
use sheetdocs::config::{self, GeneratorConfig, Overrides};
use sheetdocs::{generate, output, sheet, types::SheetRow};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetdocs")]
#[command(version)]
#[command(about = "Generate static-site markdown pages from a spreadsheet")]
#[command(long_about = "\
Generate static-site markdown pages from a spreadsheet

Each sheet row becomes <output>/<page_id>.md with regenerated YAML front
matter. Existing page bodies are kept; only the front matter and the
trailing funding footer are rewritten, so running again is always safe.

Sheet columns:

  page_id        required   01020000_en (8 digits + _ + language)
  title          required   page title
  layout         optional   theme layout (default: home)
  lang_code      optional   language code (default: en)
  parent_id      optional   page_id of the parent page
  has_children   optional   true/1/yes/y/on marks a hub page
  display_order  optional   nav_order; blank, 0 or negative becomes 1

Run 'sheetdocs gen-config' to generate a documented sheetdocs.toml.")]
struct Cli {
    /// Config file (default: ./sheetdocs.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Input workbook (.xlsx, .xlsm, .xls, .ods)
    #[arg(long, global = true)]
    spreadsheet: Option<PathBuf>,

    /// Worksheet name (default: first sheet)
    #[arg(long, global = true)]
    sheet: Option<String>,

    /// Output directory for generated pages
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Log each row as it is processed
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write or update one markdown page per sheet row
    Generate,
    /// Resolve every page and report problems without writing
    Check,
    /// Print a stock sheetdocs.toml with all options documented
    GenConfig,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("sheetdocs=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Generate => {
            let (config, rows) = load(&cli)?;
            let report = generate::generate(&rows, &config)?;
            output::print_generate_output(&report, config.spreadsheet_path());
        }
        Command::Check => {
            let (config, rows) = load(&cli)?;
            let plan = generate::plan_pages(&rows, &config);
            output::print_check_output(&plan, config.spreadsheet_path());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }
    Ok(())
}

/// Resolve config and read the sheet. Any failure here happens before a
/// single page is written.
fn load(cli: &Cli) -> Result<(GeneratorConfig, Vec<SheetRow>), Box<dyn std::error::Error>> {
    let overrides = Overrides {
        spreadsheet: cli.spreadsheet.clone(),
        sheet: cli.sheet.clone(),
        output_dir: cli.output.clone(),
    };
    let config = config::load_config(cli.config.as_deref(), &overrides)?;
    info!(spreadsheet = %config.spreadsheet, "reading sheet");
    let rows = sheet::load_rows(config.spreadsheet_path(), config.sheet.as_deref())?;
    Ok((config, rows))
}
