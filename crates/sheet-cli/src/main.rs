//! Sheet CSV CLI
//!
//! Command-line tool for listing relational sheets and exporting them as CSV.

use clap::{Parser, Subcommand};
use sheet_core::{
    export_all, export_all_with_manifest, BatchReport, DirectorySource, ExportConfig,
    ExportOptions, HeaderQuoting, LineEnding, SheetCsvExporter, SheetSelection, SheetSource,
};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheet-csv")]
#[command(about = "Export relational sheets to CSV", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Output format flags shared by the export commands
#[derive(clap::Args, Clone, Copy)]
struct FormatArgs {
    /// Terminate lines with CRLF instead of LF
    #[arg(long)]
    crlf: bool,

    /// Start the file with a UTF-8 byte order mark
    #[arg(long)]
    bom: bool,

    /// Quote header names and types that contain a comma, quote or line break
    #[arg(long)]
    quote_header: bool,
}

impl FormatArgs {
    fn options(self) -> ExportOptions {
        ExportOptions {
            line_ending: if self.crlf { LineEnding::CrLf } else { LineEnding::Lf },
            byte_order_mark: self.bom,
            header_quoting: if self.quote_header {
                HeaderQuoting::Minimal
            } else {
                HeaderQuoting::Verbatim
            },
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the sheets available in a source directory
    List {
        /// Directory of sheet documents
        #[arg(short, long)]
        source: PathBuf,
    },

    /// Show the columns of a sheet
    Info {
        /// Directory of sheet documents
        #[arg(short, long)]
        source: PathBuf,

        /// Sheet name
        #[arg(long)]
        sheet: String,
    },

    /// Export a single sheet to a CSV file
    Export {
        /// Directory of sheet documents
        #[arg(short, long)]
        source: PathBuf,

        /// Sheet name
        #[arg(long)]
        sheet: String,

        /// Output file path (defaults to <last name segment>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Export every sheet into a directory
    ExportAll {
        /// Directory of sheet documents
        #[arg(short, long)]
        source: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Only export sheets whose name starts with this prefix (repeatable)
        #[arg(short, long)]
        filter: Vec<String>,

        /// Skip writing manifest.json
        #[arg(long)]
        no_manifest: bool,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Run a batch export described by a config file
    Batch {
        /// Path to config file (JSON)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Create a config file template
    CreateConfig {
        /// Output path for the config file
        #[arg(short, long)]
        output: PathBuf,

        /// Directory of sheet documents
        #[arg(short, long)]
        source: PathBuf,

        /// Directory the CSV files are written to
        #[arg(long)]
        export_dir: PathBuf,

        /// Sheet name prefixes to include (repeatable)
        #[arg(short, long)]
        filter: Vec<String>,
    },
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> sheet_core::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List { source } => cmd_list(&source),
        Commands::Info { source, sheet } => cmd_info(&source, &sheet),
        Commands::Export {
            source,
            sheet,
            output,
            format,
        } => cmd_export(&source, &sheet, output, format.options()),
        Commands::ExportAll {
            source,
            output,
            filter,
            no_manifest,
            format,
        } => cmd_export_all(&source, &output, &filter, !no_manifest, format.options()),
        Commands::Batch { config } => cmd_batch(&config),
        Commands::CreateConfig {
            output,
            source,
            export_dir,
            filter,
        } => cmd_create_config(&output, source, export_dir, filter),
    }
}

fn cmd_list(source: &Path) -> sheet_core::Result<()> {
    let source = DirectorySource::open(source)?;

    for name in source.available_sheet_names() {
        println!("{}", name);
    }

    Ok(())
}

fn cmd_info(source: &Path, sheet_name: &str) -> sheet_core::Result<()> {
    let source = DirectorySource::open(source)?;
    let sheet = source.get_sheet(sheet_name)?;

    println!("Sheet: {}", sheet.name);
    println!("Rows: {}", sheet.row_count());
    println!("Columns: {}", sheet.column_count());
    println!();
    println!("index\tname\ttype");
    for col in &sheet.header.columns {
        println!("{}\t{}\t{}", col.index, col.name, col.value_type);
    }

    Ok(())
}

fn cmd_export(
    source: &Path,
    sheet_name: &str,
    output: Option<PathBuf>,
    options: ExportOptions,
) -> sheet_core::Result<()> {
    let source = DirectorySource::open(source)?;
    let mut selection = SheetSelection::new(&source);
    selection.select(sheet_name);

    let output = match output {
        Some(path) => path,
        None => match selection.default_file_name()? {
            Some(name) => PathBuf::from(name),
            None => {
                println!("No sheet named '{}'; nothing exported.", sheet_name);
                return Ok(());
            }
        },
    };

    let exporter = SheetCsvExporter::new(options);
    match selection.export_selected(&exporter, &output)? {
        Some(summary) => println!(
            "Exported {} rows from '{}' to {}",
            summary.rows,
            summary.sheet,
            summary.path.display()
        ),
        None => println!("No sheet named '{}'; nothing exported.", sheet_name),
    }

    Ok(())
}

fn cmd_export_all(
    source: &Path,
    output: &Path,
    filter: &[String],
    write_manifest: bool,
    options: ExportOptions,
) -> sheet_core::Result<()> {
    let source = DirectorySource::open(source)?;
    let exporter = SheetCsvExporter::new(options);

    let report = if write_manifest {
        export_all_with_manifest(&source, &exporter, output, filter)?
    } else {
        export_all(&source, &exporter, output, filter)?
    };

    print_report(&report, output);
    Ok(())
}

fn cmd_batch(config_path: &Path) -> sheet_core::Result<()> {
    let base = config_path.parent().unwrap_or_else(|| Path::new("."));
    let config = ExportConfig::load(config_path)?.resolve_relative_to(base);
    debug!(source = %config.source.display(), output = %config.output_dir.display(), "loaded config");

    println!("Source: {}", config.source.display());
    println!("Output: {}", config.output_dir.display());
    println!();

    cmd_export_all(
        &config.source,
        &config.output_dir,
        &config.sheets,
        config.write_manifest,
        config.options,
    )
}

fn cmd_create_config(
    output: &Path,
    source: PathBuf,
    export_dir: PathBuf,
    filter: Vec<String>,
) -> sheet_core::Result<()> {
    let mut config = ExportConfig::new(source, export_dir);
    config.sheets = filter;

    config.save(output)?;
    println!("Created config file: {}", output.display());
    println!();
    println!("Edit the file to configure your export, then run:");
    println!("  sheet-csv batch --config {}", output.display());

    Ok(())
}

fn print_report(report: &BatchReport, output: &Path) {
    println!("Export complete:");
    println!(
        "  {} sheets ({} rows) written to {}",
        report.exported.len(),
        report.total_rows(),
        output.display()
    );

    if let Some(manifest) = &report.manifest {
        println!("  manifest: {}", manifest.display());
    }

    if !report.errors.is_empty() {
        println!("\nErrors ({}):", report.errors.len());
        for (sheet, err) in &report.errors {
            println!("  {}: {}", sheet, err);
        }
    }
}
