//! pdfoutline CLI - PDF title and heading outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{self, BatchSummary, FileOutcome};
use pdfoutline::{BatchOptions, JsonFormat, PdfOutline};

const DEFAULT_INPUT_DIR: &str = "input_pdfs";
const DEFAULT_OUTPUT_DIR: &str = "output_json";

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(about = "Extract document titles and H1-H3 outlines from PDFs as JSON", long_about = None)]
struct Cli {
    /// Directory of PDF files to process
    #[arg(value_name = "INPUT_DIR")]
    input: Option<PathBuf>,

    /// Directory for the JSON outlines
    #[arg(value_name = "OUTPUT_DIR")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the outline of a single PDF
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Extract outlines for every PDF in a directory
    Batch {
        /// Directory of PDF files
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Directory for the JSON outlines
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// Process files one at a time
        #[arg(long)]
        sequential: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            compact,
        }) => cmd_extract(&input, output.as_deref(), compact),
        Some(Commands::Batch {
            input,
            output,
            sequential,
            compact,
        }) => cmd_batch(&input, &output, sequential, compact, false),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: process the conventional directories
            let input = cli.input.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));
            let output = cli
                .output
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
            cmd_batch(&input, &output, false, false, true)
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Use lenient mode so one broken page does not hide the rest of the outline
    let result = PdfOutline::new().lenient().extract(input)?;
    let json = pdfoutline::render::to_json(&result, json_format(compact))?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!(
            "{} {} ({} headings)",
            "Saved to".green(),
            path.display(),
            result.outline.len()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    sequential: bool,
    compact: bool,
    create_input: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if create_input && !input.exists() {
        fs::create_dir_all(input)?;
        println!(
            "{} {} (place PDF files there and run again)",
            "Created".yellow(),
            input.display()
        );
    }
    fs::create_dir_all(output)?;

    let mut options = BatchOptions::new().with_json_format(json_format(compact));
    if sequential {
        options = options.sequential();
    }
    log::debug!("Batch options: {:?}", options);

    let found = batch::discover_pdfs(input)?.len();
    if found == 0 {
        println!("{} {}", "No PDF files found in".yellow(), input.display());
        return Ok(());
    }

    let pb = ProgressBar::new(found as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Extracting outlines...");

    let summary = batch::process_directory_with_progress(input, output, &options, |outcome| {
        if let FileOutcome::Written(path) = outcome {
            pb.set_message(format!("{}", path.display()));
        }
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    print_summary(&summary, output);

    if summary.is_success() {
        Ok(())
    } else {
        Err(format!("{} file(s) failed", summary.failed).into())
    }
}

fn print_summary(summary: &BatchSummary, output: &Path) {
    println!("\n{}", "Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Found".bold(), summary.found);
    println!("{}: {}", "Succeeded".bold(), summary.succeeded.to_string().green());
    println!("{}: {}", "Failed".bold(), summary.failed.to_string().red());
    println!("{}: {}", "Output".bold(), output.display());

    for failure in &summary.failures {
        println!(
            "  {} {}: {}",
            "✗".red(),
            failure.path.display(),
            failure.error.dimmed()
        );
    }
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and outline extraction tool");
    println!();
    println!("License: MIT");
}
