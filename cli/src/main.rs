//! deckdown CLI - markdown slide deck compiler

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use deckdown::render::PlanRenderer;
use deckdown::{DriveOptions, Error, Segmented};

#[derive(Parser)]
#[command(name = "deckdown")]
#[command(version)]
#[command(about = "Compile annotated markdown into slide deck render plans", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a markdown deck to an output document
    Convert {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (input with the format extension if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "plan")]
        format: Format,

        /// External defaults file merged beneath the document configuration
        #[arg(long, value_name = "FILE")]
        defaults: Option<PathBuf>,

        /// Rasterize vector image sources before placement
        #[arg(long)]
        raster_images: bool,

        /// Overwrite image assets written by the backend
        #[arg(long)]
        overwrite_images: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show deck information
    Info {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List the headline index used for internal links
    Headlines {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// JSON draw-call stream from the built-in recording backend
    Plan,
}

impl Format {
    fn extension(&self) -> &'static str {
        match self {
            Format::Plan => "json",
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            format,
            defaults,
            raster_images,
            overwrite_images,
            compact,
        } => cmd_convert(
            &input,
            output.as_deref(),
            format,
            defaults.as_deref(),
            raster_images,
            overwrite_images,
            compact,
        ),
        Commands::Info { input } => cmd_info(&input),
        Commands::Headlines { input } => cmd_headlines(&input),
    };

    if let Err((input, err)) = result {
        report_error(&input, &err);
        process::exit(1);
    }
}

type CmdResult = Result<(), (PathBuf, Error)>;

fn load_deck(input: &Path, defaults: Option<&Path>) -> Result<Segmented, (PathBuf, Error)> {
    let result = match defaults {
        Some(file) => deckdown::segment_file_with_defaults(input, file),
        None => deckdown::segment_file(input),
    };
    result.map_err(|err| (input.to_path_buf(), err))
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    format: Format,
    defaults: Option<&Path>,
    raster_images: bool,
    overwrite_images: bool,
    compact: bool,
) -> CmdResult {
    let deck = load_deck(input, defaults)?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension(format.extension()));
    let base_dir = input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let options = DriveOptions::new()
        .with_base_dir(base_dir)
        .with_raster_images(raster_images);

    let mut backend = match format {
        Format::Plan => PlanRenderer::new()
            .with_overwrite(overwrite_images || !output.exists())
            .with_pretty(!compact),
    };

    deckdown::convert(&deck, &mut backend, &options, &output)
        .map_err(|err| (input.to_path_buf(), err))?;

    println!(
        "{} {} page{} -> {}",
        "Compiled".green().bold(),
        deck.pages.len(),
        if deck.pages.len() == 1 { "" } else { "s" },
        output.display()
    );
    Ok(())
}

fn cmd_info(input: &Path) -> CmdResult {
    let deck = load_deck(input, None)?;

    println!("{}", "Deck".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Pages".bold(), deck.pages.len());

    for (i, page) in deck.pages.iter().enumerate() {
        let title = if page.headline().is_empty() {
            "(untitled)".dimmed().to_string()
        } else {
            page.headline().to_string()
        };
        let mut notes = vec![page.config.layout.to_string()];
        if !page.image_lines.is_empty() {
            notes.push(format!("{} images", page.image_lines.len()));
        }
        if page.config.columns > 1 {
            notes.push(format!("{} columns", page.config.columns));
        }
        println!(
            "{:>4}  {}  {}",
            (i + 1).to_string().bold(),
            title,
            notes.join(", ").dimmed()
        );
    }
    Ok(())
}

fn cmd_headlines(input: &Path) -> CmdResult {
    let deck = load_deck(input, None)?;
    for (i, headline) in deck.headlines.iter().enumerate() {
        println!("{:>4}  {}", (i + 1).to_string().bold(), headline);
    }
    Ok(())
}

/// Print a fatal error as `file:line: message`, matching compiler-style
/// diagnostics so editors can jump to the offending line.
fn report_error(input: &Path, err: &Error) {
    let prefix = match err {
        Error::ConfigParse { line, .. } | Error::UnclosedConfigBlock { line } => {
            format!("{}:{}", input.display(), line)
        }
        _ => input.display().to_string(),
    };
    let message = match err {
        Error::ConfigParse { message, .. } => format!("invalid configuration block: {message}"),
        Error::UnclosedConfigBlock { .. } => "configuration block is never closed".to_string(),
        other => other.to_string(),
    };
    eprintln!("{}: {}", prefix.red().bold(), message);
}
