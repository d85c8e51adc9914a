// QuillGrid CLI - headless document operations

mod exit_codes;

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use quillgrid_config::Settings;
use quillgrid_engine::clipboard::{parse_tsv, paste_block};
use quillgrid_engine::content::parse_cell_content;
use quillgrid_engine::grid::Grid;
use quillgrid_io::{csv, json};

use exit_codes::{EXIT_ERROR, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "qgrid")]
#[command(about = "QuillGrid spreadsheet documents, headless")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty document
    New {
        path: PathBuf,

        /// Document title
        #[arg(long, default_value = "Untitled")]
        title: String,
    },

    /// Print a document's shape and contents summary
    Info { path: PathBuf },

    /// Convert a document to another format
    #[command(after_help = "\
Examples:
  qgrid convert notes.json notes.csv --to csv
  qgrid convert notes.json notes.tsv --to tsv")]
    Convert {
        input: PathBuf,
        output: PathBuf,

        /// Output format
        #[arg(long, short = 't')]
        to: Format,
    },

    /// Paste TSV from stdin into a document at a cell, growing it to fit
    #[command(after_help = "\
Examples:
  xclip -o | qgrid paste notes.json --at 8,1")]
    Paste {
        path: PathBuf,

        /// Target cell as row,col (zero-based)
        #[arg(long, default_value = "0,0")]
        at: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Tsv,
    Json,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::New { path, title } => cmd_new(&path, &title),
        Commands::Info { path } => cmd_info(&path),
        Commands::Convert { input, output, to } => cmd_convert(&input, &output, to),
        Commands::Paste { path, at } => cmd_paste(&path, &at),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err((code, message)) => {
            eprintln!("error: {message}");
            ExitCode::from(code)
        }
    }
}

type CmdResult = Result<(), (u8, String)>;

fn cmd_new(path: &std::path::Path, title: &str) -> CmdResult {
    let settings = Settings::load();
    let grid = Grid::new(
        settings.initial_rows,
        settings.initial_cols,
        settings.default_column_width,
    );
    let document = json::Document::from_grid(title, &grid);
    json::save(&document, path).map_err(|e| (EXIT_IO, e))?;
    println!("created {} ({}x{})", path.display(), grid.rows(), grid.cols());
    Ok(())
}

fn cmd_info(path: &std::path::Path) -> CmdResult {
    let document = json::load(path).map_err(|e| (EXIT_IO, e))?;
    let grid = document.to_grid();

    let mut non_empty = 0usize;
    let mut images = 0usize;
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            let raw = grid.cell(r, c).unwrap_or_default();
            if !raw.is_empty() {
                non_empty += 1;
                images += parse_cell_content(raw).images.len();
            }
        }
    }

    println!("title:     {}", document.title);
    println!("size:      {} rows x {} cols", grid.rows(), grid.cols());
    println!("non-empty: {non_empty} cells");
    println!("images:    {images}");
    Ok(())
}

fn cmd_convert(input: &std::path::Path, output: &std::path::Path, to: Format) -> CmdResult {
    let document = json::load(input).map_err(|e| (EXIT_IO, e))?;
    let grid = document.to_grid();

    match to {
        Format::Csv => csv::export(&grid, output).map_err(|e| (EXIT_IO, e))?,
        Format::Tsv => csv::export_tsv(&grid, output).map_err(|e| (EXIT_IO, e))?,
        Format::Json => json::save(&document, output).map_err(|e| (EXIT_IO, e))?,
    }
    println!("wrote {}", output.display());
    Ok(())
}

fn cmd_paste(path: &std::path::Path, at: &str) -> CmdResult {
    let (row, col) = parse_cell_ref(at).ok_or((
        EXIT_USAGE,
        format!("invalid cell reference '{at}', expected row,col"),
    ))?;

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| (EXIT_IO, e.to_string()))?;
    if text.is_empty() {
        // Empty clipboard: nothing to do
        return Ok(());
    }

    let block = parse_tsv(&text);
    let document = json::load(path).map_err(|e| (EXIT_IO, e))?;
    let mut grid = document.to_grid();

    match paste_block(&mut grid, row, col, &block) {
        Some(outcome) => {
            log::debug!(
                "pasted {}x{} at ({row}, {col})",
                outcome.rows_written,
                outcome.cols_written
            );
            let updated = json::Document::from_grid(&document.title, &grid);
            json::save(&updated, path).map_err(|e| (EXIT_IO, e))?;
            println!(
                "pasted {}x{} cells, document now {}x{}",
                outcome.rows_written,
                outcome.cols_written,
                grid.rows(),
                grid.cols()
            );
            Ok(())
        }
        None => Err((EXIT_ERROR, "clipboard text parsed to an empty block".to_string())),
    }
}

fn parse_cell_ref(text: &str) -> Option<(usize, usize)> {
    let (row, col) = text.split_once(',')?;
    Some((row.trim().parse().ok()?, col.trim().parse().ok()?))
}
