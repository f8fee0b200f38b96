//! macbits-cli - Command-line interface for macbits
//!
//! Decodes legacy Macintosh 1-bpp image resources to PBM (P4) files and
//! dumps the row-level diagnostic report for the corrupted title-page
//! format.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use macbits::{
    decode_macpaint, decode_title_page_with, decode_title_resource, CompressedRow, Raster,
    TitleDecodeOptions, DEFAULT_RETRY_SHIFT, RESOURCE_SCREEN_ROWS,
};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "macbits-cli")]
#[command(about = "A CLI tool for decoding legacy Macintosh 1-bpp image resources")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a title-page resource to a PBM image
    Title {
        /// Input resource file
        input: PathBuf,

        /// Output PBM file
        output: PathBuf,

        /// Skip the built-in known-bad-row patch table
        #[arg(long)]
        no_patches: bool,

        /// Also run the shifted-offset retry pass over flagged rows
        #[arg(long)]
        retry_shift: bool,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Decode a MacPaint document to a PBM image
    Macpaint {
        /// Input MacPaint file
        input: PathBuf,

        /// Output PBM file
        output: PathBuf,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Decode a 512-wide title-screen resource variant to a PBM image
    Resource {
        /// Input resource file
        input: PathBuf,

        /// Output PBM file
        output: PathBuf,

        /// Number of rows to decode
        #[arg(short, long, default_value_t = RESOURCE_SCREEN_ROWS)]
        rows: usize,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Audit a title-page resource and report suspect rows
    Audit {
        /// Input resource file
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Title {
            input,
            output,
            no_patches,
            retry_shift,
            force,
        } => decode_title_file(
            &input,
            &output,
            no_patches,
            retry_shift,
            force,
            cli.verbose,
            cli.quiet,
        ),
        Commands::Macpaint {
            input,
            output,
            force,
        } => decode_macpaint_file(&input, &output, force, cli.verbose, cli.quiet),
        Commands::Resource {
            input,
            output,
            rows,
            force,
        } => decode_resource_file(&input, &output, rows, force, cli.verbose, cli.quiet),
        Commands::Audit { input } => audit_file(&input, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn read_input(
    input: &PathBuf,
    verbose: bool,
    quiet: bool,
) -> Result<(Vec<u8>, Option<ProgressBar>), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let data = fs::read(input)?;

    if verbose {
        println!("Input size: {} bytes", data.len());
    }

    // Show progress bar for large files
    let progress = if !quiet && data.len() > 1024 * 1024 {
        let pb = ProgressBar::new(2);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message("Decoding...");
        Some(pb)
    } else {
        None
    };

    Ok((data, progress))
}

fn write_pbm(
    output: &PathBuf,
    raster: &Raster,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }

    // The packed raster is already the PBM P4 payload: MSB-first rows,
    // 1 = black, stride ceil(width / 8).
    let mut pbm = format!("P4\n{} {}\n", raster.width, raster.height).into_bytes();
    pbm.extend_from_slice(&raster.bits);
    fs::write(output, pbm)?;
    Ok(())
}

fn decode_title_file(
    input: &PathBuf,
    output: &PathBuf,
    no_patches: bool,
    retry_shift: bool,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if verbose {
        println!("Decoding '{}' to '{}'", input.display(), output.display());
    }

    let start_time = Instant::now();
    let (data, progress) = read_input(input, verbose, quiet)?;

    let mut options = TitleDecodeOptions::default();
    if no_patches {
        options.patches = None;
    }
    if retry_shift {
        options.retry_shift = Some(DEFAULT_RETRY_SHIFT);
    }

    if let Some(ref pb) = progress {
        pb.inc(1);
    }

    let decoded = decode_title_page_with(&data, &options)?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Decode complete");
    }

    write_pbm(output, &decoded.raster, force)?;

    if !quiet {
        println!("✓ Decode successful!");
        println!(
            "  Raster:  {}x{} ({} bytes)",
            decoded.raster.width,
            decoded.raster.height,
            decoded.raster.bits.len()
        );
        println!("  Rows parsed:   {}", decoded.rows.len());
        println!("  Rows patched:  {}", decoded.patched);
        println!("  Rows suspect:  {}", decoded.border_missing);
        println!("  Time:   {:.2?}", start_time.elapsed());
    }

    Ok(())
}

fn decode_macpaint_file(
    input: &PathBuf,
    output: &PathBuf,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if verbose {
        println!("Decoding '{}' to '{}'", input.display(), output.display());
    }

    let start_time = Instant::now();
    let (data, progress) = read_input(input, verbose, quiet)?;

    if let Some(ref pb) = progress {
        pb.inc(1);
    }

    let decoded = decode_macpaint(&data);

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Decode complete");
    }

    write_pbm(output, &decoded.raster, force)?;

    if !quiet {
        println!("✓ Decode successful!");
        println!(
            "  Raster: {}x{}, {} of {} rows decoded",
            decoded.raster.width,
            decoded.raster.height,
            decoded.rows_decoded,
            decoded.raster.height
        );
        println!("  Time:   {:.2?}", start_time.elapsed());
    }

    Ok(())
}

fn decode_resource_file(
    input: &PathBuf,
    output: &PathBuf,
    rows: usize,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if verbose {
        println!("Decoding '{}' to '{}'", input.display(), output.display());
    }

    let start_time = Instant::now();
    let (data, progress) = read_input(input, verbose, quiet)?;

    if let Some(ref pb) = progress {
        pb.inc(1);
    }

    let decoded = decode_title_resource(&data, rows);

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Decode complete");
    }

    write_pbm(output, &decoded.raster, force)?;

    if !quiet {
        println!("✓ Decode successful!");
        println!(
            "  Raster: {}x{}, {} of {} rows decoded",
            decoded.raster.width, decoded.raster.height, decoded.rows_decoded, rows
        );
        println!("  Time:   {:.2?}", start_time.elapsed());
    }

    Ok(())
}

fn audit_file(input: &PathBuf, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (data, _) = read_input(input, verbose, true)?;

    // Unpatched pass shows what the general parser recovers on its own;
    // the patched pass shows what ships.
    let raw_options = TitleDecodeOptions {
        patches: None,
        ..TitleDecodeOptions::default()
    };
    let unpatched = decode_title_page_with(&data, &raw_options)?;
    let patched = decode_title_page_with(&data, &TitleDecodeOptions::default())?;

    println!("Title Page Audit:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", data.len());
    println!("  Rows parsed: {}", unpatched.rows.len());
    println!("  Suspect rows (unpatched): {}", unpatched.border_missing);
    println!(
        "  Suspect rows (patched):   {} ({} rows patched)",
        patched.border_missing, patched.patched
    );

    let clusters = cluster_flagged_rows(&patched.rows);
    if clusters.is_empty() {
        println!("  Status: ✓ no suspect rows remain");
    } else {
        println!("  Remaining suspect clusters:");
        for (first, last) in &clusters {
            if first == last {
                println!("    row {first}");
            } else {
                println!("    rows {first}-{last} ({} rows)", last - first + 1);
            }
        }
    }

    if verbose {
        for row in patched.rows.iter().filter(|r| r.border_missing) {
            println!(
                "    row {:3}: prefix {} payload {} bytes{}",
                row.row_index,
                hex_bytes(&row.prefix_bytes),
                row.compressed_bytes.len(),
                if row.patched { " (patched)" } else { "" }
            );
        }
    }

    Ok(())
}

/// Group consecutive flagged row indices into (first, last) clusters.
fn cluster_flagged_rows(rows: &[CompressedRow]) -> Vec<(usize, usize)> {
    let mut clusters: Vec<(usize, usize)> = Vec::new();
    for row in rows.iter().filter(|r| r.border_missing) {
        match clusters.last_mut() {
            Some((_, last)) if *last + 1 == row.row_index => *last = row.row_index,
            _ => clusters.push((row.row_index, row.row_index)),
        }
    }
    clusters
}

fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
