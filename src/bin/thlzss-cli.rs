//! thlzss-cli - Command-line interface for thlzss
//!
//! Compresses and decompresses raw LZSS streams. The format has no header, so
//! the tool cannot tell a compressed file from any other; `info` simply tries
//! to decode it.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thlzss::{compress_with_stats, decompress_bytes, decompress_exact, inspect_stream};

#[derive(Parser)]
#[command(name = "thlzss-cli")]
#[command(about = "A CLI tool for 8 KiB-dictionary LZSS compression and decompression")]
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
    /// Compress a file
    Compress {
        /// Input file to compress
        input: PathBuf,

        /// Output compressed file
        output: PathBuf,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress an LZSS stream
    Decompress {
        /// Input compressed file
        input: PathBuf,

        /// Output decompressed file
        output: PathBuf,

        /// Required decompressed size, as recorded by the archive
        #[arg(short, long)]
        expected_size: Option<usize>,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Decode a compressed file and report what it contains
    Info {
        /// Compressed file to analyze
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            force,
        } => compress_file(&input, &output, force, cli.verbose, cli.quiet),
        Commands::Decompress {
            input,
            output,
            expected_size,
            force,
        } => decompress_file(
            &input,
            &output,
            expected_size,
            force,
            cli.verbose,
            cli.quiet,
        ),
        Commands::Info { input } => show_file_info(&input, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn check_paths(input: &Path, output: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }
    Ok(())
}

/// Two-step bar for large inputs: one tick after reading, one after coding
fn progress_bar(quiet: bool, size: usize, message: &'static str) -> Option<ProgressBar> {
    if quiet || size <= 1024 * 1024 {
        return None;
    }

    let pb = ProgressBar::new(2);
    // The template is a constant; fall back to the default style if it is rejected
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message);
    pb.inc(1);
    Some(pb)
}

fn compress_file(
    input: &Path,
    output: &Path,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;

    if verbose {
        println!(
            "Compressing '{}' to '{}'",
            input.display(),
            output.display()
        );
    }

    let start_time = Instant::now();

    let input_data = fs::read(input)?;
    let input_size = input_data.len();

    if verbose {
        println!("Input size: {} bytes", input_size);
    }

    let progress = progress_bar(quiet, input_size, "Compressing...");

    let (compressed_data, stats) = compress_with_stats(&input_data);

    if let Some(pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Compression complete");
    }

    fs::write(output, &compressed_data)?;

    let compression_time = start_time.elapsed();
    let output_size = compressed_data.len();

    if !quiet {
        println!("✓ Compression successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", output_size);
        println!("  Ratio:  {:.1}%", stats.compression_ratio * 100.0);
        println!("  Time:   {:.2?}", compression_time);

        if verbose {
            println!(
                "  Entries: {} literals, {} matches (longest {})",
                stats.literal_count, stats.match_count, stats.longest_match
            );
        }

        if output_size > input_size {
            println!("  Note: File expanded during compression (common for small/random data)");
        }
    }

    Ok(())
}

fn decompress_file(
    input: &Path,
    output: &Path,
    expected_size: Option<usize>,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;

    if verbose {
        println!(
            "Decompressing '{}' to '{}'",
            input.display(),
            output.display()
        );
    }

    let start_time = Instant::now();

    let compressed_data = fs::read(input)?;
    let input_size = compressed_data.len();

    if verbose {
        println!("Compressed size: {} bytes", input_size);
        if let Some(size) = expected_size {
            println!("Expected size: {} bytes", size);
        }
    }

    let progress = progress_bar(quiet, input_size, "Decompressing...");

    let decompressed_data = match expected_size {
        Some(size) => decompress_exact(&compressed_data, size),
        None => decompress_bytes(&compressed_data),
    }
    .map_err(|e| format!("Decompression failed: {}", e))?;

    if let Some(pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Decompression complete");
    }

    fs::write(output, &decompressed_data)?;

    let decompression_time = start_time.elapsed();
    let output_size = decompressed_data.len();

    if !quiet {
        println!("✓ Decompression successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", output_size);
        if output_size > 0 {
            let ratio = (input_size as f64 / output_size as f64) * 100.0;
            println!("  Ratio:  {:.1}%", ratio);
        }
        println!("  Time:   {:.2?}", decompression_time);
    }

    Ok(())
}

fn show_file_info(input: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let data = fs::read(input)?;
    let file_size = data.len();

    println!("LZSS File Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", file_size);

    match inspect_stream(&data) {
        Ok(stats) => {
            println!("  Decompressed Size: {} bytes", stats.output_bytes);
            println!("  Stream Length: {} bytes", stats.input_bytes);
            println!("  Compression Ratio: {:.1}%", stats.compression_ratio * 100.0);
            println!("  Literals: {}", stats.literal_count);
            println!("  Matches: {}", stats.match_count);
            if verbose {
                println!("  Longest Match: {} bytes", stats.longest_match);
                let trailing = file_size as u64 - stats.input_bytes;
                if trailing > 0 {
                    println!("  Trailing bytes after terminator: {}", trailing);
                }
            }
            println!("  Status: ✓ Valid LZSS stream");
        }
        Err(e) => {
            println!("  Status: ✗ Invalid or truncated LZSS stream");
            if verbose {
                println!("  Error: {}", e);
            }
        }
    }

    Ok(())
}
