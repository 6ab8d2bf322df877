// run_trimgalore.rs - trim paired-end FASTQ samples one at a time

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{absolute, PathBuf};

use trimgalore_runner::{run_trim_galore, scan_sample_pairs, TrimSettings, TRIM_GALORE_SUBDIR};

#[derive(Parser)]
#[command(name = "run-trimgalore")]
#[command(about = "Run TrimGalore on paired-end FASTQ files")]
struct Args {
    #[arg(short = 'i', long, help = "Directory containing input FASTQ files")]
    input_dir: PathBuf,

    #[arg(short = 'o', long, help = "Directory to store output files")]
    output_dir: PathBuf,

    #[arg(
        short = 't',
        long,
        default_value = "1",
        help = "Number of threads to use for TrimGalore"
    )]
    threads: usize,

    #[arg(
        long,
        default_value = "40",
        help = "Minimum paired-end read length to allow retention"
    )]
    length: u32,

    #[arg(
        long,
        default_value = "20",
        help = "Trim low-quality ends from reads in addition to adapter removal"
    )]
    quality: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let input_dir = absolute(&args.input_dir)?;
    let output_dir = absolute(&args.output_dir)?;
    let trim_dir = output_dir.join(TRIM_GALORE_SUBDIR);
    fs::create_dir_all(&trim_dir)
        .with_context(|| format!("failed to create output directory {}", trim_dir.display()))?;

    let settings = TrimSettings {
        quality: args.quality,
        length: args.length,
        cores: args.threads,
        output_dir: trim_dir,
    };

    for pair in scan_sample_pairs(&input_dir)? {
        run_trim_galore(&pair, &settings)?;
    }
    Ok(())
}
