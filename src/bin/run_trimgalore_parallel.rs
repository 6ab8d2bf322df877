// run_trimgalore_parallel.rs - trim all samples concurrently, one worker per pair

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossbeam_channel::unbounded;
use std::fs;
use std::path::{absolute, PathBuf};
use std::thread;

use trimgalore_runner::{
    run_trim_galore, scan_sample_pairs, threads_per_sample, TrimSettings, TRIM_GALORE_SUBDIR,
};

#[derive(Parser)]
#[command(name = "run-trimgalore-parallel")]
#[command(about = "Run TrimGalore on paired-end FASTQ files, one worker per sample")]
struct Args {
    #[arg(short = 'i', long, help = "Directory containing input FASTQ files")]
    input_dir: PathBuf,

    #[arg(short = 'o', long, help = "Directory to store output files")]
    output_dir: PathBuf,

    #[arg(
        short = 't',
        long,
        default_value_t = num_cpus::get(),
        help = "Total number of threads available"
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
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    let pairs = scan_sample_pairs(&input_dir)?;
    if pairs.is_empty() {
        bail!(
            "no complete *_R1.fastq.gz / *_R2.fastq.gz pairs found in {}",
            input_dir.display()
        );
    }

    println!("Number of paired-end samples: {}", pairs.len());
    let cores = threads_per_sample(args.threads, pairs.len());
    println!("Threads per sample: {}", cores);

    let settings = TrimSettings {
        quality: args.quality,
        length: args.length,
        cores,
        output_dir: output_dir.join(TRIM_GALORE_SUBDIR),
    };

    // One worker per sample pair; each blocks on its own trim_galore
    // process. Results come back over a channel so every failure is
    // reported, not just the first.
    let (tx, rx) = unbounded();
    let mut handles = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let tx = tx.clone();
        let settings = settings.clone();
        handles.push(thread::spawn(move || {
            let result = run_trim_galore(&pair, &settings);
            // send only fails if the receiver is gone, and main keeps it
            // alive until all workers have finished
            let _ = tx.send((pair.name, result));
        }));
    }
    drop(tx);

    let mut failed = Vec::new();
    for (name, result) in rx {
        if let Err(err) = result {
            eprintln!("sample {}: {:#}", name, err);
            failed.push(name);
        }
    }
    for handle in handles {
        handle.join().unwrap();
    }

    if !failed.is_empty() {
        bail!(
            "trim_galore failed for {} sample(s): {}",
            failed.len(),
            failed.join(", ")
        );
    }
    Ok(())
}
