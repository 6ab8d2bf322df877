// lib.rs - sample pairing and trim_galore invocation logic shared by both binaries

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// 3' adapter trimmed from the forward (R1) reads.
pub const ADAPTER_R1: &str = "AGATCGGAAGAGCACACGTCTGAACTCCAGTCAC";
/// 3' adapter trimmed from the reverse (R2) reads.
pub const ADAPTER_R2: &str = "AGATCGGAAGAGCGTCGTGTAGGGAAAGAGTGT";

/// Name of the external executable.
pub const TRIM_GALORE: &str = "trim_galore";
/// Subdirectory of the output root that trim_galore writes into.
pub const TRIM_GALORE_SUBDIR: &str = "TrimGalore";

const R1_MARKER: &str = "_R1.fastq.gz";
const R2_MARKER: &str = "_R2.fastq.gz";

/// One sequencing sample with both mate files present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePair {
    pub name: String,
    pub r1: PathBuf,
    pub r2: PathBuf,
}

/// Parameters for one trim_galore run. `output_dir` is the TrimGalore
/// subdirectory itself, not the output root.
#[derive(Debug, Clone)]
pub struct TrimSettings {
    pub quality: u32,
    pub length: u32,
    pub cores: usize,
    pub output_dir: PathBuf,
}

// Two-slot accumulator used while scanning; a base name only becomes a
// SamplePair once both slots are filled.
#[derive(Default)]
struct PairSlots {
    r1: Option<PathBuf>,
    r2: Option<PathBuf>,
}

/// Scan `input_dir` for `*_R1.fastq.gz` / `*_R2.fastq.gz` files and group
/// them into complete sample pairs, sorted by sample name.
///
/// The base name is the file name with the `_R1.fastq.gz` or `_R2.fastq.gz`
/// marker removed. Files with any other naming are silently ignored, and
/// base names missing either mate are dropped.
pub fn scan_sample_pairs(input_dir: &Path) -> Result<Vec<SamplePair>> {
    let entries = fs::read_dir(input_dir)
        .with_context(|| format!("failed to read input directory {}", input_dir.display()))?;

    let mut slots: HashMap<String, PairSlots> = HashMap::new();
    for entry in entries {
        let entry = entry?;
        let file_name = entry.file_name();
        let name = match file_name.to_str() {
            Some(name) => name,
            None => continue,
        };
        if !name.ends_with(".fastq.gz") {
            continue;
        }
        if name.contains(R1_MARKER) {
            let base = name.replace(R1_MARKER, "");
            slots.entry(base).or_default().r1 = Some(entry.path());
        } else if name.contains(R2_MARKER) {
            let base = name.replace(R2_MARKER, "");
            slots.entry(base).or_default().r2 = Some(entry.path());
        }
    }

    let mut pairs: Vec<SamplePair> = slots
        .into_iter()
        .filter_map(|(name, slot)| match (slot.r1, slot.r2) {
            (Some(r1), Some(r2)) => Some(SamplePair { name, r1, r2 }),
            _ => None,
        })
        .collect();
    pairs.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(pairs)
}

/// Build the trim_galore argument list for one sample pair: options first,
/// then the forward and reverse read files.
pub fn trim_galore_args(pair: &SamplePair, settings: &TrimSettings) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::with_capacity(16);
    args.push("--paired".into());
    args.push("--fastqc".into());
    args.push("--quality".into());
    args.push(settings.quality.to_string().into());
    args.push("--length".into());
    args.push(settings.length.to_string().into());
    args.push("--adapter".into());
    args.push(ADAPTER_R1.into());
    args.push("--adapter2".into());
    args.push(ADAPTER_R2.into());
    args.push("--cores".into());
    args.push(settings.cores.to_string().into());
    args.push("--output_dir".into());
    args.push(settings.output_dir.clone().into());
    args.push(pair.r1.clone().into());
    args.push(pair.r2.clone().into());
    args
}

/// Per-sample core budget when `sample_count` samples run concurrently:
/// the total split evenly, clamped to the 4..=8 range.
///
/// `sample_count` must be non-zero; callers reject empty batches first.
pub fn threads_per_sample(total_threads: usize, sample_count: usize) -> usize {
    (total_threads / sample_count).clamp(4, 8)
}

/// Run `program` with `args`, inheriting the parent's standard streams, and
/// block until it exits. A launch failure or non-zero exit is an error.
pub fn run_command(program: &str, args: &[OsString]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("failed to launch {}", program))?;
    if !status.success() {
        bail!("{} exited with {}", program, status);
    }
    Ok(())
}

/// Run trim_galore on one sample pair, creating the output directory first.
/// Directory creation is idempotent, so concurrent callers sharing one
/// output directory are fine.
pub fn run_trim_galore(pair: &SamplePair, settings: &TrimSettings) -> Result<()> {
    fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            settings.output_dir.display()
        )
    })?;
    run_command(TRIM_GALORE, &trim_galore_args(pair, settings))
        .with_context(|| format!("trim_galore failed for sample {}", pair.name))
}
