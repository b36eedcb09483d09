//! Inspection tool for Semaphore circuit artifacts.
//!
//! Usage:
//!   semgroup-artifacts info --dir ./snark-artifacts --depth 10
//!   semgroup-artifacts export-vk --dir ./snark-artifacts --depth 10
//!   semgroup-artifacts verify --vk ./snark-artifacts/semaphore-10.vk.bin

use anyhow::{bail, Context, Result};
use ark_bn254::Bn254;
use ark_groth16::VerifyingKey;
use ark_serialize::CanonicalDeserialize;
use clap::{Parser, Subcommand};
use semgroup_crypto::SnarkArtifacts;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "semgroup-artifacts")]
#[command(about = "Inspect the Semaphore wasm/zkey pair used for membership proofs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the wasm/zkey pair for a depth and print its verifying key hash.
    Info {
        #[arg(short, long, default_value = "./snark-artifacts")]
        dir: PathBuf,

        #[arg(long, default_value_t = 10)]
        depth: usize,
    },

    /// Write the verifying key of a zkey as compressed arkworks bytes.
    ExportVk {
        #[arg(short, long, default_value = "./snark-artifacts")]
        dir: PathBuf,

        #[arg(long, default_value_t = 10)]
        depth: usize,
    },

    /// Check an exported verifying key deserializes and matches an expected hash.
    Verify {
        #[arg(short, long)]
        vk: PathBuf,

        /// Expected VK hash (hex).
        #[arg(short, long)]
        expected_hash: Option<String>,
    },
}

fn compute_vk_hash(vk_bytes: &[u8]) -> String {
    hex::encode(blake3::hash(vk_bytes).as_bytes())
}

fn load(dir: &Path, depth: usize) -> Result<SnarkArtifacts> {
    SnarkArtifacts::load(dir, depth)
        .with_context(|| format!("Failed to load depth {} artifacts from {}", depth, dir.display()))
}

fn show_info(dir: &Path, depth: usize) -> Result<()> {
    let artifacts = load(dir, depth)?;
    let vk_bytes = artifacts.verifying_key_bytes()?;

    println!("Circuit: {}", SnarkArtifacts::artifact_name(depth));
    println!("  Wasm: {}", SnarkArtifacts::wasm_path(dir, depth).display());
    println!("  Zkey: {}", SnarkArtifacts::zkey_path(dir, depth).display());
    println!("  Public inputs: {}", artifacts.verifying_key().gamma_abc_g1.len() - 1);
    println!("  VK size: {} bytes", vk_bytes.len());
    println!("  VK hash: {}", compute_vk_hash(&vk_bytes));

    Ok(())
}

fn export_vk(dir: &Path, depth: usize) -> Result<()> {
    let artifacts = load(dir, depth)?;
    let vk_bytes = artifacts.verifying_key_bytes()?;
    let vk_hash = compute_vk_hash(&vk_bytes);

    let name = SnarkArtifacts::artifact_name(depth);
    let vk_path = dir.join(format!("{}.vk.bin", name));
    fs::write(&vk_path, &vk_bytes)?;
    println!("Verifying key: {} ({} bytes)", vk_path.display(), vk_bytes.len());

    let meta_path = dir.join(format!("{}.meta.json", name));
    let metadata = serde_json::json!({
        "circuit": "semaphore",
        "merkle_depth": depth,
        "vk_hash": vk_hash,
        "vk_size": vk_bytes.len(),
        "exported_at": chrono::Utc::now().to_rfc3339(),
    });
    fs::write(&meta_path, serde_json::to_string_pretty(&metadata)?)?;
    println!("VK hash: {}", vk_hash);
    println!("Metadata: {}", meta_path.display());

    Ok(())
}

fn verify_key(vk_path: &Path, expected_hash: Option<String>) -> Result<()> {
    println!("Verifying key: {}", vk_path.display());

    let vk_bytes = fs::read(vk_path).with_context(|| format!("Failed to read {}", vk_path.display()))?;
    let actual_hash = compute_vk_hash(&vk_bytes);
    println!("VK hash: {}", actual_hash);
    println!("Size: {} bytes", vk_bytes.len());

    let vk = VerifyingKey::<Bn254>::deserialize_compressed(&vk_bytes[..])
        .context("Verifying key does not deserialize")?;
    let inputs = vk.gamma_abc_g1.len().saturating_sub(1);
    println!("Deserialization: OK ({} public inputs)", inputs);
    if inputs != 4 {
        bail!("Expected 4 public inputs for a Semaphore circuit, found {}", inputs);
    }

    if let Some(expected) = expected_hash {
        if actual_hash != expected.trim().to_lowercase() {
            bail!("VK hash mismatch: expected {}, actual {}", expected, actual_hash);
        }
        println!("Hash match: OK");
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { dir, depth } => show_info(&dir, depth)?,
        Commands::ExportVk { dir, depth } => export_vk(&dir, depth)?,
        Commands::Verify { vk, expected_hash } => verify_key(&vk, expected_hash)?,
    }

    Ok(())
}
