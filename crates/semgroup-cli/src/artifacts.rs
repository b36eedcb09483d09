//! Fetches the published Semaphore wasm/zkey pair for a tree depth.

use semgroup_crypto::SnarkArtifacts;
use semgroup_types::{SemgroupError, SemgroupResult};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_ARTIFACTS_URL: &str = "https://snark-artifacts.pse.dev/semaphore/latest";

/// `<base>/semaphore-<depth>.<extension>`
pub fn artifact_url(base_url: &str, depth: usize, extension: &str) -> String {
    format!(
        "{}/{}.{}",
        base_url.trim_end_matches('/'),
        SnarkArtifacts::artifact_name(depth),
        extension
    )
}

/// Downloads whichever of the two files is missing from `dir`.
pub async fn ensure_artifacts(dir: &Path, base_url: &str, depth: usize) -> SemgroupResult<()> {
    let targets = [
        (SnarkArtifacts::wasm_path(dir, depth), "wasm"),
        (SnarkArtifacts::zkey_path(dir, depth), "zkey"),
    ];

    for (path, extension) in targets {
        if path.is_file() {
            debug!("Using cached {}", path.display());
            continue;
        }

        let url = artifact_url(base_url, depth, extension);
        info!("Downloading {}...", url);
        let bytes = download_file(&url).await?;

        tokio::fs::create_dir_all(dir).await?;
        // An interrupted download must not look cached.
        let partial = path.with_extension(format!("{}.part", extension));
        tokio::fs::write(&partial, &bytes).await?;
        tokio::fs::rename(&partial, &path).await?;
        info!("Saved {} ({} bytes)", path.display(), bytes.len());
    }

    Ok(())
}

async fn download_file(url: &str) -> SemgroupResult<Vec<u8>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(300))
        .build()
        .map_err(|e| SemgroupError::Network(format!("Failed to create HTTP client: {}", e)))?;

    let response = client
        .get(url)
        .header("User-Agent", concat!("semgroup/", env!("CARGO_PKG_VERSION")))
        .send()
        .await
        .map_err(|e| SemgroupError::Network(format!("Download failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(SemgroupError::Network(format!(
            "Download of {} failed with status: {}",
            url,
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| SemgroupError::Network(format!("Failed to read response: {}", e)))?;

    Ok(bytes.to_vec())
}
