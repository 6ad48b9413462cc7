use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{DatasetManifest, VersionTag};
use crate::util::sha256_hex;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read manifest: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse manifest: {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub path: PathBuf,
    pub sha256: String,
    pub manifest: DatasetManifest,
}

impl LoadedManifest {
    pub fn version(&self) -> Option<VersionTag> {
        self.manifest.version.clone()
    }
}

pub fn load_manifest(path: &Path) -> Result<LoadedManifest, ManifestError> {
    if !path.is_file() {
        return Err(ManifestError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let raw = fs::read(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest: DatasetManifest =
        serde_json::from_slice(&raw).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut seen = HashSet::new();
    for source in &manifest.sources {
        if !seen.insert(source.id.as_str()) {
            warn!(source_id = %source.id, "duplicate source id in manifest");
        }
    }

    debug!(
        path = %path.display(),
        sources = manifest.sources.len(),
        "loaded dataset manifest"
    );

    Ok(LoadedManifest {
        path: path.to_path_buf(),
        sha256: sha256_hex(&raw),
        manifest,
    })
}

#[cfg(test)]
mod tests;
