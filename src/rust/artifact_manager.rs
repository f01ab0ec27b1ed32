use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use crate::artifacts::ArtifactKind;

/// Name of the optional checksum manifest inside an artifact directory.
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Failed to decode {file}: {source}")]
    DecodeError {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Hash mismatch: expected {expected}, got {actual} for {file} file")]
    HashMismatch {
        file: String,
        expected: String,
        actual: String,
    },
    #[error("Manifest has no checksum for {0}")]
    MissingChecksum(String),
    #[error("Invalid {kind}: {reason}")]
    Invalid { kind: String, reason: String },
}

/// Locates, verifies and decodes the persisted artifacts of one directory.
#[derive(Debug, Clone)]
pub struct ArtifactManager {
    artifacts_dir: PathBuf,
}

impl ArtifactManager {
    /// Creates a manager for the default artifact directory
    pub fn new_default() -> Self {
        Self::new(Self::get_default_artifacts_dir())
    }

    /// Returns the default artifact directory path
    pub fn get_default_artifacts_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("NEWSCAT_CACHE") {
            return PathBuf::from(path).join("artifacts");
        }

        // 2. Use platform-specific cache directory
        if let Some(cache_dir) = dirs::cache_dir() {
            return cache_dir.join("newscat").join("artifacts");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".cache").join("newscat").join("artifacts");
        }

        // 4. If all else fails, use system temp directory (platform agnostic)
        env::temp_dir().join("newscat").join("artifacts")
    }

    pub fn new<P: AsRef<Path>>(artifacts_dir: P) -> Self {
        Self {
            artifacts_dir: artifacts_dir.as_ref().to_path_buf(),
        }
    }

    pub fn artifacts_dir(&self) -> &Path {
        &self.artifacts_dir
    }

    pub fn artifact_path(&self, kind: ArtifactKind) -> PathBuf {
        self.artifacts_dir.join(kind.file_name())
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.artifacts_dir.join(MANIFEST_FILE)
    }

    pub fn has_manifest(&self) -> bool {
        self.manifest_path().exists()
    }

    /// Artifacts that are not present on disk.
    pub fn missing_artifacts(&self) -> Vec<ArtifactKind> {
        ArtifactKind::ALL
            .into_iter()
            .filter(|&kind| !self.artifact_path(kind).exists())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        let missing = self.missing_artifacts();
        log::info!("Checking artifacts in {:?}", self.artifacts_dir);
        for kind in &missing {
            log::info!("  Missing {}: {:?}", kind, self.artifact_path(*kind));
        }
        missing.is_empty()
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::NotFound(path.to_path_buf()));
        }
        Ok(fs::read(path)?)
    }

    /// Decodes one artifact file.
    pub fn load<T: DeserializeOwned>(&self, kind: ArtifactKind) -> Result<T, ArtifactError> {
        let path = self.artifact_path(kind);
        log::info!("Loading {} from {:?}", kind, path);
        let bytes = self.read(&path)?;
        serde_json::from_slice(&bytes).map_err(|source| {
            log::error!("Failed to decode {}: {}", kind, source);
            ArtifactError::DecodeError {
                file: kind.file_name().to_string(),
                source,
            }
        })
    }

    /// Loads the known-author list presented to users.
    pub fn load_authors(&self) -> Result<Vec<String>, ArtifactError> {
        self.load(ArtifactKind::Authors)
    }

    fn load_manifest(&self) -> Result<BTreeMap<String, String>, ArtifactError> {
        let path = self.manifest_path();
        let bytes = self.read(&path)?;
        serde_json::from_slice(&bytes).map_err(|source| ArtifactError::DecodeError {
            file: MANIFEST_FILE.to_string(),
            source,
        })
    }

    fn hash_file(&self, path: &Path) -> Result<String, ArtifactError> {
        let bytes = self.read(path)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Checks one artifact against the manifest.
    ///
    /// Returns `Ok(false)` if the file exists but its digest differs.
    pub fn verify_artifact(&self, kind: ArtifactKind) -> Result<bool, ArtifactError> {
        let manifest = self.load_manifest()?;
        let expected = manifest
            .get(kind.file_name())
            .ok_or_else(|| ArtifactError::MissingChecksum(kind.file_name().to_string()))?;
        let actual = self.hash_file(&self.artifact_path(kind))?;
        log::debug!("{}: expected {}, calculated {}", kind, expected, actual);
        Ok(&actual == expected)
    }

    /// Verifies every artifact against `manifest.json`.
    ///
    /// A directory without a manifest is accepted with a warning; a manifest
    /// that is present must cover and match every artifact.
    pub fn verify_artifacts(&self) -> Result<(), ArtifactError> {
        if !self.has_manifest() {
            log::warn!(
                "No {} in {:?}, skipping checksum verification",
                MANIFEST_FILE,
                self.artifacts_dir
            );
            return Ok(());
        }

        let manifest = self.load_manifest()?;
        for kind in ArtifactKind::ALL {
            let file = kind.file_name();
            let expected = manifest
                .get(file)
                .ok_or_else(|| ArtifactError::MissingChecksum(file.to_string()))?;
            let actual = self.hash_file(&self.artifact_path(kind))?;
            if &actual != expected {
                log::error!("{} hash mismatch: expected {}, got {}", kind, expected, actual);
                return Err(ArtifactError::HashMismatch {
                    file: file.to_string(),
                    expected: expected.clone(),
                    actual,
                });
            }
            log::info!("Verified {}", kind);
        }
        Ok(())
    }

    /// Computes digests of all artifacts and writes them to `manifest.json`.
    pub fn write_manifest(&self) -> Result<PathBuf, ArtifactError> {
        let mut manifest = BTreeMap::new();
        for kind in ArtifactKind::ALL {
            let digest = self.hash_file(&self.artifact_path(kind))?;
            manifest.insert(kind.file_name().to_string(), digest);
        }

        let path = self.manifest_path();
        let json = serde_json::to_vec_pretty(&manifest).map_err(io::Error::from)?;
        fs::write(&path, json)?;
        log::info!("Wrote checksums for {} artifacts to {:?}", manifest.len(), path);
        Ok(path)
    }
}
