use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::rank::Rank;

const MANIFEST_VERSION: u8 = 1;

/// File name of the manifest written next to the cards.
pub const MANIFEST_FILE: &str = "manifest.json";

/// One written card and the digest of its PNG bytes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestEntry {
    pub suit: String,
    pub rank: Rank,
    pub file: String,
    pub sha256: String,
}

/// Record of a render run, used to check later runs are byte-identical.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    pub version: u8,
    pub generated_at: DateTime<Utc>,
    pub config_digest: String,
    pub cards: Vec<ManifestEntry>,
}

/// Differences between a manifest and a set of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDiff {
    /// Present on both sides with different digests.
    pub mismatched: Vec<String>,
    /// Listed in the manifest but not in the other set.
    pub missing: Vec<String>,
    /// In the other set but not listed in the manifest.
    pub unexpected: Vec<String>,
}

impl ManifestDiff {
    pub fn is_clean(&self) -> bool {
        self.mismatched.is_empty() && self.missing.is_empty() && self.unexpected.is_empty()
    }
}

impl Manifest {
    pub fn new(config_digest: String, cards: Vec<ManifestEntry>) -> Self {
        Self {
            version: MANIFEST_VERSION,
            generated_at: Utc::now(),
            config_digest,
            cards,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .open(path)
            .with_context(|| format!("failed to open manifest {}", path.display()))?;
        let manifest: Manifest = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse manifest {}", path.display()))?;
        if manifest.version != MANIFEST_VERSION {
            return Err(anyhow!(
                "unsupported manifest version {} in {}",
                manifest.version,
                path.display()
            ));
        }
        Ok(manifest)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to write manifest {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).context("failed to serialize manifest")?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Compare by file name against `actual`.
    pub fn compare(&self, actual: &[ManifestEntry]) -> ManifestDiff {
        let expected: BTreeMap<&str, &str> = self
            .cards
            .iter()
            .map(|entry| (entry.file.as_str(), entry.sha256.as_str()))
            .collect();
        let actual: BTreeMap<&str, &str> = actual
            .iter()
            .map(|entry| (entry.file.as_str(), entry.sha256.as_str()))
            .collect();

        let mut diff = ManifestDiff::default();
        for (file, digest) in &expected {
            match actual.get(file) {
                Some(other) if other == digest => {}
                Some(_) => diff.mismatched.push(file.to_string()),
                None => diff.missing.push(file.to_string()),
            }
        }
        for file in actual.keys() {
            if !expected.contains_key(file) {
                diff.unexpected.push(file.to_string());
            }
        }
        diff
    }
}

/// Lowercase hex SHA-256 of `bytes`.
pub fn digest_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
