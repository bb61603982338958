//! Submission manifest - a JSON description of a whole draft
//!
//! ```json
//! {
//!   "manuscriptTitle": "Mobile Money and Household Savings",
//!   "topic": "Financial Inclusion and Sector Stability",
//!   "abstract": "...",
//!   "keywords": "mobile money, savings",
//!   "authors": [{"fullName": "...", "email": "...", "affiliation": "..."}],
//!   "files": {"Manuscript File": ["paper.pdf"], "Cover Letter": ["letter.pdf"]},
//!   "declarations": {"ethics": true, "conflicts": true, "copyright": true}
//! }
//! ```
//!
//! Relative file paths are resolved against the manifest's directory.

use journal_submit::error::{Error, Result};
use journal_submit::types::{Author, Declarations, FileToUpload, RequirementSlot};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Manifest {
    pub manuscript_title: String,
    pub topic: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub keywords: String,
    pub authors: Vec<Author>,
    #[serde(default)]
    pub files: BTreeMap<RequirementSlot, Vec<PathBuf>>,
    #[serde(default)]
    pub declarations: Declarations,
}

impl Manifest {
    /// Read and parse a manifest, resolving file paths
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut manifest: Self = serde_json::from_str(&contents)?;

        if manifest.authors.is_empty() {
            return Err(Error::Validation(
                "manifest must list at least one author".to_string(),
            ));
        }

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        for paths in manifest.files.values_mut() {
            for file in paths.iter_mut() {
                if file.is_relative() {
                    *file = base.join(&*file);
                }
            }
        }

        Ok(manifest)
    }
}

/// Read a local file into an upload part
pub async fn read_upload(path: &Path) -> Result<FileToUpload> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        Error::Validation(format!("cannot read {}: {e}", path.display()))
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(FileToUpload::new(&name, bytes))
}

/// Read every file of a batch
pub async fn read_uploads(paths: &[PathBuf]) -> Result<Vec<FileToUpload>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(read_upload(path).await?);
    }
    Ok(files)
}
