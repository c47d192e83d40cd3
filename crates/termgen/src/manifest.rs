//! The `termgen.toml` manifest describing generation jobs.
//!
//! ```toml
//! [primitives]
//! tag_test_prefix = "core::detail::gsIs"
//!
//! [[job]]
//! kind = "visitor"
//! table = "tables/process_expression.txt"
//! expression = "process_expression"
//! target = "include/mcrl2/process/process_expression_visitor.h"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::config::Primitives;
use crate::store::{StoreError, TextStore};

/// The standard manifest filename.
pub const MANIFEST_FILENAME: &str = "termgen.toml";

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{}: target {} is written by jobs {first} and {second}", path.display(), target.display())]
    DuplicateTarget {
        path: PathBuf,
        target: PathBuf,
        first: usize,
        second: usize,
    },
}

/// What a job renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// One class per node (C++) or the expression enum (Rust).
    Classes,
    /// The read-only visitor.
    Visitor,
    /// The rebuilding visitor.
    Builder,
    /// `is_<node>` tag tests.
    Predicates,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArtifactKind::Classes => "classes",
            ArtifactKind::Visitor => "visitor",
            ArtifactKind::Builder => "builder",
            ArtifactKind::Predicates => "predicates",
        })
    }
}

/// The language generated code is written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    #[default]
    Cpp,
    Rust,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::Cpp => "cpp",
            Language::Rust => "rust",
        })
    }
}

/// One table rendered into one target file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Job {
    pub kind: ArtifactKind,
    #[serde(default)]
    pub language: Language,
    /// Specification table, relative to the manifest directory.
    pub table: PathBuf,
    /// Name of the expression type; fields of exactly this type are recursive.
    pub expression: String,
    /// File containing the generated-text markers, relative to the manifest directory.
    pub target: PathBuf,
    /// Base class of generated classes. Defaults to `expression`.
    #[serde(default)]
    pub super_type: Option<String>,
}

impl Job {
    pub fn super_type(&self) -> &str {
        self.super_type.as_deref().unwrap_or(&self.expression)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub primitives: Primitives,
    #[serde(default, rename = "job")]
    pub jobs: Vec<Job>,
}

impl Manifest {
    /// Parses manifest text; `path` is only used in error messages.
    pub fn parse(path: &Path, text: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest = toml::from_str(text).map_err(|source| ManifestError::Parse {
            path: path.to_owned(),
            source,
        })?;

        manifest.check_targets(path)?;
        Ok(manifest)
    }

    fn check_targets(&self, path: &Path) -> Result<(), ManifestError> {
        let mut targets: IndexMap<&Path, usize> = IndexMap::new();
        for (index, job) in self.jobs.iter().enumerate() {
            if let Some(&first) = targets.get(job.target.as_path()) {
                return Err(ManifestError::DuplicateTarget {
                    path: path.to_owned(),
                    target: job.target.clone(),
                    first: first + 1,
                    second: index + 1,
                });
            }
            targets.insert(job.target.as_path(), index);
        }
        Ok(())
    }

    pub fn load(store: &impl TextStore, path: &Path) -> Result<Self, ManifestError> {
        let text = store.read_text(path)?;
        Self::parse(path, &text)
    }
}
