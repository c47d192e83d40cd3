use std::path::{Path, PathBuf};

use clap::ValueEnum;
use termgen::{ArtifactKind, FsStore, Language};

/// What to render, as accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum KindArg {
    /// One class per node (C++) or the expression enum (Rust)
    Classes,
    /// Read-only visitor
    Visitor,
    /// Rebuilding visitor
    Builder,
    /// `is_<node>` tests
    Predicates,
}

impl From<KindArg> for ArtifactKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Classes => ArtifactKind::Classes,
            KindArg::Visitor => ArtifactKind::Visitor,
            KindArg::Builder => ArtifactKind::Builder,
            KindArg::Predicates => ArtifactKind::Predicates,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LanguageArg {
    #[default]
    Cpp,
    Rust,
}

impl From<LanguageArg> for Language {
    fn from(language: LanguageArg) -> Self {
        match language {
            LanguageArg::Cpp => Language::Cpp,
            LanguageArg::Rust => Language::Rust,
        }
    }
}

/// A store rooted at the directory containing `file`, and `file`'s name in it.
pub fn store_for(file: &Path) -> (FsStore, PathBuf) {
    let dir = file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let name = file
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| file.to_owned());
    (FsStore::new(dir), name)
}
