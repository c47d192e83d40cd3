use std::path::PathBuf;

use crate::manifest::ManifestError;
use crate::splice::SpliceError;
use crate::store::StoreError;
use crate::table::SpecError;

/// Errors raised while rendering a node set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("node `{node}`: field name `{name}` clashes with a name used by the dispatcher")]
    ReservedName { node: String, name: String },
    #[error("node `{node}`: `{ty}` is not a valid Rust type")]
    UnsupportedType { node: String, ty: String },
    #[error("`{0}` is not a valid Rust identifier")]
    InvalidIdentifier(String),
    #[error("nodes `{first}` and `{second}` both map to the Rust name `{name}`")]
    DuplicateName {
        first: String,
        second: String,
        name: String,
    },
    #[error("generated Rust code does not parse: {0}")]
    Unparsable(String),
}

/// Errors raised by a generation run. Each names the job it came from.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Spec(#[from] SpecError),
    #[error("{} -> {}: {error}", table.display(), target.display())]
    Render {
        table: PathBuf,
        target: PathBuf,
        #[source]
        error: RenderError,
    },
    #[error("{}: {error}", target.display())]
    Splice {
        target: PathBuf,
        #[source]
        error: SpliceError,
    },
}
