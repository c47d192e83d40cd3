//! Generates term classes, visitors and builders from node specification tables.
//!
//! A table lists the node kinds of one expression type, one row per kind.
//! [`NodeSet::parse`] binds the rows to the expression type and classifies
//! every field as recursive or leaf. The [`cpp`] and [`rust`] modules render
//! a node set, and [`splice_generated_region`] replaces the marked region of
//! a target file with the rendered block.
//!
//! [`Manifest`] and [`plan`] run many such jobs at once.

mod config;
pub mod cpp;
mod error;
mod generate;
mod manifest;
mod node;
pub mod rust;
mod signature;
mod splice;
mod store;
mod table;

pub use config::Primitives;
pub use error::{GenerateError, RenderError};
pub use generate::{Change, Plan, load_node_set, plan, render_artifact};
pub use manifest::{ArtifactKind, Job, Language, MANIFEST_FILENAME, Manifest, ManifestError};
pub use node::{Field, FieldClass, Node, NodeSet};
pub use signature::{
    Parameter, Signature, SignatureError, parse_accessor_names, parse_parameters,
    parse_signature,
};
pub use splice::{END_MARKER, START_MARKER, SpliceError, splice_generated_region};
pub use store::{FsStore, MemoryStore, StoreError, TextStore};
pub use table::{NodeSpec, SpecError, parse_table};

/// The last `::` segment of a qualified type name.
pub(crate) fn base_name(expression: &str) -> &str {
    expression.rsplit("::").next().unwrap_or(expression)
}
