//! Running manifest jobs against a [`TextStore`].
//!
//! Planning renders and splices every job in memory. Nothing is written
//! until the whole manifest has planned successfully.

use std::path::{Path, PathBuf};

use crate::config::Primitives;
use crate::error::{GenerateError, RenderError};
use crate::manifest::{ArtifactKind, Job, Language, Manifest};
use crate::node::NodeSet;
use crate::splice::splice_generated_region;
use crate::store::{StoreError, TextStore};
use crate::{cpp, rust};

/// Renders one artifact of a node set.
///
/// `super_type` is only read when rendering C++ classes.
pub fn render_artifact(
    set: &NodeSet,
    kind: ArtifactKind,
    language: Language,
    super_type: &str,
    primitives: &Primitives,
) -> Result<String, RenderError> {
    match (language, kind) {
        (Language::Cpp, ArtifactKind::Classes) => {
            Ok(cpp::synthesize_classes(set, super_type, primitives))
        }
        (Language::Cpp, ArtifactKind::Visitor) => cpp::synthesize_visitor(set),
        (Language::Cpp, ArtifactKind::Builder) => cpp::synthesize_builder(set, primitives),
        (Language::Cpp, ArtifactKind::Predicates) => Ok(cpp::synthesize_is_predicates(
            set,
            &primitives.tag_test_prefix,
        )),
        (Language::Rust, ArtifactKind::Classes) => rust::synthesize_enum(set),
        (Language::Rust, ArtifactKind::Visitor) => rust::synthesize_visitor(set),
        (Language::Rust, ArtifactKind::Builder) => rust::synthesize_builder(set),
        (Language::Rust, ArtifactKind::Predicates) => rust::synthesize_predicates(set),
    }
}

/// The planned contents of one target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub target: PathBuf,
    pub before: String,
    pub after: String,
}

impl Change {
    pub fn is_changed(&self) -> bool {
        self.before != self.after
    }
}

/// Every target of a manifest, in job order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub changes: Vec<Change>,
}

impl Plan {
    /// Targets whose generated region is out of date.
    pub fn stale(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter().filter(|change| change.is_changed())
    }

    pub fn is_up_to_date(&self) -> bool {
        self.stale().next().is_none()
    }

    /// Writes every changed target and returns how many were written.
    pub fn commit(&self, store: &mut impl TextStore) -> Result<usize, StoreError> {
        let mut written = 0;
        for change in self.stale() {
            store.write_text(&change.target, &change.after)?;
            tracing::info!(path = %change.target.display(), "updated generated region");
            written += 1;
        }
        Ok(written)
    }
}

/// Renders every job of `manifest` and splices it into its target.
pub fn plan(manifest: &Manifest, store: &impl TextStore) -> Result<Plan, GenerateError> {
    let changes = manifest
        .jobs
        .iter()
        .map(|job| plan_job(job, &manifest.primitives, store))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Plan { changes })
}

fn plan_job(
    job: &Job,
    primitives: &Primitives,
    store: &impl TextStore,
) -> Result<Change, GenerateError> {
    let set = load_node_set(store, &job.table, &job.expression)?;
    let block = render_artifact(&set, job.kind, job.language, job.super_type(), primitives)
        .map_err(|error| GenerateError::Render {
            table: job.table.clone(),
            target: job.target.clone(),
            error,
        })?;

    let before = store.read_text(&job.target)?;
    let after =
        splice_generated_region(&before, &block).map_err(|error| GenerateError::Splice {
            target: job.target.clone(),
            error,
        })?;
    tracing::debug!(
        kind = %job.kind,
        language = %job.language,
        path = %job.target.display(),
        changed = before != after,
        "planned job"
    );

    Ok(Change {
        target: job.target.clone(),
        before,
        after,
    })
}

/// Reads and classifies a table, naming it by its path in error messages.
pub fn load_node_set(
    store: &impl TextStore,
    table: &Path,
    expression: &str,
) -> Result<NodeSet, GenerateError> {
    let text = store.read_text(table)?;
    Ok(NodeSet::parse(
        &table.display().to_string(),
        &text,
        expression,
    )?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::splice::SpliceError;
    use crate::store::MemoryStore;

    const TABLE: &str = "Tau | tau() () | The value tau\n";
    const HEADER: &str = "// header\n//--- start generated text ---//\n//--- end generated text ---//\n";

    fn manifest(jobs: &str) -> Manifest {
        Manifest::parse(Path::new("termgen.toml"), jobs).unwrap()
    }

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert("tau.txt", TABLE);
        store.insert("out.h", HEADER);
        store.insert("out.rs", HEADER);
        store
    }

    const TWO_JOBS: &str = "[[job]]\nkind = \"predicates\"\ntable = \"tau.txt\"\nexpression = \"process_expression\"\ntarget = \"out.h\"\n\
                            [[job]]\nkind = \"predicates\"\nlanguage = \"rust\"\ntable = \"tau.txt\"\nexpression = \"process_expression\"\ntarget = \"out.rs\"\n";

    #[test]
    fn test_plan_and_commit() {
        let manifest = manifest(TWO_JOBS);
        let mut store = store();
        let plan = plan(&manifest, &store).unwrap();
        assert_eq!(plan.changes.len(), 2);
        assert_eq!(plan.stale().count(), 2);
        // Planning alone writes nothing.
        assert_eq!(store.get("out.h"), Some(HEADER));

        assert_eq!(plan.commit(&mut store).unwrap(), 2);
        let header = store.get("out.h").unwrap();
        assert!(header.starts_with("// header\n//--- start generated text ---//\n"));
        assert!(header.contains("inline\nbool is_tau(const process_expression& t)\n"));
        assert!(store.get("out.rs").unwrap().contains("pub fn is_tau(&self) -> bool"));
    }

    #[test]
    fn test_second_run_is_up_to_date() {
        let manifest = manifest(TWO_JOBS);
        let mut store = store();
        plan(&manifest, &store).unwrap().commit(&mut store).unwrap();

        let again = plan(&manifest, &store).unwrap();
        assert!(again.is_up_to_date());
        assert_eq!(again.commit(&mut store).unwrap(), 0);
    }

    #[test]
    fn test_failing_job_aborts_before_writing() {
        let text = format!(
            "{TWO_JOBS}[[job]]\nkind = \"visitor\"\ntable = \"tau.txt\"\nexpression = \"process_expression\"\ntarget = \"plain.h\"\n"
        );
        let manifest = manifest(&text);
        let mut store = store();
        store.insert("plain.h", "no markers\n");

        let error = plan(&manifest, &store).unwrap_err();
        assert!(matches!(error, GenerateError::Splice { .. }));
        assert_eq!(error.to_string(), "plain.h: no `//--- start generated text ---//` ... `//--- end generated text ---//` region found");
        assert_eq!(store.get("out.h"), Some(HEADER));
    }

    #[test]
    fn test_marker_in_description_is_rejected() {
        let mut store = store();
        store.insert(
            "marker.txt",
            "Tau | tau() () | The value tau //--- end generated text ---//\n",
        );
        let manifest = manifest(
            "[[job]]\nkind = \"classes\"\ntable = \"marker.txt\"\nexpression = \"process_expression\"\ntarget = \"out.h\"\n",
        );
        let error = plan(&manifest, &store).unwrap_err();
        assert!(matches!(
            error,
            GenerateError::Splice {
                error: SpliceError::MarkerInBlock,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_table() {
        let manifest = manifest(
            "[[job]]\nkind = \"visitor\"\ntable = \"missing.txt\"\nexpression = \"e\"\ntarget = \"out.h\"\n",
        );
        let error = plan(&manifest, &store()).unwrap_err();
        assert!(matches!(error, GenerateError::Store(StoreError::Read { .. })));
    }

    #[test]
    fn test_malformed_table_names_the_file() {
        let mut store = store();
        store.insert("bad.txt", "\nBad | bad(int) | no name\n");
        let manifest = manifest(
            "[[job]]\nkind = \"visitor\"\ntable = \"bad.txt\"\nexpression = \"e\"\ntarget = \"out.h\"\n",
        );
        let error = plan(&manifest, &store).unwrap_err();
        assert!(error.to_string().starts_with("bad.txt:2: malformed row"));
    }

    #[test]
    fn test_render_error_carries_job_paths() {
        let mut store = store();
        store.insert("x.txt", "X | f(const e& x) (x) | uses x\n");
        let manifest = manifest(
            "[[job]]\nkind = \"visitor\"\ntable = \"x.txt\"\nexpression = \"e\"\ntarget = \"out.h\"\n",
        );
        let error = plan(&manifest, &store).unwrap_err();
        let GenerateError::Render { table, target, error } = error else {
            panic!("expected a render error, got {error:?}");
        };
        assert_eq!(table, Path::new("x.txt"));
        assert_eq!(target, Path::new("out.h"));
        assert!(matches!(error, RenderError::ReservedName { .. }));
    }
}
