//! Names of the runtime primitives that generated code calls into.

use serde::Deserialize;

/// Runtime primitives referenced by generated C++ code.
///
/// Defaults match the mCRL2 term library. Use the builder to override
/// individual names:
/// ```ignore
/// let primitives = Primitives::builder()
///     .tag_test_prefix("detail::is_")
///     .build();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Primitives {
    /// Prefix of the tag check asserted by wrap constructors, followed by the tag.
    #[builder(into, default = "core::detail::check_term_".to_owned())]
    pub check_term_prefix: String,

    /// Prefix of the raw term constructor, followed by the tag.
    #[builder(into, default = "core::detail::gsMake".to_owned())]
    pub make_prefix: String,

    /// Prefix of the raw tag test used by `is_<node>` predicates.
    #[builder(into, default = "core::detail::gsIs".to_owned())]
    pub tag_test_prefix: String,

    /// Raw term type accepted by wrap constructors.
    #[builder(into, default = "atermpp::aterm_appl".to_owned())]
    pub term_type: String,

    /// Namespace of the `arg<N>` field projections.
    #[builder(into, default = "atermpp::".to_owned())]
    pub argument_namespace: String,

    /// Type suffix that marks a parameter as a sequence.
    #[builder(into, default = "list".to_owned())]
    pub sequence_suffix: String,

    /// Prefix of the macro that enables builder tracing.
    #[builder(into, default = "MCRL2_".to_owned())]
    pub debug_macro_prefix: String,
}

impl Default for Primitives {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Primitives {
    /// Whether `ty` denotes a sequence and needs a distinct extraction key.
    pub fn is_sequence(&self, ty: &str) -> bool {
        !self.sequence_suffix.is_empty() && ty.ends_with(&self.sequence_suffix)
    }

    /// The field projection for the parameter at `position`, e.g. `arg2` or `list_arg2`.
    pub fn argument(&self, ty: &str, position: usize) -> String {
        if self.is_sequence(ty) {
            format!("list_arg{position}")
        } else {
            format!("arg{position}")
        }
    }
}
