//! Specification table parsing.
//!
//! A table is free text. Every line that splits into exactly three
//! `|`-separated fields is a row:
//!
//! ```text
//! Sum | sum(const data::variable_list& v, const process_expression& right) (bound_variables, operand) | The sum operator
//! ```
//!
//! All other lines (blank lines, headings, comments) are ignored.

use indexmap::IndexMap;

use crate::signature::{Signature, SignatureError, parse_signature};

/// Errors raised while parsing a specification table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    #[error("{table}:{line}: malformed row: {error}")]
    MalformedRow {
        table: String,
        line: usize,
        #[source]
        error: SignatureError,
    },
    #[error("{table}:{line}: row has an empty tag")]
    EmptyTag { table: String, line: usize },
    #[error("{table}:{line}: duplicate tag `{tag}` (first declared on line {first_line})")]
    DuplicateTag {
        table: String,
        tag: String,
        line: usize,
        first_line: usize,
    },
    #[error("{table}:{line}: node name `{name}` already used on line {first_line}")]
    DuplicateName {
        table: String,
        name: String,
        line: usize,
        first_line: usize,
    },
}

/// One row of a specification table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpec {
    /// External identifier of the node kind, used for the runtime tag test.
    pub tag: String,
    pub signature: Signature,
    pub description: String,
    /// 1-based line of the row in its table.
    pub line: usize,
}

impl NodeSpec {
    /// The bare node name, e.g. `sum` for `sum(...)`.
    pub fn name(&self) -> &str {
        &self.signature.name
    }
}

/// Parses `text` into node specifications in row order.
///
/// `table` names the input in error messages.
pub fn parse_table(table: &str, text: &str) -> Result<Vec<NodeSpec>, SpecError> {
    let mut specs = Vec::new();
    let mut seen: IndexMap<String, usize> = IndexMap::new();
    let mut names: IndexMap<String, usize> = IndexMap::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let fields: Vec<&str> = raw.split('|').collect();
        let [tag, constructor, description] = fields.as_slice() else {
            continue;
        };

        let tag = tag.trim();
        if tag.is_empty() {
            return Err(SpecError::EmptyTag {
                table: table.to_owned(),
                line,
            });
        }
        if let Some(&first_line) = seen.get(tag) {
            return Err(SpecError::DuplicateTag {
                table: table.to_owned(),
                tag: tag.to_owned(),
                line,
                first_line,
            });
        }

        let signature = parse_signature(constructor).map_err(|error| SpecError::MalformedRow {
            table: table.to_owned(),
            line,
            error,
        })?;
        if let Some(&first_line) = names.get(&signature.name) {
            return Err(SpecError::DuplicateName {
                table: table.to_owned(),
                name: signature.name,
                line,
                first_line,
            });
        }

        seen.insert(tag.to_owned(), line);
        names.insert(signature.name.clone(), line);
        specs.push(NodeSpec {
            tag: tag.to_owned(),
            signature,
            description: description.trim().to_owned(),
            line,
        });
    }

    tracing::debug!(table, rows = specs.len(), "parsed specification table");
    Ok(specs)
}
