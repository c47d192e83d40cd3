//! Node sets: table rows bound to an expression type.
//!
//! Binding a table to its expression type classifies every field once, up
//! front. The synthesizers only ever read the stored classification.

use crate::signature::Parameter;
use crate::table::{NodeSpec, SpecError, parse_table};

/// Whether a traversal descends into a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldClass {
    /// The field's type is the expression type itself.
    Recursive,
    /// Any other data carried by the node, sequences included.
    Leaf,
}

impl FieldClass {
    /// Classifies a declared type against the expression type by exact equality.
    pub fn of(ty: &str, expression: &str) -> Self {
        if ty == expression {
            FieldClass::Recursive
        } else {
            FieldClass::Leaf
        }
    }
}

/// A classified constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub parameter: Parameter,
    pub accessor: String,
    pub class: FieldClass,
    /// 1-based position of the field in the constructor.
    pub position: usize,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.parameter.name
    }

    pub fn ty(&self) -> &str {
        &self.parameter.ty
    }

    pub fn is_recursive(&self) -> bool {
        self.class == FieldClass::Recursive
    }
}

/// A node kind with classified fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub spec: NodeSpec,
    pub fields: Vec<Field>,
}

impl Node {
    fn classify(spec: NodeSpec, expression: &str) -> Self {
        let fields = spec
            .signature
            .parameters
            .iter()
            .enumerate()
            .map(|(index, parameter)| Field {
                parameter: parameter.clone(),
                accessor: spec.signature.accessor(index).to_owned(),
                class: FieldClass::of(&parameter.ty, expression),
                position: index + 1,
            })
            .collect();
        Node { spec, fields }
    }

    pub fn name(&self) -> &str {
        self.spec.name()
    }

    pub fn tag(&self) -> &str {
        &self.spec.tag
    }

    pub fn description(&self) -> &str {
        &self.spec.description
    }

    pub fn is_nullary(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn has_recursive_fields(&self) -> bool {
        self.fields.iter().any(Field::is_recursive)
    }

    pub fn recursive_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_recursive())
    }
}

/// The ordered node kinds of one expression type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSet {
    expression: String,
    nodes: Vec<Node>,
}

impl NodeSet {
    /// Binds parsed rows to `expression`, classifying every field.
    pub fn classify(expression: impl Into<String>, specs: Vec<NodeSpec>) -> Self {
        let expression = expression.into();
        let nodes: Vec<Node> = specs
            .into_iter()
            .map(|spec| Node::classify(spec, &expression))
            .collect();

        for node in &nodes {
            for field in &node.fields {
                if is_near_miss(field.ty(), &expression) {
                    tracing::warn!(
                        node = node.name(),
                        field = field.name(),
                        ty = field.ty(),
                        expression = %expression,
                        "field type differs from the expression type only by qualification; it is treated as a leaf"
                    );
                }
            }
        }
        if !nodes.is_empty() && !nodes.iter().any(Node::has_recursive_fields) {
            tracing::warn!(
                expression = %expression,
                "no field has the expression type; traversals will not recurse"
            );
        }

        NodeSet { expression, nodes }
    }

    /// Parses a table and classifies it in one step.
    pub fn parse(table: &str, text: &str, expression: &str) -> Result<Self, SpecError> {
        Ok(Self::classify(expression, parse_table(table, text)?))
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<'a> IntoIterator for &'a NodeSet {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn is_near_miss(ty: &str, expression: &str) -> bool {
    ty != expression
        && (ty.ends_with(&format!("::{expression}")) || expression.ends_with(&format!("::{ty}")))
}
