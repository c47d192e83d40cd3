//! Constructor signature parsing.
//!
//! A signature fragment looks like
//! `sum(const data::variable_list& v, const process_expression& right) (bound_variables, operand)`:
//! a bare node name, a parenthesized parameter list and an optional second
//! parenthesized list naming one accessor per parameter.

use std::collections::HashSet;

/// Errors raised while parsing a single constructor signature.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("expected `(` after the node name")]
    MissingParameterList,
    #[error("the node name is empty")]
    EmptyName,
    #[error("`{0}` is not a valid node name")]
    InvalidName(String),
    #[error("unbalanced parentheses in `{0}`")]
    Unbalanced(String),
    #[error("parameter {index} is empty")]
    EmptyParameter { index: usize },
    #[error("parameter `{fragment}` has no name")]
    MissingParameterName { fragment: String },
    #[error("accessor {index} is empty")]
    EmptyAccessor { index: usize },
    #[error("`{0}` is not a valid accessor name")]
    InvalidAccessor(String),
    #[error("parameter name `{0}` is declared twice")]
    DuplicateParameter(String),
    #[error("accessor name `{0}` is declared twice")]
    DuplicateAccessor(String),
    #[error("{accessors} accessor names given for {parameters} parameters")]
    AccessorCount { parameters: usize, accessors: usize },
    #[error("unexpected text after the signature: `{0}`")]
    TrailingText(String),
}

/// One typed constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Declared type with `const` and reference/pointer decoration removed.
    pub ty: String,
    pub name: String,
    /// The parameter exactly as written, trimmed.
    pub declaration: String,
}

/// A parsed constructor fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub parameters: Vec<Parameter>,
    /// `None` when the row carries no accessor list.
    pub accessors: Option<Vec<String>>,
}

impl Signature {
    /// Accessor name of the parameter at `index`, falling back to the
    /// parameter name when the row has no accessor list.
    pub fn accessor(&self, index: usize) -> &str {
        match &self.accessors {
            Some(accessors) => &accessors[index],
            None => &self.parameters[index].name,
        }
    }

    /// The parameter list as it appeared in the table, e.g.
    /// `const data::variable_list& v, const process_expression& right`.
    pub fn declarations(&self) -> String {
        self.parameters
            .iter()
            .map(|p| p.declaration.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parses a full constructor fragment: name, parameters and optional accessors.
pub fn parse_signature(fragment: &str) -> Result<Signature, SignatureError> {
    let fragment = fragment.trim();
    let open = fragment
        .find('(')
        .ok_or(SignatureError::MissingParameterList)?;
    let name = fragment[..open].trim();
    if name.is_empty() {
        return Err(SignatureError::EmptyName);
    }
    if !is_identifier(name) {
        return Err(SignatureError::InvalidName(name.to_owned()));
    }

    let (inner, rest) = enclosed(&fragment[open..])?;
    let parameters = split_parameters(inner)?;

    let rest = rest.trim();
    let accessors = if rest.is_empty() {
        None
    } else if rest.starts_with('(') {
        let (inner, tail) = enclosed(rest)?;
        if !tail.trim().is_empty() {
            return Err(SignatureError::TrailingText(tail.trim().to_owned()));
        }
        Some(split_accessors(inner)?)
    } else {
        return Err(SignatureError::TrailingText(rest.to_owned()));
    };

    if let Some(name) = first_duplicate(parameters.iter().map(|p| p.name.as_str())) {
        return Err(SignatureError::DuplicateParameter(name.to_owned()));
    }
    if let Some(accessors) = &accessors {
        if let Some(name) = first_duplicate(accessors.iter().map(String::as_str)) {
            return Err(SignatureError::DuplicateAccessor(name.to_owned()));
        }
        if accessors.len() != parameters.len() {
            return Err(SignatureError::AccessorCount {
                parameters: parameters.len(),
                accessors: accessors.len(),
            });
        }
    }

    Ok(Signature {
        name: name.to_owned(),
        parameters,
        accessors,
    })
}

/// Extracts the typed parameters between the first `(` and its matching `)`.
pub fn parse_parameters(fragment: &str) -> Result<Vec<Parameter>, SignatureError> {
    let open = fragment
        .find('(')
        .ok_or(SignatureError::MissingParameterList)?;
    let (inner, _) = enclosed(&fragment[open..])?;
    split_parameters(inner)
}

/// Splits a parenthesized accessor list such as `(bound_variables, operand)`.
pub fn parse_accessor_names(fragment: &str) -> Result<Vec<String>, SignatureError> {
    let fragment = fragment.trim();
    if !fragment.starts_with('(') {
        return Err(SignatureError::MissingParameterList);
    }
    let (inner, tail) = enclosed(fragment)?;
    if !tail.trim().is_empty() {
        return Err(SignatureError::TrailingText(tail.trim().to_owned()));
    }
    split_accessors(inner)
}

fn first_duplicate<'a>(names: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    names.into_iter().find(|name| !seen.insert(*name))
}

/// Given text starting with `(`, returns the text inside the matching `)`
/// and whatever follows it.
fn enclosed(text: &str) -> Result<(&str, &str), SignatureError> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&text[1..i], &text[i + 1..]));
                }
            }
            _ => {}
        }
    }
    Err(SignatureError::Unbalanced(text.to_owned()))
}

/// Splits on commas that are not nested inside `()`, `<>` or `[]`.
fn split_top_level(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '<' | '[' => depth += 1,
            ')' | '>' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

fn split_parameters(inner: &str) -> Result<Vec<Parameter>, SignatureError> {
    split_top_level(inner)
        .into_iter()
        .enumerate()
        .map(|(index, fragment)| parse_parameter(index + 1, fragment))
        .collect()
}

fn split_accessors(inner: &str) -> Result<Vec<String>, SignatureError> {
    split_top_level(inner)
        .into_iter()
        .enumerate()
        .map(|(index, fragment)| {
            let name = fragment.trim();
            if name.is_empty() {
                Err(SignatureError::EmptyAccessor { index: index + 1 })
            } else if !is_identifier(name) {
                Err(SignatureError::InvalidAccessor(name.to_owned()))
            } else {
                Ok(name.to_owned())
            }
        })
        .collect()
}

fn parse_parameter(index: usize, fragment: &str) -> Result<Parameter, SignatureError> {
    let declaration = fragment.trim();
    if declaration.is_empty() {
        return Err(SignatureError::EmptyParameter { index });
    }

    let body = strip_keyword_prefix(declaration, "const");
    let name_start = body
        .rfind(|c: char| !is_identifier_char(c))
        .map_or(0, |i| i + 1);
    let name = &body[name_start..];
    let ty = body[..name_start].trim_end_matches(|c: char| c.is_whitespace() || c == '&' || c == '*');
    let ty = strip_keyword_suffix(ty, "const")
        .trim_end_matches(|c: char| c.is_whitespace() || c == '&' || c == '*');

    if name.is_empty() || ty.is_empty() || !is_identifier(name) {
        return Err(SignatureError::MissingParameterName {
            fragment: declaration.to_owned(),
        });
    }

    Ok(Parameter {
        ty: ty.to_owned(),
        name: name.to_owned(),
        declaration: declaration.to_owned(),
    })
}

fn strip_keyword_prefix<'a>(text: &'a str, keyword: &str) -> &'a str {
    match text.strip_prefix(keyword) {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => text,
    }
}

fn strip_keyword_suffix<'a>(text: &'a str, keyword: &str) -> &'a str {
    match text.strip_suffix(keyword) {
        Some(rest) if rest.ends_with(char::is_whitespace) => rest.trim_end(),
        _ => text,
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(is_identifier_char)
}
