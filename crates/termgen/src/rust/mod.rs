//! Rust renderings of a node set.
//!
//! Node kinds become the variants of one enum named after the expression
//! type, and the visitor and builder dispatch with an exhaustive `match`
//! instead of a tag-test chain. Output goes through `prettyplease`, so
//! every synthesizer also checks that what it produced parses.

mod builder;
mod enum_def;
mod visitor;

pub use builder::synthesize_builder;
pub use enum_def::{synthesize_enum, synthesize_predicates};
pub use visitor::synthesize_visitor;

use std::collections::BTreeMap;

use convert_case::{Case, Casing};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use crate::error::RenderError;
use crate::node::{Node, NodeSet};

/// Names the generated traits use for their own parameters.
const RESERVED_NAMES: &[&str] = &["x", "a"];

struct RustField {
    ident: Ident,
    /// The declared type; for recursive fields, the expression enum.
    ty: TokenStream,
    recursive: bool,
}

struct RustNode<'a> {
    node: &'a Node,
    variant: Ident,
    /// Constructor function name.
    function: Ident,
    visit: Ident,
    leave: Ident,
    predicate: Ident,
    fields: Vec<RustField>,
}

impl RustNode<'_> {
    /// `Expr::Variant { a, b }` or `Expr::Variant`, binding every field.
    fn pattern(&self, expr: &Ident) -> TokenStream {
        let variant = &self.variant;
        if self.fields.is_empty() {
            quote!(#expr::#variant)
        } else {
            let names = self.fields.iter().map(|f| &f.ident);
            quote!(#expr::#variant { #(#names),* })
        }
    }

    /// `x, a, b`: arguments of the visit hook, before any context.
    fn hook_arguments(&self) -> TokenStream {
        let names = self.fields.iter().map(|f| &f.ident);
        quote!(x #(, #names)*)
    }

    /// `x: &Expr, a: &A, b: &Expr`: parameters of the visit hook, before any context.
    fn hook_parameters(&self, expr: &Ident) -> TokenStream {
        let params = self.fields.iter().map(|f| {
            let name = &f.ident;
            let ty = &f.ty;
            quote!(#name: &#ty)
        });
        quote!(x: &#expr #(, #params)*)
    }
}

struct RustModel<'a> {
    expr: Ident,
    nodes: Vec<RustNode<'a>>,
}

impl<'a> RustModel<'a> {
    fn new(set: &'a NodeSet) -> Result<Self, RenderError> {
        let expr = ident(&crate::base_name(set.expression()).to_case(Case::Pascal))?;
        let mut variants: BTreeMap<String, &str> = BTreeMap::new();
        let mut nodes = Vec::with_capacity(set.len());

        for node in set {
            let variant_name = node.name().to_case(Case::Pascal);
            if let Some(first) = variants.insert(variant_name.clone(), node.name()) {
                return Err(RenderError::DuplicateName {
                    first: first.to_owned(),
                    second: node.name().to_owned(),
                    name: variant_name,
                });
            }

            let fields = node
                .fields
                .iter()
                .map(|field| {
                    if RESERVED_NAMES.contains(&field.accessor.as_str()) {
                        return Err(RenderError::ReservedName {
                            node: node.name().to_owned(),
                            name: field.accessor.clone(),
                        });
                    }
                    let ty = if field.is_recursive() {
                        quote!(#expr)
                    } else {
                        let ty = syn::parse_str::<syn::Type>(field.ty()).map_err(|_| {
                            RenderError::UnsupportedType {
                                node: node.name().to_owned(),
                                ty: field.ty().to_owned(),
                            }
                        })?;
                        quote!(#ty)
                    };
                    Ok(RustField {
                        ident: ident(&field.accessor)?,
                        ty,
                        recursive: field.is_recursive(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let name = node.name();
            nodes.push(RustNode {
                node,
                variant: ident(&variant_name)?,
                function: ident(node.name())?,
                visit: format_ident!("visit_{}", name),
                leave: format_ident!("leave_{}", name),
                predicate: format_ident!("is_{}", name),
                fields,
            });
        }

        Ok(RustModel { expr, nodes })
    }

    fn visitor_trait(&self) -> Ident {
        format_ident!("{}Visitor", self.expr)
    }

    fn builder_trait(&self) -> Ident {
        format_ident!("{}Builder", self.expr)
    }
}

/// Parses `name` as an identifier, escaping keywords as raw identifiers.
fn ident(name: &str) -> Result<Ident, RenderError> {
    syn::parse_str::<Ident>(name)
        .or_else(|_| syn::parse_str::<Ident>(&format!("r#{name}")))
        .map_err(|_| RenderError::InvalidIdentifier(name.to_owned()))
}

fn unparse(tokens: TokenStream) -> Result<String, RenderError> {
    let file = syn::parse2::<syn::File>(tokens)
        .map_err(|error| RenderError::Unparsable(error.to_string()))?;
    Ok(prettyplease::unparse(&file))
}
