use proc_macro2::TokenStream;
use quote::quote;

use super::{RustModel, unparse};
use crate::error::RenderError;
use crate::node::NodeSet;

/// Emits the expression enum, one variant per row, and a constructor
/// function per node. Recursive fields are boxed.
pub fn synthesize_enum(set: &NodeSet) -> Result<String, RenderError> {
    let model = RustModel::new(set)?;
    let expr = &model.expr;

    let variants = model.nodes.iter().map(|node| {
        let variant = &node.variant;
        let doc = format!(" {}", node.node.description());
        if node.fields.is_empty() {
            quote! {
                #[doc = #doc]
                #variant
            }
        } else {
            let fields = node.fields.iter().map(|field| {
                let name = &field.ident;
                let ty = &field.ty;
                if field.recursive {
                    quote!(#name: Box<#ty>)
                } else {
                    quote!(#name: #ty)
                }
            });
            quote! {
                #[doc = #doc]
                #variant { #(#fields),* }
            }
        }
    });

    let constructors = model.nodes.iter().map(|node| {
        let function = &node.function;
        let variant = &node.variant;
        let doc = format!(" Creates a `{}` node.", node.node.tag());
        let params = node.fields.iter().map(|field| {
            let name = &field.ident;
            let ty = &field.ty;
            quote!(#name: #ty)
        });
        let body = if node.fields.is_empty() {
            quote!(Self::#variant)
        } else {
            let inits = node.fields.iter().map(|field| {
                let name = &field.ident;
                if field.recursive {
                    quote!(#name: Box::new(#name))
                } else {
                    quote!(#name)
                }
            });
            quote!(Self::#variant { #(#inits),* })
        };
        quote! {
            #[doc = #doc]
            pub fn #function(#(#params),*) -> Self {
                #body
            }
        }
    });

    unparse(quote! {
        #[derive(Debug, Clone, PartialEq)]
        pub enum #expr {
            #(#variants),*
        }

        impl #expr {
            #(#constructors)*
        }
    })
}

/// Emits `tag()` and one `is_<node>()` test per node.
pub fn synthesize_predicates(set: &NodeSet) -> Result<String, RenderError> {
    let model = RustModel::new(set)?;
    let expr = &model.expr;

    let tag_arms: Vec<TokenStream> = model
        .nodes
        .iter()
        .map(|node| {
            let variant = &node.variant;
            let tag = node.node.tag();
            if node.fields.is_empty() {
                quote!(Self::#variant => #tag)
            } else {
                quote!(Self::#variant { .. } => #tag)
            }
        })
        .collect();

    let predicates = model.nodes.iter().map(|node| {
        let predicate = &node.predicate;
        let variant = &node.variant;
        let doc = format!(" Returns true if this is a `{}` expression.", node.node.name());
        let pattern = if node.fields.is_empty() {
            quote!(Self::#variant)
        } else {
            quote!(Self::#variant { .. })
        };
        quote! {
            #[doc = #doc]
            pub fn #predicate(&self) -> bool {
                matches!(self, #pattern)
            }
        }
    });

    unparse(quote! {
        impl #expr {
            /// The tag of this node kind.
            pub fn tag(&self) -> &'static str {
                match *self {
                    #(#tag_arms),*
                }
            }

            #(#predicates)*
        }
    })
}
