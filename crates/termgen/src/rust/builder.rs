use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use super::{RustModel, RustNode, unparse};
use crate::error::RenderError;
use crate::node::NodeSet;

/// Emits `<Expr>Builder` and `<Expr>BuilderWith<A>`.
///
/// A `visit_<node>` hook returning `Some` replaces the node outright.
/// `None` rebuilds it from its leaf fields and the rebuilt recursive fields.
pub fn synthesize_builder(set: &NodeSet) -> Result<String, RenderError> {
    let model = RustModel::new(set)?;
    let plain = builder_trait(&model, None);
    let with = builder_trait(&model, Some(&format_ident!("A")));
    unparse(quote! {
        #plain
        #with
    })
}

fn builder_trait(model: &RustModel<'_>, context: Option<&Ident>) -> TokenStream {
    let expr = &model.expr;
    let (name, generics, context_param, context_arg) = match context {
        Some(a) => (
            format_ident!("{}With", model.builder_trait()),
            quote!(<#a>),
            quote!(, a: &mut #a),
            quote!(, a),
        ),
        None => (model.builder_trait(), quote!(), quote!(), quote!()),
    };

    let hooks = model.nodes.iter().map(|node| {
        let visit = &node.visit;
        let params = node.hook_parameters(expr);
        let doc = format!(
            " Replaces a `{}` node. `None` rebuilds it from its rebuilt children.",
            node.node.name()
        );
        quote! {
            #[doc = #doc]
            fn #visit(&mut self, #params #context_param) -> Option<#expr> {
                None
            }
        }
    });

    let body = if model.nodes.is_empty() {
        quote!(match *x {})
    } else {
        let arms = model
            .nodes
            .iter()
            .map(|node| rebuild_arm(expr, node, &context_arg));
        quote! {
            match x {
                #(#arms)*
            }
        }
    };

    let doc = format!(" Rebuilding traversal of [`{expr}`].");
    quote! {
        #[doc = #doc]
        #[allow(unused_variables)]
        pub trait #name #generics {
            #(#hooks)*

            /// Rebuilds `x` bottom-up, giving every node's hook the first say.
            fn visit(&mut self, x: &#expr #context_param) -> #expr {
                #body
            }
        }
    }
}

fn rebuild_arm(expr: &Ident, node: &RustNode<'_>, context_arg: &TokenStream) -> TokenStream {
    let pattern = node.pattern(expr);
    let visit = &node.visit;
    let variant = &node.variant;
    let args = node.hook_arguments();

    let rebuilt = if node.fields.is_empty() {
        quote!(#expr::#variant)
    } else {
        let inits = node.fields.iter().map(|field| {
            let name = &field.ident;
            if field.recursive {
                quote!(#name: Box::new(self.visit(#name #context_arg)))
            } else {
                quote!(#name: #name.clone())
            }
        });
        quote!(#expr::#variant { #(#inits),* })
    };

    quote! {
        #pattern => {
            if let Some(result) = self.#visit(#args #context_arg) {
                return result;
            }
            #rebuilt
        }
    }
}
