use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use super::{RustModel, RustNode, unparse};
use crate::error::RenderError;
use crate::node::NodeSet;

/// Emits `<Expr>Visitor` and `<Expr>VisitorWith<A>`.
///
/// `visit_<node>` returns whether to descend into the node's recursive
/// fields; `leave_<node>` runs afterwards either way.
pub fn synthesize_visitor(set: &NodeSet) -> Result<String, RenderError> {
    let model = RustModel::new(set)?;
    let plain = visitor_trait(&model, None);
    let with = visitor_trait(&model, Some(&format_ident!("A")));
    unparse(quote! {
        #plain
        #with
    })
}

fn visitor_trait(model: &RustModel<'_>, context: Option<&Ident>) -> TokenStream {
    let expr = &model.expr;
    let (name, generics, context_param, context_arg) = match context {
        Some(a) => (
            format_ident!("{}With", model.visitor_trait()),
            quote!(<#a>),
            quote!(, a: &mut #a),
            quote!(, a),
        ),
        None => (model.visitor_trait(), quote!(), quote!(), quote!()),
    };

    let hooks = model.nodes.iter().map(|node| {
        let visit = &node.visit;
        let leave = &node.leave;
        let params = node.hook_parameters(expr);
        let visit_doc = format!(
            " Visits a `{}` node. Return `false` to skip its children.",
            node.node.name()
        );
        let leave_doc = format!(" Leaves a `{}` node.", node.node.name());
        quote! {
            #[doc = #visit_doc]
            fn #visit(&mut self, #params #context_param) -> bool {
                true
            }

            #[doc = #leave_doc]
            fn #leave(&mut self) {}
        }
    });

    let body = if model.nodes.is_empty() {
        quote!(match *x {})
    } else {
        let arms = model.nodes.iter().map(|node| visit_arm(expr, node, &context_arg));
        quote! {
            match x {
                #(#arms)*
            }
        }
    };

    let doc = format!(
        " Read-only traversal of [`{expr}`]. Every hook defaults to visiting the whole tree."
    );
    quote! {
        #[doc = #doc]
        #[allow(unused_variables)]
        pub trait #name #generics {
            #(#hooks)*

            /// Dispatches on the node kind, calling the matching hooks.
            fn visit(&mut self, x: &#expr #context_param) {
                #body
            }
        }
    }
}

fn visit_arm(expr: &Ident, node: &RustNode<'_>, context_arg: &TokenStream) -> TokenStream {
    let pattern = node.pattern(expr);
    let visit = &node.visit;
    let leave = &node.leave;
    let args = node.hook_arguments();
    let recursive: Vec<&Ident> = node
        .fields
        .iter()
        .filter(|f| f.recursive)
        .map(|f| &f.ident)
        .collect();

    let call = if recursive.is_empty() {
        quote!(self.#visit(#args #context_arg);)
    } else {
        quote! {
            if self.#visit(#args #context_arg) {
                #(self.visit(#recursive #context_arg);)*
            }
        }
    };

    quote! {
        #pattern => {
            #call
            self.#leave();
        }
    }
}
