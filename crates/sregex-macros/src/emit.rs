// Code generation: serialize the built tree into `::sregex` constants
//
// Absolute paths keep the expansion independent of what the call site
// has imported. The tree becomes one `const` item; taking a reference
// to it promotes the whole structure into static storage, so the
// matcher borrows it for 'static with nothing left to do at run time.

use proc_macro2::TokenStream;
use quote::quote;

use crate::builder::{Ast, AstKind, CharClass, Policy, SetItem, Term, UNBOUNDED};

/// Expansion of `regex!`: the tree constant plus a `Matcher` sized for
/// `groups + 1` capture slots (slot 0 is the overall match).
pub fn emit_matcher(ast: &Ast, groups: usize) -> TokenStream {
    let node = emit_node(ast);
    let slots = groups + 1;
    quote! {
        {
            const TREE: ::sregex::Node = #node;
            ::sregex::Matcher::<#slots>::from_parts(&TREE)
        }
    }
}

fn emit_node(ast: &Ast) -> TokenStream {
    let kind = emit_kind(&ast.kind);
    let children = ast.children.iter().map(emit_node);
    let min = ast.min;
    let max = if ast.max == UNBOUNDED {
        quote!(::sregex::UNBOUNDED)
    } else {
        let max = ast.max;
        quote!(#max)
    };
    let policy = emit_policy(ast.policy);
    quote! {
        ::sregex::Node {
            kind: #kind,
            children: &[#(#children),*],
            min: #min,
            max: #max,
            policy: #policy,
        }
    }
}

fn emit_kind(kind: &AstKind) -> TokenStream {
    match kind {
        AstKind::Sequence => quote!(::sregex::Kind::Sequence),
        AstKind::Terminal(term) => {
            let term = emit_term(term);
            quote!(::sregex::Kind::Terminal(#term))
        }
        AstKind::Group(index) => quote!(::sregex::Kind::Group(#index)),
        AstKind::Alternation => quote!(::sregex::Kind::Alternation),
    }
}

fn emit_term(term: &Term) -> TokenStream {
    match term {
        Term::Literal(c) => quote!(::sregex::Terminal::Literal(#c)),
        Term::Any => quote!(::sregex::Terminal::Any),
        Term::Start => quote!(::sregex::Terminal::Start),
        Term::End => quote!(::sregex::Terminal::End),
        Term::Class(class) => {
            let class = emit_class(*class);
            quote!(::sregex::Terminal::Class(#class))
        }
        Term::NotClass(class) => {
            let class = emit_class(*class);
            quote!(::sregex::Terminal::NotClass(#class))
        }
        Term::Set { items, negated } => {
            let items = items.iter().map(emit_set_item);
            quote! {
                ::sregex::Terminal::Set {
                    items: &[#(#items),*],
                    negated: #negated,
                }
            }
        }
    }
}

fn emit_set_item(item: &SetItem) -> TokenStream {
    match item {
        SetItem::Char(c) => quote!(::sregex::SetItem::Char(#c)),
        SetItem::Range(start, end) => quote!(::sregex::SetItem::Range(#start, #end)),
        SetItem::Class(class) => {
            let class = emit_class(*class);
            quote!(::sregex::SetItem::Class(#class))
        }
        SetItem::NotClass(class) => {
            let class = emit_class(*class);
            quote!(::sregex::SetItem::NotClass(#class))
        }
    }
}

fn emit_class(class: CharClass) -> TokenStream {
    match class {
        CharClass::Word => quote!(::sregex::CharClass::Word),
        CharClass::Digit => quote!(::sregex::CharClass::Digit),
        CharClass::Space => quote!(::sregex::CharClass::Space),
    }
}

fn emit_policy(policy: Policy) -> TokenStream {
    match policy {
        Policy::Greedy => quote!(::sregex::Policy::Greedy),
        Policy::Lazy => quote!(::sregex::Policy::Lazy),
        Policy::Possessive => quote!(::sregex::Policy::Possessive),
    }
}
