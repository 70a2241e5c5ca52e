//! Procedural macros for the `sregex` crate.
//!
//! Provides [`regex!`] and [`tokenize!`]: the pattern literal is
//! tokenized and compiled to a matcher tree while the macro runs, and
//! only the tree reaches the produced program. A malformed pattern is
//! a compile error on the literal; run-time code never sees pattern
//! text.
//!
//! # Example
//!
//! ```ignore
//! use sregex::regex;
//!
//! let matcher = regex!(r"\w(\w+)|(\d+)");
//! assert_eq!(matcher.groups(), 2);
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{LitStr, Token, parse_macro_input};

mod builder;
mod emit;
mod error;
mod tokenizer;

/// Compile a pattern literal into a specialized matcher.
///
/// Expands to a `::sregex::Matcher` over a `const` tree; usable in
/// `let` bindings and `static` items.
#[proc_macro]
pub fn regex(input: TokenStream) -> TokenStream {
    let literal = parse_macro_input!(input as LitStr);
    match compile_matcher(&literal) {
        Ok(expansion) => expansion.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

/// Compile a token pattern and a separator pattern into a
/// `::sregex::Tokenizer`.
#[proc_macro]
pub fn tokenize(input: TokenStream) -> TokenStream {
    let TokenizeInput { token, separator } = parse_macro_input!(input as TokenizeInput);
    let token_matcher = match compile_matcher(&token) {
        Ok(expansion) => expansion,
        Err(error) => return error.to_compile_error().into(),
    };
    let separator_matcher = match compile_matcher(&separator) {
        Ok(expansion) => expansion,
        Err(error) => return error.to_compile_error().into(),
    };
    quote! {
        ::sregex::Tokenizer::from_parts(#token_matcher, #separator_matcher)
    }
    .into()
}

// ==================== Shared pipeline ====================

/// Pattern literal → atoms → tree → emitted matcher expression.
fn compile_matcher(literal: &LitStr) -> syn::Result<proc_macro2::TokenStream> {
    let pattern = literal.value();
    let atoms = tokenizer::tokenize(&pattern)
        .map_err(|error| syn::Error::new(literal.span(), error.to_string()))?;
    let (ast, groups) = builder::build(&atoms)
        .map_err(|error| syn::Error::new(literal.span(), error.to_string()))?;
    Ok(emit::emit_matcher(&ast, groups))
}

// ==================== Input parsing ====================

struct TokenizeInput {
    token: LitStr,
    separator: LitStr,
}

impl Parse for TokenizeInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let token: LitStr = input.parse()?;
        input.parse::<Token![,]>()?;
        let separator: LitStr = input.parse()?;
        if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
        }
        Ok(Self { token, separator })
    }
}
