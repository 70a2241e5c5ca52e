//! Regular expressions whose pattern is fixed at build time.
//!
//! The [`regex!`] macro parses its pattern literal during compilation
//! and expands to a matcher specialized to that pattern: the program
//! that runs contains the matcher tree and a backtracking evaluator,
//! but no regex parser. A pattern error is a compile error.
//!
//! ```ignore
//! use sregex::regex;
//!
//! let matcher = regex!(r"(\d+)-(\d+)");
//! let found = matcher.apply("range 10-25");
//! assert!(found.is_accepted());
//! assert_eq!(found.get(1), "10");
//! assert_eq!(found.get(2), "25");
//! ```
//!
//! [`tokenize!`] builds a splitter from a token pattern and a
//! separator pattern:
//!
//! ```ignore
//! use sregex::tokenize;
//!
//! let words = tokenize!(r"[^\s]+", r"\s");
//! let tokens: Vec<&str> = words.apply("a abc def").collect();
//! assert_eq!(tokens, ["a", "abc", "def"]);
//! ```
//!
//! Matching is ASCII-oriented (`\w`, `\d`, `\s` and their complements
//! cover ASCII only) and allocation-free; capture storage is a
//! fixed-size array dimensioned by the pattern's group count.

mod class;
mod engine;
pub mod result;
pub mod tree;

pub use engine::Span;
pub use result::{MatchResult, Matcher, Tokenizer, Tokens};
pub use tree::{CharClass, Kind, Node, Policy, SetItem, Terminal, UNBOUNDED};

pub use sregex_macros::{regex, tokenize};
