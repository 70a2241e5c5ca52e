// Matcher tree, the compiled form of a pattern
//
// The tree is emitted by the `regex!` / `tokenize!` macros as a `const`
// value and is immutable from then on. Every node carries repetition
// bounds and a backtracking policy; terminals consume zero or one
// character of input.

/// Upper repetition bound meaning "no limit" (`*`, `+`, `{n,}`).
pub const UNBOUNDED: u32 = u32::MAX;

/// Backtracking policy of a repeated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Consume as much as possible, release tries on backtrack.
    Greedy,
    /// Consume as little as possible, add tries on backtrack.
    Lazy,
    /// Consume as much as possible, never release.
    Possessive,
}

/// Predefined character class (`\w`, `\d`, `\s`), ASCII only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// `\w`: ASCII letters and underscore.
    Word,
    /// `\d`: ASCII digits.
    Digit,
    /// `\s`: ASCII whitespace.
    Space,
}

/// A single item inside a bracket expression `[...]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetItem {
    Char(char),
    /// Inclusive range `a-b`, compared by code point.
    Range(char, char),
    Class(CharClass),
    NotClass(CharClass),
}

/// Atomic matcher; consumes zero (anchors) or one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Literal(char),
    /// `.`: any character except `\n`.
    Any,
    /// `^`: start of the query.
    Start,
    /// `$`: end of the query.
    End,
    Class(CharClass),
    NotClass(CharClass),
    /// Bracket expression; matches one character against the item list.
    Set {
        items: &'static [SetItem],
        negated: bool,
    },
}

/// What a node matches, independent of its repetition bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Pure container; matches its children in order.
    Sequence,
    Terminal(Terminal),
    /// Capturing group; the index is 1-based and assigned in
    /// left-to-right order of the opening parenthesis.
    Group(usize),
    /// Ordered branches; each child is one alternative.
    Alternation,
}

/// One node of the matcher tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub kind: Kind,
    pub children: &'static [Node],
    pub min: u32,
    /// May be [`UNBOUNDED`].
    pub max: u32,
    pub policy: Policy,
}
