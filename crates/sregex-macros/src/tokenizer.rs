// Pattern tokenizer
//
// One pass, context-free: the only rule is that a backslash binds to
// the character after it. Everything structural (ranges, anchors vs
// literals, numeric escapes) is decided later by the tree builder.

use crate::error::MalformedPattern;

/// One lexical unit of the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Atom {
    /// Ordinary character.
    Char(char),
    /// Backslash plus the following character.
    Esc(char),
    /// Structural metacharacter.
    Meta(char),
}

/// Split a pattern into atoms, preserving order.
pub fn tokenize(pattern: &str) -> Result<Vec<Atom>, MalformedPattern> {
    let mut atoms = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        let atom = match c {
            '\\' => match chars.next() {
                Some(escaped) => Atom::Esc(escaped),
                None => return Err(MalformedPattern::TrailingBackslash),
            },
            '(' | ')' | '[' | ']' | '{' | '}' | '|' | '*' | '+' | '?' | '^' | '$' | '.' | '-' => {
                Atom::Meta(c)
            }
            _ => Atom::Char(c),
        };
        atoms.push(atom);
    }
    Ok(atoms)
}
