// User-facing matcher and match-result types
//
// A `Matcher` binds a compiled tree to nothing but its group count; it
// is what `regex!` expands to. Applying it to a query produces a
// `MatchResult` positioned on the first match, which then iterates
// over successors with `next()`. `SLOTS` is the capture count plus
// one: slot 0 holds the overall span, groups live at their 1-based
// index.

use std::ops::Index;

use crate::engine::{Span, match_at};
use crate::tree::Node;

/// A pattern-specialized matcher. Construction happens entirely at
/// build time; the pattern text no longer exists at this point.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<const SLOTS: usize> {
    root: &'static Node,
}

impl<const SLOTS: usize> Matcher<SLOTS> {
    /// Wrap an emitted tree. Called from macro expansions; not meant
    /// to be written by hand.
    #[doc(hidden)]
    pub const fn from_parts(root: &'static Node) -> Self {
        Self { root }
    }

    /// Number of capture groups in the pattern.
    pub const fn groups(&self) -> usize {
        SLOTS - 1
    }

    /// Bind the matcher to a query and search for the first match.
    pub fn apply<'t>(&self, query: &'t str) -> MatchResult<'t, SLOTS> {
        let mut result = MatchResult {
            query,
            root: self.root,
            start: 0,
            end: 0,
            caps: [Span::EMPTY; SLOTS],
            matches: 0,
            accepted: false,
            initialized: false,
        };
        result.next();
        result
    }
}

/// The current match over a query, with iteration to successors.
#[derive(Debug, Clone, Copy)]
pub struct MatchResult<'t, const SLOTS: usize> {
    query: &'t str,
    root: &'static Node,
    start: usize,
    end: usize,
    caps: [Span; SLOTS],
    matches: usize,
    accepted: bool,
    initialized: bool,
}

impl<'t, const SLOTS: usize> MatchResult<'t, SLOTS> {
    /// Advance to the next match. Returns `false` once no further
    /// match exists; later calls keep returning `false`.
    ///
    /// The engine is anchored, so this is where scanning happens: a
    /// failed attempt moves the start ahead by one character. An empty
    /// accepted match also steps ahead by one character, so start
    /// positions strictly increase and iteration always terminates.
    pub fn next(&mut self) -> bool {
        if self.initialized {
            if !self.accepted {
                return false;
            }
            if self.end > self.start {
                self.start = self.end;
            } else if let Some(c) = self.query[self.start..].chars().next() {
                self.start += c.len_utf8();
            } else {
                // empty match at the end of the query
                self.accepted = false;
                return false;
            }
        }
        self.initialized = true;
        loop {
            self.caps = [Span::EMPTY; SLOTS];
            if let Some(end) = match_at(self.root, self.query, self.start, &mut self.caps) {
                self.end = end;
                self.caps[0] = Span {
                    start: self.start,
                    end,
                };
                self.accepted = true;
                self.matches += 1;
                return true;
            }
            match self.query[self.start..].chars().next() {
                Some(c) => self.start += c.len_utf8(),
                None => {
                    self.accepted = false;
                    return false;
                }
            }
        }
    }

    /// Whether the most recent `next()` found a match.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// The overall match as a substring of the query; empty when not
    /// accepted.
    pub fn to_view(&self) -> &'t str {
        if self.accepted {
            &self.query[self.start..self.end]
        } else {
            ""
        }
    }

    /// Group `index` as a substring of the query. Index 0 is the
    /// overall match; a group whose branch did not participate yields
    /// the empty view.
    ///
    /// Panics when `index` exceeds [`groups`](Self::groups).
    pub fn get(&self, index: usize) -> &'t str {
        if index == 0 {
            return self.to_view();
        }
        let span = self.caps[index];
        if self.accepted {
            &self.query[span.start..span.end]
        } else {
            ""
        }
    }

    /// Count of successful matches reported so far.
    pub fn size(&self) -> usize {
        self.matches
    }

    /// Number of capture groups in the pattern.
    pub const fn groups(&self) -> usize {
        SLOTS - 1
    }

    /// Decompose into `[overall, group 1, …, group N]`.
    pub fn to_array(&self) -> [&'t str; SLOTS] {
        let mut views = [""; SLOTS];
        if self.accepted {
            views[0] = self.to_view();
            for (view, span) in views.iter_mut().zip(self.caps.iter()).skip(1) {
                *view = &self.query[span.start..span.end];
            }
        }
        views
    }
}

impl<const SLOTS: usize> Index<usize> for MatchResult<'_, SLOTS> {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        self.get(index)
    }
}

/// Splits a query into tokens: successive matches of the token
/// pattern, with separator matches skipped in between. What `tokenize!`
/// expands to.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<const T: usize, const S: usize> {
    token: Matcher<T>,
    separator: Matcher<S>,
}

impl<const T: usize, const S: usize> Tokenizer<T, S> {
    #[doc(hidden)]
    pub const fn from_parts(token: Matcher<T>, separator: Matcher<S>) -> Self {
        Self { token, separator }
    }

    /// Bind the tokenizer to a query.
    pub fn apply<'t>(&self, query: &'t str) -> Tokens<'t, T, S> {
        Tokens {
            query,
            pos: 0,
            token: self.token.root,
            separator: self.separator.root,
        }
    }
}

/// Iterator over the tokens of one query.
#[derive(Debug, Clone, Copy)]
pub struct Tokens<'t, const T: usize, const S: usize> {
    query: &'t str,
    pos: usize,
    token: &'static Node,
    separator: &'static Node,
}

impl<'t, const T: usize, const S: usize> Iterator for Tokens<'t, T, S> {
    type Item = &'t str;

    fn next(&mut self) -> Option<&'t str> {
        // Skip separators sitting at the cursor. An empty separator
        // match cannot advance and would not separate anything.
        let mut caps = [Span::EMPTY; S];
        while let Some(end) = match_at(self.separator, self.query, self.pos, &mut caps)
            && end > self.pos
        {
            self.pos = end;
        }
        // The token must start right here; anything else ends the
        // iteration rather than being silently skipped.
        let mut caps = [Span::EMPTY; T];
        match match_at(self.token, self.query, self.pos, &mut caps) {
            Some(end) if end > self.pos => {
                let view = &self.query[self.pos..end];
                self.pos = end;
                Some(view)
            }
            _ => None,
        }
    }
}
