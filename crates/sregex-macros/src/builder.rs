// Tree builder
//
// Recursive-descent consumer of the atom list. Produces the build-time
// mirror of the runtime matcher tree plus the total capture count; the
// emitter serializes it into `::sregex::Node` constants. Quantifiers
// attach to the last node appended, alternation has lowest precedence,
// and capture indices follow the left-to-right order of opening
// parentheses.

use crate::error::MalformedPattern;
use crate::tokenizer::Atom;

pub const UNBOUNDED: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Greedy,
    Lazy,
    Possessive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Word,
    Digit,
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetItem {
    Char(char),
    Range(char, char),
    Class(CharClass),
    NotClass(CharClass),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Literal(char),
    Any,
    Start,
    End,
    Class(CharClass),
    NotClass(CharClass),
    Set { items: Vec<SetItem>, negated: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstKind {
    Sequence,
    Terminal(Term),
    /// Capturing group with its 1-based index.
    Group(usize),
    Alternation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    pub kind: AstKind,
    pub children: Vec<Ast>,
    pub min: u32,
    pub max: u32,
    pub policy: Policy,
}

impl Ast {
    fn new(kind: AstKind, children: Vec<Ast>) -> Self {
        Ast {
            kind,
            children,
            min: 1,
            max: 1,
            policy: Policy::Greedy,
        }
    }

    fn terminal(term: Term) -> Self {
        Ast::new(AstKind::Terminal(term), Vec::new())
    }

    fn literal(c: char) -> Self {
        Ast::terminal(Term::Literal(c))
    }
}

/// Build the matcher tree. Returns the root and the capture count.
pub fn build(atoms: &[Atom]) -> Result<(Ast, usize), MalformedPattern> {
    let mut builder = TreeBuilder {
        atoms,
        pos: 0,
        groups: 0,
    };
    let root = builder.parse_alternation(false)?;
    Ok((root, builder.groups))
}

struct TreeBuilder<'a> {
    atoms: &'a [Atom],
    pos: usize,
    /// Running capture counter; also the index of the most recently
    /// opened capturing parenthesis.
    groups: usize,
}

/// One parsed element of a bracket expression.
enum SetUnit {
    /// A plain character; may form the end of a range.
    Char(char),
    /// A class item that cannot participate in a range.
    Classy(SetItem),
    /// A multi-unit numeric escape, one character per unit.
    Multi(Vec<char>),
}

impl TreeBuilder<'_> {
    fn peek(&self) -> Option<Atom> {
        self.atoms.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<Atom> {
        self.atoms.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<Atom> {
        let atom = self.peek();
        if atom.is_some() {
            self.pos += 1;
        }
        atom
    }

    /// `alternation := sequence ('|' sequence)*`, lowest precedence.
    fn parse_alternation(&mut self, in_group: bool) -> Result<Ast, MalformedPattern> {
        let mut branches = vec![self.parse_sequence(in_group)?];
        while self.peek() == Some(Atom::Meta('|')) {
            self.pos += 1;
            branches.push(self.parse_sequence(in_group)?);
        }
        if branches.len() == 1 {
            Ok(branches.pop().unwrap())
        } else {
            Ok(Ast::new(AstKind::Alternation, branches))
        }
    }

    /// One branch: atoms with their quantifiers, up to `|`, `)` or the
    /// end of the pattern.
    fn parse_sequence(&mut self, in_group: bool) -> Result<Ast, MalformedPattern> {
        let mut seq: Vec<Ast> = Vec::new();
        while let Some(atom) = self.peek() {
            match atom {
                Atom::Meta('|') => break,
                Atom::Meta(')') => {
                    if in_group {
                        break;
                    }
                    return Err(MalformedPattern::UnbalancedParenthesis);
                }
                Atom::Meta('(') => {
                    self.pos += 1;
                    let group = self.parse_group()?;
                    seq.push(group);
                }
                Atom::Meta('[') => {
                    self.pos += 1;
                    let set = self.parse_set()?;
                    seq.push(set);
                }
                Atom::Meta(']') => return Err(MalformedPattern::UnbalancedBracket),
                Atom::Meta('}') => return Err(MalformedPattern::UnbalancedBrace),
                Atom::Meta('^') => {
                    // anchor only as the first item of a branch
                    self.pos += 1;
                    if seq.is_empty() {
                        seq.push(Ast::terminal(Term::Start));
                    } else {
                        seq.push(Ast::literal('^'));
                    }
                }
                Atom::Meta('$') => {
                    // anchor only when the branch ends right after it
                    self.pos += 1;
                    let at_branch_end = matches!(
                        self.peek(),
                        None | Some(Atom::Meta(')')) | Some(Atom::Meta('|'))
                    );
                    if at_branch_end {
                        seq.push(Ast::terminal(Term::End));
                    } else {
                        seq.push(Ast::literal('$'));
                    }
                }
                Atom::Meta('.') => {
                    self.pos += 1;
                    seq.push(Ast::terminal(Term::Any));
                }
                Atom::Meta('-') => {
                    // only a range marker inside brackets
                    self.pos += 1;
                    seq.push(Ast::literal('-'));
                }
                Atom::Meta(q @ ('*' | '+' | '?')) => {
                    self.pos += 1;
                    self.apply_quantifier(&mut seq, q)?;
                }
                Atom::Meta('{') => {
                    self.pos += 1;
                    self.apply_braces(&mut seq)?;
                }
                Atom::Meta(other) => {
                    self.pos += 1;
                    seq.push(Ast::literal(other));
                }
                Atom::Char(c) => {
                    self.pos += 1;
                    seq.push(Ast::literal(c));
                }
                Atom::Esc(c) => {
                    self.pos += 1;
                    self.push_escape(c, &mut seq)?;
                }
            }
        }
        Ok(collapse(seq))
    }

    /// `(` already consumed. Handles `(?:` and assigns capture indices
    /// in opening order.
    fn parse_group(&mut self) -> Result<Ast, MalformedPattern> {
        let capturing =
            !(self.peek() == Some(Atom::Meta('?')) && self.peek_at(1) == Some(Atom::Char(':')));
        let index = if capturing {
            self.groups += 1;
            self.groups
        } else {
            self.pos += 2;
            0
        };
        let inner = self.parse_alternation(true)?;
        if self.bump() != Some(Atom::Meta(')')) {
            return Err(MalformedPattern::UnbalancedParenthesis);
        }
        let children = flatten(inner);
        if capturing {
            Ok(Ast::new(AstKind::Group(index), children))
        } else {
            Ok(Ast::new(AstKind::Sequence, children))
        }
    }

    /// `[` already consumed.
    fn parse_set(&mut self) -> Result<Ast, MalformedPattern> {
        let negated = self.peek() == Some(Atom::Meta('^'));
        if negated {
            self.pos += 1;
        }
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => return Err(MalformedPattern::UnbalancedBracket),
                Some(Atom::Meta(']')) => {
                    // class-item+: closing right away leaves nothing to
                    // match against
                    if items.is_empty() {
                        return Err(MalformedPattern::EmptyBracketExpression);
                    }
                    self.pos += 1;
                    break;
                }
                Some(_) => {
                    let unit = self.parse_set_unit()?;
                    let rangeable = self.peek() == Some(Atom::Meta('-'))
                        && !matches!(self.peek_at(1), None | Some(Atom::Meta(']')));
                    if let SetUnit::Char(start) = unit
                        && rangeable
                    {
                        self.pos += 1; // consume '-'
                        match self.parse_set_unit()? {
                            SetUnit::Char(end) => items.push(SetItem::Range(start, end)),
                            // not a plain character, so the dash was a literal
                            SetUnit::Classy(item) => {
                                items.push(SetItem::Char(start));
                                items.push(SetItem::Char('-'));
                                items.push(item);
                            }
                            SetUnit::Multi(chars) => {
                                items.push(SetItem::Char(start));
                                items.push(SetItem::Char('-'));
                                items.extend(chars.into_iter().map(SetItem::Char));
                            }
                        }
                    } else {
                        match unit {
                            SetUnit::Char(c) => items.push(SetItem::Char(c)),
                            SetUnit::Classy(item) => items.push(item),
                            SetUnit::Multi(chars) => {
                                items.extend(chars.into_iter().map(SetItem::Char));
                            }
                        }
                    }
                }
            }
        }
        Ok(Ast::terminal(Term::Set { items, negated }))
    }

    fn parse_set_unit(&mut self) -> Result<SetUnit, MalformedPattern> {
        // caller peeked, so an atom is there
        let atom = self.bump().unwrap();
        let unit = match atom {
            Atom::Char(c) => SetUnit::Char(c),
            // metacharacters are plain characters inside brackets
            Atom::Meta(c) => SetUnit::Char(c),
            Atom::Esc(c) => match c {
                'w' => SetUnit::Classy(SetItem::Class(CharClass::Word)),
                'd' => SetUnit::Classy(SetItem::Class(CharClass::Digit)),
                's' => SetUnit::Classy(SetItem::Class(CharClass::Space)),
                'W' => SetUnit::Classy(SetItem::NotClass(CharClass::Word)),
                'D' => SetUnit::Classy(SetItem::NotClass(CharClass::Digit)),
                'S' => SetUnit::Classy(SetItem::NotClass(CharClass::Space)),
                'n' => SetUnit::Char('\n'),
                't' => SetUnit::Char('\t'),
                'r' => SetUnit::Char('\r'),
                'f' => SetUnit::Char('\x0C'),
                'v' => SetUnit::Char('\x0B'),
                'x' => match self.scan_hex_escape()?.as_slice() {
                    [single] => SetUnit::Char(*single),
                    many => SetUnit::Multi(many.to_vec()),
                },
                'o' => match self.scan_braced_octal_escape()?.as_slice() {
                    [single] => SetUnit::Char(*single),
                    many => SetUnit::Multi(many.to_vec()),
                },
                '0'..='7' => SetUnit::Char(self.scan_short_octal_escape(c)?),
                c if c.is_ascii_alphanumeric() => {
                    return Err(MalformedPattern::InvalidEscape(c));
                }
                other => SetUnit::Char(other),
            },
        };
        Ok(unit)
    }

    /// `*` / `+` / `?` on the last node appended, plus an optional
    /// laziness/possessiveness modifier.
    fn apply_quantifier(
        &mut self,
        seq: &mut [Ast],
        quantifier: char,
    ) -> Result<(), MalformedPattern> {
        let Some(last) = seq.last_mut() else {
            return Err(MalformedPattern::StrayQuantifier(quantifier));
        };
        if last.min != 1 || last.max != 1 {
            return Err(MalformedPattern::StrayQuantifier(quantifier));
        }
        let (min, max) = match quantifier {
            '*' => (0, UNBOUNDED),
            '+' => (1, UNBOUNDED),
            _ => (0, 1),
        };
        last.min = min;
        last.max = max;
        last.policy = self.take_policy_modifier();
        Ok(())
    }

    /// `{` already consumed: `{n}`, `{n,}` or `{n,m}` plus modifier.
    fn apply_braces(&mut self, seq: &mut [Ast]) -> Result<(), MalformedPattern> {
        let mut spec = String::new();
        loop {
            match self.bump() {
                None => return Err(MalformedPattern::UnbalancedBrace),
                Some(Atom::Meta('}')) => break,
                Some(Atom::Char(c)) if c.is_ascii_digit() || c == ',' => spec.push(c),
                Some(_) => return Err(MalformedPattern::InvalidRepetition),
            }
        }
        let (min, max) = parse_repeat_spec(&spec)?;
        let Some(last) = seq.last_mut() else {
            return Err(MalformedPattern::StrayQuantifier('{'));
        };
        if last.min != 1 || last.max != 1 {
            return Err(MalformedPattern::StrayQuantifier('{'));
        }
        last.min = min;
        last.max = max;
        last.policy = self.take_policy_modifier();
        Ok(())
    }

    /// `?` after a quantifier makes it lazy, `+` makes it possessive.
    fn take_policy_modifier(&mut self) -> Policy {
        match self.peek() {
            Some(Atom::Meta('?')) => {
                self.pos += 1;
                Policy::Lazy
            }
            Some(Atom::Meta('+')) => {
                self.pos += 1;
                Policy::Possessive
            }
            _ => Policy::Greedy,
        }
    }

    /// Escape in sequence position; numeric escapes may expand to
    /// several literal nodes.
    fn push_escape(&mut self, c: char, seq: &mut Vec<Ast>) -> Result<(), MalformedPattern> {
        match c {
            'w' => seq.push(Ast::terminal(Term::Class(CharClass::Word))),
            'd' => seq.push(Ast::terminal(Term::Class(CharClass::Digit))),
            's' => seq.push(Ast::terminal(Term::Class(CharClass::Space))),
            'W' => seq.push(Ast::terminal(Term::NotClass(CharClass::Word))),
            'D' => seq.push(Ast::terminal(Term::NotClass(CharClass::Digit))),
            'S' => seq.push(Ast::terminal(Term::NotClass(CharClass::Space))),
            'n' => seq.push(Ast::literal('\n')),
            't' => seq.push(Ast::literal('\t')),
            'r' => seq.push(Ast::literal('\r')),
            'f' => seq.push(Ast::literal('\x0C')),
            'v' => seq.push(Ast::literal('\x0B')),
            'x' => {
                for decoded in self.scan_hex_escape()? {
                    seq.push(Ast::literal(decoded));
                }
            }
            'o' => {
                for decoded in self.scan_braced_octal_escape()? {
                    seq.push(Ast::literal(decoded));
                }
            }
            '0'..='7' => {
                let decoded = self.scan_short_octal_escape(c)?;
                seq.push(Ast::literal(decoded));
            }
            c if c.is_ascii_alphanumeric() => return Err(MalformedPattern::InvalidEscape(c)),
            other => seq.push(Ast::literal(other)),
        }
        Ok(())
    }

    /// `\xHH` or `\x{H…}`. A braced payload is consumed two digits per
    /// character, so `\x{414141}` is the three-character string "AAA".
    fn scan_hex_escape(&mut self) -> Result<Vec<char>, MalformedPattern> {
        if self.peek() == Some(Atom::Meta('{')) {
            self.pos += 1;
            let digits =
                self.collect_braced_digits(char::is_ascii_hexdigit, MalformedPattern::InvalidHexEscape)?;
            if digits.is_empty() || digits.len() % 2 != 0 {
                return Err(MalformedPattern::InvalidHexEscape);
            }
            Ok(digits
                .chunks(2)
                .map(|pair| decode_unit(pair, 16) as u8 as char)
                .collect())
        } else {
            let hi = self.expect_digit(char::is_ascii_hexdigit, MalformedPattern::InvalidHexEscape)?;
            let lo = self.expect_digit(char::is_ascii_hexdigit, MalformedPattern::InvalidHexEscape)?;
            Ok(vec![decode_unit(&[hi, lo], 16) as u8 as char])
        }
    }

    /// `\o{O…}`, three octal digits per character.
    fn scan_braced_octal_escape(&mut self) -> Result<Vec<char>, MalformedPattern> {
        if self.bump() != Some(Atom::Meta('{')) {
            return Err(MalformedPattern::InvalidOctalEscape);
        }
        let digits = self.collect_braced_digits(
            |c| c.is_digit(8),
            MalformedPattern::InvalidOctalEscape,
        )?;
        if digits.is_empty() || digits.len() % 3 != 0 {
            return Err(MalformedPattern::InvalidOctalEscape);
        }
        let mut decoded = Vec::with_capacity(digits.len() / 3);
        for triple in digits.chunks(3) {
            let value = decode_unit(triple, 8);
            if value > 0xFF {
                return Err(MalformedPattern::InvalidOctalEscape);
            }
            decoded.push(value as u8 as char);
        }
        Ok(decoded)
    }

    /// `\NNN`: one to three octal digits, first already consumed.
    fn scan_short_octal_escape(&mut self, first: char) -> Result<char, MalformedPattern> {
        let mut value = first.to_digit(8).unwrap();
        let mut taken = 0;
        while taken < 2
            && let Some(Atom::Char(c)) = self.peek()
            && let Some(digit) = c.to_digit(8)
        {
            self.pos += 1;
            value = value * 8 + digit;
            taken += 1;
        }
        if value > 0xFF {
            return Err(MalformedPattern::InvalidOctalEscape);
        }
        Ok(value as u8 as char)
    }

    fn collect_braced_digits(
        &mut self,
        accepts: impl Fn(&char) -> bool,
        bad_digit: MalformedPattern,
    ) -> Result<Vec<char>, MalformedPattern> {
        let mut digits = Vec::new();
        loop {
            match self.bump() {
                None => return Err(MalformedPattern::UnbalancedBrace),
                Some(Atom::Meta('}')) => return Ok(digits),
                Some(Atom::Char(c)) if accepts(&c) => digits.push(c),
                Some(_) => return Err(bad_digit),
            }
        }
    }

    fn expect_digit(
        &mut self,
        accepts: impl Fn(&char) -> bool,
        bad_digit: MalformedPattern,
    ) -> Result<char, MalformedPattern> {
        match self.bump() {
            Some(Atom::Char(c)) if accepts(&c) => Ok(c),
            _ => Err(bad_digit),
        }
    }
}

fn decode_unit(digits: &[char], radix: u32) -> u32 {
    digits
        .iter()
        .fold(0, |acc, c| acc * radix + c.to_digit(radix).unwrap())
}

fn parse_repeat_spec(spec: &str) -> Result<(u32, u32), MalformedPattern> {
    let mut parts = spec.splitn(2, ',');
    let min: u32 = parts
        .next()
        .unwrap_or("")
        .parse()
        .map_err(|_| MalformedPattern::InvalidRepetition)?;
    match parts.next() {
        None => Ok((min, min)),
        Some("") => Ok((min, UNBOUNDED)),
        Some(max_spec) => {
            let max: u32 = max_spec
                .parse()
                .map_err(|_| MalformedPattern::InvalidRepetition)?;
            if max < min {
                return Err(MalformedPattern::InvertedRepetition { min, max });
            }
            Ok((min, max))
        }
    }
}

/// A single-node sequence is that node; anything else gets a container.
fn collapse(mut seq: Vec<Ast>) -> Ast {
    if seq.len() == 1 {
        seq.pop().unwrap()
    } else {
        Ast::new(AstKind::Sequence, seq)
    }
}

/// Group children: unwrap an unquantified sequence container so the
/// group holds its items directly.
fn flatten(inner: Ast) -> Vec<Ast> {
    if inner.kind == AstKind::Sequence
        && inner.min == 1
        && inner.max == 1
        && inner.policy == Policy::Greedy
    {
        inner.children
    } else {
        vec![inner]
    }
}
