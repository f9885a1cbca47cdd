// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQL templates
//!
//! A template is a SQL fragment with argument slots:
//!
//! | token | expands to |
//! |---|---|
//! | `{0}`, `{1}`, ... | the compiled argument at that position |
//! | `{args}` | every compiled argument, joined by the separator |
//! | `{distinct}` | `DISTINCT ` for distinct aggregates, otherwise nothing |
//!
//! Positional slots must appear in ascending order and at most once, so that
//! the text order of arguments always matches the order in which their
//! parameters were bound. `{args}` cannot be mixed with positional slots.
//! Parentheses must balance outside `'...'` literals.

use std::fmt;

use crate::error::{DialectError, DialectResult};

/// Default separator for `{args}`
pub const DEFAULT_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Arg(usize),
    Args,
    Distinct,
}

/// Parsed, validated SQL template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlTemplate {
    source: String,
    separator: String,
    segments: Vec<Segment>,
}

impl SqlTemplate {
    /// Parse a template whose `{args}` slot, if any, uses `", "`
    pub fn parse(pattern: &str) -> DialectResult<Self> {
        Self::with_separator(pattern, DEFAULT_SEPARATOR)
    }

    /// Parse a template with a custom `{args}` separator
    pub fn with_separator(pattern: &str, separator: &str) -> DialectResult<Self> {
        let segments = parse_segments(pattern)?;
        Ok(Self {
            source: pattern.to_string(),
            separator: separator.to_string(),
            segments,
        })
    }

    /// The pattern the template was parsed from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Whether the template expands every argument through `{args}`
    pub fn is_variadic(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Args))
    }

    /// Positional slots, in text order
    pub fn slots(&self) -> Vec<usize> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Arg(i) => Some(*i),
                _ => None,
            })
            .collect()
    }

    pub fn has_distinct(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Distinct))
    }

    /// Check that the template consumes exactly `count` arguments.
    ///
    /// Variadic templates accept any count.
    pub fn check_arg_count(&self, count: usize) -> DialectResult<()> {
        if self.is_variadic() {
            return Ok(());
        }
        let slots = self.slots();
        if slots.iter().copied().eq(0..count) {
            Ok(())
        } else {
            Err(DialectError::template(
                &self.source,
                format!("expected slots {{0}}..{{{}}}, found {:?}", count.saturating_sub(1), slots),
            ))
        }
    }

    /// Fill the template with compiled arguments.
    ///
    /// The arguments must match what [`check_arg_count`](Self::check_arg_count)
    /// accepted; registry construction guarantees this for registered entries.
    pub fn render(&self, args: &[String], distinct: bool) -> String {
        let capacity = self.source.len() + args.iter().map(String::len).sum::<usize>();
        let mut out = String::with_capacity(capacity);
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Arg(i) => out.push_str(args.get(*i).map_or("", String::as_str)),
                Segment::Args => out.push_str(&args.join(&self.separator)),
                Segment::Distinct if distinct => out.push_str("DISTINCT "),
                Segment::Distinct => {}
            }
        }
        out
    }
}

impl fmt::Display for SqlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_segments(pattern: &str) -> DialectResult<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut last_slot: Option<usize> = None;
    let mut has_args = false;
    let mut has_distinct = false;
    let mut depth = 0usize;
    let mut in_literal = false;
    let mut chars = pattern.char_indices();

    while let Some((start, c)) = chars.next() {
        match c {
            '{' => {
                let rest = &pattern[start + 1..];
                let end = rest.find('}').ok_or_else(|| {
                    DialectError::template(pattern, format!("unclosed '{{' at {start}"))
                })?;
                let token = &rest[..end];
                // skip the token body and the closing brace
                for _ in 0..=token.chars().count() {
                    chars.next();
                }

                let segment = match token {
                    "args" if has_args => {
                        return Err(DialectError::template(
                            pattern,
                            "{args} appears more than once",
                        ));
                    }
                    "args" => {
                        has_args = true;
                        Segment::Args
                    }
                    "distinct" if has_distinct => {
                        return Err(DialectError::template(
                            pattern,
                            "{distinct} appears more than once",
                        ));
                    }
                    "distinct" => {
                        has_distinct = true;
                        Segment::Distinct
                    }
                    _ => {
                        let index: usize = token.parse().map_err(|_| {
                            DialectError::template(pattern, format!("unknown token '{{{token}}}'"))
                        })?;
                        if last_slot.is_some_and(|last| index <= last) {
                            return Err(DialectError::template(
                                pattern,
                                format!("slot {{{index}}} is out of order or repeated"),
                            ));
                        }
                        last_slot = Some(index);
                        Segment::Arg(index)
                    }
                };

                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                segments.push(segment);
            }
            '}' => {
                return Err(DialectError::template(pattern, format!("unmatched '}}' at {start}")));
            }
            '\'' => {
                in_literal = !in_literal;
                text.push(c);
            }
            '(' if !in_literal => {
                depth += 1;
                text.push(c);
            }
            ')' if !in_literal => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    DialectError::template(pattern, format!("unmatched ')' at {start}"))
                })?;
                text.push(c);
            }
            _ => text.push(c),
        }
    }

    if in_literal {
        return Err(DialectError::template(pattern, "unterminated string literal"));
    }
    if depth > 0 {
        return Err(DialectError::template(pattern, format!("{depth} unclosed '('")));
    }

    if has_args && last_slot.is_some() {
        return Err(DialectError::template(pattern, "{args} cannot be mixed with positional slots"));
    }
    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    Ok(segments)
}
