//! Placeholder rewriting: turns `#1 + #2` into `_arg0,_arg1:_arg0 + _arg1`
//! and `#i * 2 for #i in #?` into `[_elem * 2 for _elem in _argv]`.

use std::fmt::{self, Display, Formatter};

use crate::error::{LambdaError, Result};

pub const PLACEHOLDER_INDICATOR: char = '#';
/// Binds the whole argument list.
pub const AGGREGATE_TOKEN: &str = "#?";
/// Binds one element of the argument list inside a comprehension.
pub const ELEMENT_TOKEN: &str = "#i";

pub const PARAM_PREFIX: &str = "_arg";
pub const ELEMENT_NAME: &str = "_elem";
pub const COLLECTION_NAME: &str = "_argv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    /// `#` followed by its maximal run of digits (the digits only).
    Index(&'a str),
    Element,
    Aggregate,
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn segments(expr: &str) -> Vec<Segment<'_>> {
    let bytes = expr.as_bytes();
    let mut out = Vec::new();
    let mut text_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != PLACEHOLDER_INDICATOR as u8 {
            i += 1;
            continue;
        }
        let rest = &bytes[i + 1..];
        let (segment, len) = match rest.first() {
            Some(b'?') => (Segment::Aggregate, 2),
            Some(b'i') if !rest.get(1).copied().is_some_and(is_ident_byte) => (Segment::Element, 2),
            Some(b) if b.is_ascii_digit() => {
                let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
                (Segment::Index(&expr[i + 1..i + 1 + digits]), 1 + digits)
            }
            _ => {
                i += 1;
                continue;
            }
        };
        if text_start < i {
            out.push(Segment::Text(&expr[text_start..i]));
        }
        out.push(segment);
        i += len;
        text_start = i;
    }
    if text_start < bytes.len() {
        out.push(Segment::Text(&expr[text_start..]));
    }
    out
}

/// True when the expression maps over the whole collection (`#?`).
pub fn is_aggregate(expr: &str) -> bool {
    expr.contains(AGGREGATE_TOKEN)
}

/// Every positional index referenced, in order of appearance.
pub fn placeholder_indices(expr: &str) -> Result<Vec<usize>> {
    segments(expr)
        .into_iter()
        .filter_map(|s| match s {
            Segment::Index(digits) => Some(digits),
            _ => None,
        })
        .map(|digits| {
            digits
                .parse::<usize>()
                .map_err(|_| LambdaError::invalid_argument(format!("placeholder #{} is out of range", digits)))
        })
        .collect()
}

/// Arity of a positional expression: the highest `#k` it references.
pub fn max_placeholder_index(expr: &str) -> Result<usize> {
    match placeholder_indices(expr)?.into_iter().max() {
        Some(n) if n > 0 => Ok(n),
        _ => Err(LambdaError::invalid_argument(format!(
            "no positional placeholder (#1, #2, ...) found in `{}`",
            expr
        ))),
    }
}

/// Rewritten, directly parseable text of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableForm {
    /// `_arg0,_arg1:` for positional forms, empty for comprehensions.
    pub head: String,
    pub body: String,
}

impl CallableForm {
    pub fn is_comprehension(&self) -> bool {
        self.head.is_empty()
    }
}

impl Display for CallableForm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.head, self.body)
    }
}

pub fn param_name(idx: usize) -> String {
    format!("{}{}", PARAM_PREFIX, idx)
}

pub fn build_head(arity: usize) -> String {
    let params: Vec<String> = (0..arity).map(param_name).collect();
    format!("{}:", params.join(","))
}

pub fn build_body(expr: &str, arity: usize, aggregate: bool) -> String {
    let mut body = String::with_capacity(expr.len() + 16);
    for segment in segments(expr) {
        match segment {
            Segment::Text(text) => body.push_str(text),
            Segment::Element if aggregate => body.push_str(ELEMENT_NAME),
            Segment::Aggregate if aggregate => body.push_str(COLLECTION_NAME),
            Segment::Index(digits) if !aggregate => match digits.parse::<usize>() {
                Ok(k) if (1..=arity).contains(&k) => body.push_str(&param_name(k - 1)),
                _ => {
                    body.push(PLACEHOLDER_INDICATOR);
                    body.push_str(digits);
                }
            },
            Segment::Index(digits) => {
                body.push(PLACEHOLDER_INDICATOR);
                body.push_str(digits);
            }
            Segment::Element => body.push_str(ELEMENT_TOKEN),
            Segment::Aggregate => body.push_str(AGGREGATE_TOKEN),
        }
    }
    if aggregate {
        format!("[{}]", body)
    } else {
        body
    }
}

pub fn rewrite(expr: &str, arity: usize, aggregate: bool) -> CallableForm {
    CallableForm {
        head: if aggregate { String::new() } else { build_head(arity) },
        body: build_body(expr, arity, aggregate),
    }
}
