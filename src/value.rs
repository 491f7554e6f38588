//! Type coercers: one parse/format pair per supported [`Kind`].
//!
//! A [`Slot`] is a live `&mut` into a record field, tagged with its kind.
//! Parsing always goes through a temporary, so a failed parse leaves the
//! field exactly as it was.
//!
//! # Text forms
//!
//! | Kind | Accepted input | Formatted as |
//! |------|----------------|--------------|
//! | bool | `1 t T TRUE true True` / `0 f F FALSE false False` | `true` / `false` |
//! | int, int64, float | Rust numeric literal, surrounding whitespace ignored | `Display` |
//! | string | taken verbatim | verbatim |
//! | duration | `300ms`, `1.5h`, `2h45m`, `10us`, `5ns`, `0` | `1h30m0s`, `1.5s`, `250ms` |
//! | lists | comma-separated, each element trimmed | `a, b, c` |
//!
//! Formatting is chosen so that a dumped value parses back to the same value.
//! The two exceptions are strings with leading or trailing whitespace (INI
//! values are trimmed) and string-list elements that contain a comma.

use std::any::{Any, TypeId, type_name};
use std::time::Duration;

use thiserror::Error;

use crate::types::Kind;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// A value could not be parsed as the kind its field expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse {input:?} as {expected}")]
pub struct ParseValueError {
    pub input: String,
    pub expected: String,
}

impl ParseValueError {
    fn new(input: &str, expected: impl ToString) -> Self {
        Self {
            input: input.to_string(),
            expected: expected.to_string(),
        }
    }
}

/// A live, typed reference into a configuration record's storage.
#[derive(Debug)]
pub enum Slot<'a> {
    Bool(&'a mut bool),
    Int(&'a mut i32),
    Int64(&'a mut i64),
    Float(&'a mut f64),
    Str(&'a mut String),
    Duration(&'a mut Duration),
    IntList(&'a mut Vec<i64>),
    FloatList(&'a mut Vec<f64>),
    StrList(&'a mut Vec<String>),
    /// A field whose type has no coercer. Carries the Rust type name so the
    /// registration error can point at it.
    Unsupported(&'static str),
}

impl<'a> Slot<'a> {
    /// Wrap a mutable field reference, dispatching on its concrete type.
    pub fn new<T: Any>(value: &'a mut T) -> Self {
        let id = TypeId::of::<T>();
        let any: &'a mut dyn Any = value;
        let slot = if id == TypeId::of::<bool>() {
            any.downcast_mut().map(Slot::Bool)
        } else if id == TypeId::of::<i32>() {
            any.downcast_mut().map(Slot::Int)
        } else if id == TypeId::of::<i64>() {
            any.downcast_mut().map(Slot::Int64)
        } else if id == TypeId::of::<f64>() {
            any.downcast_mut().map(Slot::Float)
        } else if id == TypeId::of::<String>() {
            any.downcast_mut().map(Slot::Str)
        } else if id == TypeId::of::<Duration>() {
            any.downcast_mut().map(Slot::Duration)
        } else if id == TypeId::of::<Vec<i64>>() {
            any.downcast_mut().map(Slot::IntList)
        } else if id == TypeId::of::<Vec<f64>>() {
            any.downcast_mut().map(Slot::FloatList)
        } else if id == TypeId::of::<Vec<String>>() {
            any.downcast_mut().map(Slot::StrList)
        } else {
            None
        };
        slot.unwrap_or(Slot::Unsupported(type_name::<T>()))
    }

    /// The kind of this slot, or `None` for unsupported types.
    pub fn kind(&self) -> Option<Kind> {
        Some(match self {
            Slot::Bool(_) => Kind::Bool,
            Slot::Int(_) => Kind::Int,
            Slot::Int64(_) => Kind::Int64,
            Slot::Float(_) => Kind::Float,
            Slot::Str(_) => Kind::Str,
            Slot::Duration(_) => Kind::Duration,
            Slot::IntList(_) => Kind::IntList,
            Slot::FloatList(_) => Kind::FloatList,
            Slot::StrList(_) => Kind::StrList,
            Slot::Unsupported(_) => return None,
        })
    }

    /// Parse `raw` and store it in the field. On error the field is untouched.
    pub fn set(&mut self, raw: &str) -> Result<(), ParseValueError> {
        match self {
            Slot::Bool(v) => {
                **v = parse_bool(raw).ok_or_else(|| ParseValueError::new(raw, Kind::Bool))?
            }
            Slot::Int(v) => **v = parse_num(raw, Kind::Int)?,
            Slot::Int64(v) => **v = parse_num(raw, Kind::Int64)?,
            Slot::Float(v) => **v = parse_num(raw, Kind::Float)?,
            Slot::Str(v) => **v = raw.to_string(),
            Slot::Duration(v) => {
                **v = parse_duration(raw).ok_or_else(|| ParseValueError::new(raw, Kind::Duration))?
            }
            Slot::IntList(v) => **v = parse_list(raw, Kind::IntList, |s| s.parse().ok())?,
            Slot::FloatList(v) => **v = parse_list(raw, Kind::FloatList, |s| s.parse().ok())?,
            Slot::StrList(v) => **v = parse_list(raw, Kind::StrList, |s| Some(s.to_string()))?,
            Slot::Unsupported(name) => return Err(ParseValueError::new(raw, *name)),
        }
        Ok(())
    }

    /// Render the field's current value in its text form.
    pub fn get(&self) -> String {
        match self {
            Slot::Bool(v) => v.to_string(),
            Slot::Int(v) => v.to_string(),
            Slot::Int64(v) => v.to_string(),
            Slot::Float(v) => v.to_string(),
            Slot::Str(v) => v.to_string(),
            Slot::Duration(v) => format_duration(**v),
            Slot::IntList(v) => join(v.iter()),
            Slot::FloatList(v) => join(v.iter()),
            Slot::StrList(v) => join(v.iter()),
            Slot::Unsupported(name) => format!("<{name}>"),
        }
    }
}

fn join<T: ToString>(items: impl Iterator<Item = T>) -> String {
    items.map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
}

/// The boolean spellings accepted on the command line and in files.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim() {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn parse_num<T: std::str::FromStr>(raw: &str, kind: Kind) -> Result<T, ParseValueError> {
    raw.trim()
        .parse()
        .map_err(|_| ParseValueError::new(raw, kind))
}

/// Split on commas, trim each element, parse each one. An empty (or
/// whitespace-only) input is the empty list.
fn parse_list<T>(
    raw: &str,
    kind: Kind,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Vec<T>, ParseValueError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',')
        .map(|part| parse(part.trim()).ok_or_else(|| ParseValueError::new(raw, kind)))
        .collect()
}

/// Parse a duration such as `300ms`, `1.5h` or `2h45m`.
///
/// A sequence of decimal numbers, each with an optional fraction and a
/// required unit: `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`. A bare `0` is
/// also accepted. Negative durations are not representable and fail.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let s = input.trim();
    let s = s.strip_prefix('+').unwrap_or(s);
    if s == "0" {
        return Some(Duration::ZERO);
    }
    if s.is_empty() {
        return None;
    }

    let mut rest = s;
    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (int_part, after) = rest.split_at(int_len);
        let (frac_part, after) = match after.strip_prefix('.') {
            Some(tail) => {
                let n = tail
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(tail.len());
                tail.split_at(n)
            }
            None => ("", after),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }

        let unit_len = after
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after.len());
        let (unit, tail) = after.split_at(unit_len);
        let scale: u128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            "h" => 3600 * NANOS_PER_SEC,
            _ => return None,
        };

        if !int_part.is_empty() {
            let whole: u128 = int_part.parse().ok()?;
            total = total.checked_add(whole.checked_mul(scale)?)?;
        }
        if !frac_part.is_empty() {
            // Beyond 18 digits the fraction is below nanosecond resolution.
            let digits = &frac_part[..frac_part.len().min(18)];
            let frac: u128 = digits.parse().ok()?;
            let denom = 10u128.pow(digits.len() as u32);
            total = total.checked_add(frac * scale / denom)?;
        }
        rest = tail;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).ok()?;
    Some(Duration::new(secs, (total % NANOS_PER_SEC) as u32))
}

/// Format a duration in the form [`parse_duration`] reads back:
/// `1h30m0s`, `2.5s`, `250ms`, `0s`.
pub fn format_duration(d: Duration) -> String {
    if d.is_zero() {
        return "0s".to_string();
    }
    let secs = d.as_secs();
    let nanos = d.subsec_nanos();

    if secs == 0 {
        return if nanos % 1_000_000 == 0 {
            format!("{}ms", nanos / 1_000_000)
        } else if nanos % 1_000 == 0 {
            format!("{}us", nanos / 1_000)
        } else {
            format!("{nanos}ns")
        };
    }

    let (h, m, s) = (secs / 3600, secs % 3600 / 60, secs % 60);
    let mut out = String::new();
    if h > 0 {
        out.push_str(&format!("{h}h"));
    }
    if h > 0 || m > 0 {
        out.push_str(&format!("{m}m"));
    }
    out.push_str(&s.to_string());
    if nanos > 0 {
        let frac = format!("{nanos:09}");
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out.push('s');
    out
}
