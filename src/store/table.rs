use std::fmt::Write;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use super::{VarEngine, ARRAY_CAPACITY, MAX_NAME_LEN, TABLE_CAPACITY};
use crate::error::{Result, VarError};

/// The value held by a variable.
///
/// A variable holds exactly one representation at a time; the enum discriminant is the
/// type tag, so the tag can never disagree with the payload. Assigning to an existing
/// name may switch the variant freely (last writer wins, no coercion of the old value).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// a 64-bit signed integer
    Int(i64),
    /// a floating point number, formatted to two decimal places on the wire
    Float(f64),
    /// the text between the double quotes of a quoted literal, stored verbatim
    Str(String),
    /// an ordered sequence of floats, at most [`ARRAY_CAPACITY`] elements long
    FloatArray(Vec<f64>),
}

impl Value {
    /// Renders this value in its canonical wire form, newline-terminated.
    ///
    /// Floats and array elements use two decimal places; each array element is followed
    /// by a single space, so a two element array reads `1.00 2.00 \n`.
    fn format(&self) -> String {
        match self {
            Value::Int(i) => format!("{}\n", i),
            Value::Float(f) => format!("{:.2}\n", f),
            Value::Str(s) => format!("{}\n", s),
            Value::FloatArray(elems) => {
                let mut out = String::new();
                for e in elems {
                    // write! into a String cannot fail
                    let _ = write!(out, "{:.2} ", e);
                }
                out.push('\n');
                out
            }
        }
    }
}

/// one named entry in the table
#[derive(Debug, Clone)]
struct Variable {
    name: String,
    value: Value,
}

/// The shared, insertion-ordered variable table.
///
/// `VarStore` is cheap to clone; every clone is a handle onto the same table, which is
/// how each connection handler gets at the process-wide state. All reads and writes take
/// the table's single mutex for the minimum span needed to inspect or mutate entries and
/// format a response string; callers transmit responses only after the lock is released.
///
/// The table holds at most [`TABLE_CAPACITY`] entries. Assigning to an existing name
/// overwrites its type and value in place and keeps its original list position; once the
/// table is full, assignments naming an absent variable are rejected with
/// [`VarError::TableFull`] and existing entries are untouched.
#[derive(Debug, Clone, Default)]
pub struct VarStore {
    vars: Arc<Mutex<Vec<Variable>>>,
}

impl VarStore {
    /// creates an empty table
    pub fn new() -> VarStore {
        VarStore::default()
    }

    /// locks the table, mapping a poisoned mutex to [`VarError::Poisoned`]
    fn lock(&self) -> Result<MutexGuard<'_, Vec<Variable>>> {
        self.vars.lock().map_err(|_| VarError::Poisoned)
    }
}

impl VarEngine for VarStore {
    fn list(&self) -> Result<String> {
        let vars = self.lock()?;
        let mut out = String::new();
        for var in vars.iter() {
            out.push_str(&var.name);
            out.push('\n');
        }
        Ok(out)
    }

    fn read(&self, name: &str) -> Result<String> {
        let vars = self.lock()?;
        let response = match vars.iter().find(|v| v.name == name) {
            Some(var) => var.value.format(),
            None => "Variable not found.\n".to_string(),
        };
        Ok(response)
    }

    fn set(&self, assignment: &str) -> Result<()> {
        // literal parsing is pure, so it happens before the lock is taken; a parse
        // failure leaves the table untouched
        let (name, value) = parse_assignment(assignment)?;
        let mut vars = self.lock()?;
        if let Some(var) = vars.iter_mut().find(|v| v.name == name) {
            debug!(%name, "overwriting variable");
            var.value = value;
            return Ok(());
        }
        if vars.len() >= TABLE_CAPACITY {
            return Err(VarError::TableFull(TABLE_CAPACITY));
        }
        debug!(%name, "creating variable");
        vars.push(Variable { name, value });
        Ok(())
    }
}

/// Splits a raw `lhs=value` assignment and infers the value's type.
///
/// Only the first `=` separates name from value; later `=` characters are part of the
/// value text. Both sides are trimmed of leading and trailing whitespace. Type inference
/// on the value is by content sniffing, in priority order:
///
/// 1. contains `{` - float array; the left-hand name may carry an index decoration
///    (`arr[3]`) which is accepted but ignored, the whole array is always replaced
/// 2. wrapped in matching double quotes - string, stored verbatim without the quotes
/// 3. contains `.` - float
/// 4. otherwise - integer
///
/// Numeric parsing is lenient in the `atoi`/`atof` manner: the longest leading numeric
/// prefix is used and anything unparsable falls back to zero.
fn parse_assignment(raw: &str) -> Result<(String, Value)> {
    let (lhs, rhs) = raw.split_once('=').ok_or(VarError::MissingEquals)?;
    let lhs = lhs.trim();
    let rhs = rhs.trim();

    if rhs.contains('{') {
        let base = match lhs.find('[') {
            Some(i) => lhs[..i].trim_end(),
            None => lhs,
        };
        let name = validated_name(base)?;
        Ok((name, Value::FloatArray(parse_array_literal(rhs)?)))
    } else {
        let name = validated_name(lhs)?;
        let value = if rhs.len() >= 2 && rhs.starts_with('"') && rhs.ends_with('"') {
            Value::Str(rhs[1..rhs.len() - 1].to_string())
        } else if rhs.contains('.') {
            Value::Float(lenient_f64(rhs))
        } else {
            Value::Int(lenient_i64(rhs))
        };
        Ok((name, value))
    }
}

/// checks the name length bounds
fn validated_name(name: &str) -> Result<String> {
    if name.is_empty() {
        Err(VarError::EmptyName)
    } else if name.len() > MAX_NAME_LEN {
        Err(VarError::NameTooLong(MAX_NAME_LEN))
    } else {
        Ok(name.to_string())
    }
}

/// Parses the `{f1,f2,...}` portion of an array assignment.
///
/// Elements beyond [`ARRAY_CAPACITY`] are dropped without error. A missing or inverted
/// brace pair is rejected; the caller surfaces that as a no-op.
fn parse_array_literal(rhs: &str) -> Result<Vec<f64>> {
    let open = rhs.find('{').ok_or(VarError::UnterminatedArray)?;
    let close = rhs
        .find('}')
        .filter(|close| *close > open)
        .ok_or(VarError::UnterminatedArray)?;

    let body = &rhs[open + 1..close];
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    Ok(body
        .split(',')
        .take(ARRAY_CAPACITY)
        .map(lenient_f64)
        .collect())
}

/// `atoi`-style integer parse: longest leading `[+-]?[0-9]*` prefix, zero fallback
fn lenient_i64(text: &str) -> i64 {
    numeric_prefix(text, false).parse().unwrap_or(0)
}

/// `atof`-style float parse: longest leading `[+-]?[0-9]*(\.[0-9]*)?` prefix, zero fallback
fn lenient_f64(text: &str) -> f64 {
    numeric_prefix(text, true).parse().unwrap_or(0.0)
}

fn numeric_prefix(text: &str, allow_dot: bool) -> &str {
    let text = text.trim();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if allow_dot && !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    &text[..end]
}
