use smallvec::SmallVec;

use crate::foundation::error::{CubistError, CubistResult};

/// One command letter with the numbers that followed it.
///
/// Argument counts are not validated here; the compiler chunks them per
/// command arity.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CommandGroup {
    /// ASCII command letter; case carries the absolute/relative distinction.
    pub(crate) cmd: u8,
    /// Raw argument numbers in textual order.
    pub(crate) args: SmallVec<[f64; 8]>,
}

fn is_command_letter(c: u8) -> bool {
    matches!(
        c.to_ascii_uppercase(),
        b'M' | b'L' | b'H' | b'V' | b'C' | b'S' | b'Q' | b'T' | b'Z' | b'A'
    )
}

/// Split a path-command string into command groups.
///
/// Numbers are separated by commas and/or whitespace; a bare `-` starts a
/// new number even with no separator, while `e-`/`E-` exponents stay inside
/// one number.
pub(crate) fn lex_path(input: &str) -> CubistResult<Vec<CommandGroup>> {
    let bytes = input.as_bytes();
    let mut groups: Vec<CommandGroup> = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_whitespace() || c == b',' {
            i += 1;
            continue;
        }

        if c.is_ascii_alphabetic() {
            if !is_command_letter(c) {
                return Err(CubistError::path_syntax(format!(
                    "unexpected command letter '{}' at byte {i}",
                    c as char
                )));
            }
            groups.push(CommandGroup {
                cmd: c,
                args: SmallVec::new(),
            });
            i += 1;
            continue;
        }

        let (value, next) = scan_number(input, i)?;
        let Some(group) = groups.last_mut() else {
            return Err(CubistError::path_syntax(format!(
                "number before any command at byte {i}"
            )));
        };
        group.args.push(value);
        i = next;
    }

    Ok(groups)
}

/// Extract every number from a comma/whitespace separated list.
///
/// Shared by `points` attributes and transform argument lists.
pub(crate) fn lex_numbers(input: &str) -> CubistResult<Vec<f64>> {
    let bytes = input.as_bytes();
    let mut out = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_whitespace() || c == b',' {
            i += 1;
            continue;
        }
        let (value, next) = scan_number(input, i)?;
        out.push(value);
        i = next;
    }

    Ok(out)
}

/// Parse an attribute value holding exactly one number.
pub(crate) fn parse_number(input: &str) -> CubistResult<f64> {
    let nums = lex_numbers(input)?;
    match nums.as_slice() {
        [v] => Ok(*v),
        _ => Err(CubistError::numeric(format!(
            "expected one number in '{input}', got {}",
            nums.len()
        ))),
    }
}

/// Scan one number starting at byte `start`; returns the value and the byte
/// position just past it.
fn scan_number(input: &str, start: usize) -> CubistResult<(f64, usize)> {
    let bytes = input.as_bytes();
    let mut i = start;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let mantissa_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    let mantissa = &input[mantissa_start..i];
    if mantissa.is_empty() || mantissa == "." {
        return Err(CubistError::numeric(format!(
            "expected a number at byte {start}"
        )));
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let e_pos = i;
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if exp_start == i {
            return Err(CubistError::numeric(format!(
                "invalid exponent at byte {e_pos}"
            )));
        }
    }

    let text = &input[start..i];
    let value: f64 = text
        .parse()
        .map_err(|_| CubistError::numeric(format!("invalid number '{text}'")))?;
    Ok((value, i))
}

#[cfg(test)]
#[path = "../../tests/unit/path/lexer.rs"]
mod tests;
