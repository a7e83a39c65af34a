//! Scanning primitives behind the field parser.
//!
//! Every scanner works on a line and a byte cursor. The cursor only stops right after an ASCII
//! character or at the end of the line, so the line can always be split at it.
//!
//! Numbers are accumulated in `u64` and compared against `i32::MAX`: arguments, even unsigned
//! ones, must fit a signed 32 bits integer once the sign is applied.

const MAX_VALUE: u64 = i32::MAX as u64;

/// Outcome of a numeric scan.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum Scanned {
    /// No digit at the cursor.
    Missing,
    Value(u32),
    /// Digits were found but their value does not fit an `i32`.
    Overflow,
}

/// Outcome of a string literal scan.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct QuotedString {
    /// Length of the decoded content, in bytes.
    pub length: usize,
    /// The closing quote was found.
    pub terminated: bool,
    /// At least one escape sequence was decoded.
    pub escaped: bool,
}

fn digit_at(line: &str, index: usize) -> Option<u64> {
    match line.as_bytes().get(index) {
        Some(b @ b'0'..=b'9') => Some(u64::from(b - b'0')),
        _ => None,
    }
}

/// Scans decimal digits. On overflow the cursor is left where the scan started.
pub(crate) fn scan_unsigned_int(line: &str, index: &mut usize) -> Scanned {
    let start = *index;
    let mut value = 0;
    while let Some(digit) = digit_at(line, *index) {
        value = value * 10 + digit;
        if value > MAX_VALUE {
            *index = start;
            return Scanned::Overflow;
        }
        *index += 1;
    }
    if *index == start {
        Scanned::Missing
    } else {
        Scanned::Value(value as u32)
    }
}

/// Folds up to `scale` fractional digits into `integral * 10^scale`.
///
/// Digits past `scale` are consumed but do not contribute: the value is truncated. `Missing` is
/// returned when there is no digit at all, in which case `integral` is not scaled either.
pub(crate) fn scan_fraction(line: &str, index: &mut usize, scale: u8, integral: u32) -> Scanned {
    let start = *index;
    let mut value = u64::from(integral);
    let mut remaining = scale;
    let mut overflow = false;

    while remaining > 0 {
        let Some(digit) = digit_at(line, *index) else {
            break;
        };
        *index += 1;
        remaining -= 1;
        value = value * 10 + digit;
        if value > MAX_VALUE {
            overflow = true;
            break;
        }
    }

    if !overflow && *index != start {
        for _ in 0..remaining {
            value *= 10;
            if value > MAX_VALUE {
                overflow = true;
                break;
            }
        }
    }

    // truncated digits
    while digit_at(line, *index).is_some() {
        *index += 1;
    }

    match (*index == start, overflow) {
        (true, _) => Scanned::Missing,
        (false, true) => Scanned::Overflow,
        (false, false) => Scanned::Value(value as u32),
    }
}

/// Scans a double-quoted literal starting at the cursor. `None` if there is no opening quote.
///
/// `""` stands for a single `"`. With `single_quote_escape`, `'` escapes the next character. A
/// literal without its closing quote runs to the end of the line.
pub(crate) fn scan_quoted_string(
    line: &str,
    index: &mut usize,
    single_quote_escape: bool,
) -> Option<QuotedString> {
    let rest = line.get(*index..)?;
    let mut chars = rest.char_indices();
    if !matches!(chars.next(), Some((_, '"'))) {
        return None;
    }

    let mut literal = QuotedString {
        length: 0,
        terminated: false,
        escaped: false,
    };
    while let Some((at, ch)) = chars.next() {
        let decoded = match ch {
            '\'' if single_quote_escape => {
                literal.escaped = true;
                match chars.next() {
                    Some((_, escaped)) => escaped,
                    None => break,
                }
            }
            '"' if rest[at + 1..].starts_with('"') => {
                literal.escaped = true;
                chars.next();
                '"'
            }
            '"' => {
                literal.terminated = true;
                *index += at + 1;
                return Some(literal);
            }
            _ => ch,
        };
        literal.length += decoded.len_utf8();
    }

    *index += rest.len();
    Some(literal)
}
