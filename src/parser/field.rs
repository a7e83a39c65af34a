use core::{char::ToLowercase, fmt, iter::FusedIterator, str::Chars, str::FromStr};

#[cfg(feature = "alloc")]
use alloc::{borrow::Cow, string::String};

use crate::{
    parser::values::{scan_fraction, scan_quoted_string, scan_unsigned_int, Scanned},
    settings::ParsingSettings,
    types::{Code, Decimal},
    utils::skip_whitespace,
    Error,
};

/// Spaced reals are rebuilt without whitespace and leading zeros in a buffer this long. Fractional
/// digits past it are dropped.
const FLOAT_TEXT_CAPACITY: usize = 64;
const MAX_DECIMAL_SCALE: u8 = 18;

/// How a field's argument was written.
///
/// The compact kinds can be decoded straight from the source text, the other ones need a second
/// pass. Both decode to the same values.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ArgumentKind {
    /// `X`
    NoArgument,
    /// `X123`, `X - 12`
    Integer,
    /// `X123.45`, `X-.5`, `X12.`
    RealCompact,
    /// `X - 1 .`, `X .123`
    RealSpaced,
    /// `X"ab"`
    StringCompact,
    /// `X "abc"`, `X"abc`
    StringMaybeUnterminated,
    /// `X"ab""c"`
    StringEscaped,
    /// `X"'A'B"`
    StringEscapedSingleQuote,
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum Argument {
    None,
    Integer {
        value: i32,
        scaled: Option<i32>,
    },
    Real {
        integral: i32,
        scaled: Option<i32>,
        spaced: bool,
    },
    String {
        kind: ArgumentKind,
        length: usize,
    },
}

/// One `<word><optional argument>` unit of a line.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Field<'a> {
    word: char,
    raw: &'a str,
    argument: Argument,
}

impl<'a> Field<'a> {
    /// Recognizes one field at the very start of `line`.
    ///
    /// Returns the field and the text following it. The field's [`raw`](Field::raw) text
    /// followed by the tail is always `line`. When the line does not start with a letter or `*`
    /// there is no field and nothing is consumed.
    ///
    /// Numeric arguments are parsed speculatively: when the text after the word turns out not to
    /// be a number (`X-Y`, `X.`, an overflowing `X9876543210`), the field is argument-less if a
    /// space separates it from that text and is not recognized at all otherwise.
    pub fn try_parse(line: &'a str, settings: &ParsingSettings) -> (Option<Field<'a>>, &'a str) {
        let bytes = line.as_bytes();
        let word = match bytes.first() {
            Some(&letter) if letter.is_ascii_alphabetic() => {
                settings.case_normalization().apply(char::from(letter))
            }
            Some(b'*') => '*',
            _ => return (None, line),
        };

        let mut index = 1;
        let mut spaced = skip_whitespace(line, &mut index) != 0;
        let next = match bytes.get(index) {
            Some(&next) => next,
            None => return Self::split(word, line, 1, Argument::None),
        };

        if next == b'"' {
            return Self::parse_string(word, line, index, settings);
        }

        let mut negative = false;
        if next == b'+' || next == b'-' {
            negative = next == b'-';
            index += 1;
            spaced |= skip_whitespace(line, &mut index) != 0;
        }

        let (integral, has_digits) = match scan_unsigned_int(line, &mut index) {
            Scanned::Value(value) => (value, true),
            // still can be "X.1" or "X-.1"
            Scanned::Missing | Scanned::Overflow if bytes.get(index) == Some(&b'.') => (0, false),
            Scanned::Missing | Scanned::Overflow => return Self::backtrack(word, line),
        };
        let signed = apply_sign(integral, negative);

        let mut dot = index;
        spaced |= skip_whitespace(line, &mut dot) != 0;
        if bytes.get(dot) != Some(&b'.') {
            let scaled = settings.scale_integer(integral, negative);
            return Self::split(word, line, index, Argument::Integer { value: signed, scaled });
        }

        let mut end = dot + 1;
        let spaced_fraction = skip_whitespace(line, &mut end) != 0;
        let (end, scaled) = match scan_fraction(line, &mut end, settings.fractional_scale(), integral) {
            Scanned::Value(value) => {
                spaced |= spaced_fraction;
                (end, Some(apply_sign(value, negative)))
            }
            Scanned::Overflow => {
                spaced |= spaced_fraction;
                (end, None)
            }
            // "X123."
            Scanned::Missing if has_digits => (dot + 1, settings.scale_integer(integral, negative)),
            // "X." or "X-."
            Scanned::Missing => return Self::backtrack(word, line),
        };
        let argument = Argument::Real {
            integral: signed,
            scaled,
            spaced,
        };
        Self::split(word, line, end, argument)
    }

    fn parse_string(
        word: char,
        line: &'a str,
        start: usize,
        settings: &ParsingSettings,
    ) -> (Option<Field<'a>>, &'a str) {
        let mut index = start;
        let single_quote_escape = settings.single_quote_escape();
        let Some(literal) = scan_quoted_string(line, &mut index, single_quote_escape) else {
            return Self::backtrack(word, line);
        };
        let kind = match (literal.escaped, single_quote_escape) {
            (true, true) => ArgumentKind::StringEscapedSingleQuote,
            (true, false) => ArgumentKind::StringEscaped,
            _ if start == 1 && literal.terminated => ArgumentKind::StringCompact,
            _ => ArgumentKind::StringMaybeUnterminated,
        };
        let length = literal.length;
        Self::split(word, line, index, Argument::String { kind, length })
    }

    /// Gives up on the argument: keeps the bare word if whitespace follows it.
    fn backtrack(word: char, line: &'a str) -> (Option<Field<'a>>, &'a str) {
        let mut index = 1;
        if skip_whitespace(line, &mut index) == 0 {
            return (None, line);
        }
        Self::split(word, line, 1, Argument::None)
    }

    fn split(
        word: char,
        line: &'a str,
        at: usize,
        argument: Argument,
    ) -> (Option<Field<'a>>, &'a str) {
        let (raw, tail) = line.split_at(at);
        (Some(Field { word, raw, argument }), tail)
    }

    /// The field's letter, normalized per settings, or `*` for a checksum.
    pub fn word(&self) -> char {
        self.word
    }

    /// The exact text the field was parsed from.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn kind(&self) -> ArgumentKind {
        match self.argument {
            Argument::None => ArgumentKind::NoArgument,
            Argument::Integer { .. } => ArgumentKind::Integer,
            Argument::Real { spaced: false, .. } => ArgumentKind::RealCompact,
            Argument::Real { spaced: true, .. } => ArgumentKind::RealSpaced,
            Argument::String { kind, .. } => kind,
        }
    }

    pub fn has_argument(&self) -> bool {
        !matches!(self.argument, Argument::None)
    }

    /// The argument text, without the word and the whitespace after it.
    fn raw_argument(&self) -> &'a str {
        let mut index = 1;
        skip_whitespace(self.raw, &mut index);
        &self.raw[index..]
    }

    /// The integral part of a numeric argument: `-12` for `X-12.7`.
    pub fn int_argument(&self) -> Result<i32, Error> {
        match self.argument {
            Argument::Integer { value, .. } => Ok(value),
            Argument::Real { integral, .. } => Ok(integral),
            _ => Err(Error::ArgumentMissing("integer")),
        }
    }

    /// The numeric argument multiplied by `10^fractional_scale`, extra fractional digits
    /// truncated.
    pub fn scaled_int_argument(&self) -> Result<i32, Error> {
        match self.argument {
            Argument::Integer { scaled, .. } | Argument::Real { scaled, .. } => {
                scaled.ok_or(Error::ScaledIntegerOverflow)
            }
            _ => Err(Error::ArgumentMissing("integer")),
        }
    }

    pub fn float_argument(&self) -> Result<f32, Error> {
        match self.argument {
            Argument::Integer { value, .. } => Ok(value as f32),
            Argument::Real { spaced, .. } => self.parse_real(spaced),
            _ => Err(Error::ArgumentMissing("float")),
        }
    }

    pub fn double_argument(&self) -> Result<f64, Error> {
        match self.argument {
            Argument::Integer { value, .. } => Ok(value.into()),
            Argument::Real { spaced, .. } => self.parse_real(spaced),
            _ => Err(Error::ArgumentMissing("double")),
        }
    }

    pub fn decimal_argument(&self) -> Result<Decimal, Error> {
        match self.argument {
            Argument::Integer { value, .. } => Ok(value.into()),
            Argument::Real { .. } => Ok(self.parse_decimal()),
            _ => Err(Error::ArgumentMissing("decimal")),
        }
    }

    fn parse_real<T: FromStr>(&self, spaced: bool) -> Result<T, Error> {
        let argument = &self.raw[1..];
        if !spaced {
            return argument.parse().map_err(|_| Error::BadNumberFormat);
        }

        let mut buffer = [0; FLOAT_TEXT_CAPACITY];
        let mut length = 0;
        let mut leading_zeros = false;
        let mut significant = false;
        let mut fraction = false;
        for b in argument.bytes().filter(|b| !matches!(b, b' ' | b'\t')) {
            match b {
                b'0' if !significant && !fraction => {
                    leading_zeros = true;
                    continue;
                }
                b'1'..=b'9' => significant = true,
                b'.' => {
                    fraction = true;
                    // "00 . 5" still needs its integral digit
                    if leading_zeros && !significant {
                        buffer[length] = b'0';
                        length += 1;
                    }
                }
                _ => {}
            }
            if length == buffer.len() {
                // trailing fractional digits can go, integral ones cannot
                if fraction {
                    break;
                }
                return Err(Error::BadNumberFormat);
            }
            buffer[length] = b;
            length += 1;
        }
        core::str::from_utf8(&buffer[..length])
            .map_err(|_| Error::BadNumberFormat)?
            .parse()
            .map_err(|_| Error::BadNumberFormat)
    }

    fn parse_decimal(&self) -> Decimal {
        let mut negative = false;
        let mut fraction = false;
        let mut mantissa: i64 = 0;
        let mut scale = 0;
        for b in self.raw[1..].bytes() {
            match b {
                b'-' => negative = true,
                b'.' => fraction = true,
                b'0'..=b'9' => {
                    let digit = i64::from(b - b'0');
                    match mantissa.checked_mul(10).and_then(|m| m.checked_add(digit)) {
                        Some(next) if !fraction => mantissa = next,
                        Some(next) if scale < MAX_DECIMAL_SCALE => {
                            mantissa = next;
                            scale += 1;
                        }
                        _ => break,
                    }
                }
                _ => {}
            }
        }
        Decimal::new(if negative { -mantissa } else { mantissa }, scale)
    }

    /// The string argument.
    ///
    /// Decoded content for string literals, the argument text (without leading whitespace) for
    /// numeric arguments.
    pub fn string_argument(&self) -> Result<StringArgument<'a>, Error> {
        let (kind, length) = match self.argument {
            Argument::None => return Err(Error::ArgumentMissing("string")),
            Argument::Integer { .. } | Argument::Real { .. } => {
                return Ok(StringArgument::verbatim(self.raw_argument()))
            }
            Argument::String { kind, length } => (kind, length),
        };
        // skip the opening quote
        let literal = &self.raw_argument()[1..];
        let (text, escape) = match kind {
            ArgumentKind::StringCompact => (&literal[..literal.len() - 1], Escape::Verbatim),
            ArgumentKind::StringEscaped => (literal, Escape::Quotes),
            ArgumentKind::StringEscapedSingleQuote => (literal, Escape::QuotesAndSingleQuotes),
            _ => (literal.strip_suffix('"').unwrap_or(literal), Escape::Verbatim),
        };
        Ok(StringArgument {
            text,
            escape,
            length,
        })
    }

    /// Packs the word and a `<number>[.<subcode>]` argument into a [`Code`].
    ///
    /// [`Code::INVALID`] for the `*` word, or when the argument is not a non-negative 16 bits
    /// number optionally followed by a dot and an 8 bits subcode.
    pub fn code_argument(&self) -> Code {
        // checksums are not commands
        if !self.word.is_ascii_alphabetic() {
            return Code::INVALID;
        }
        match self.argument {
            Argument::Integer { value, .. } => match u16::try_from(value) {
                Ok(number) => Code::new(self.word, number, 0),
                Err(_) => Code::INVALID,
            },
            Argument::Real { .. } => self.dotted_code().unwrap_or(Code::INVALID),
            _ => Code::INVALID,
        }
    }

    fn dotted_code(&self) -> Option<Code> {
        let raw = self.raw;
        let mut index = 1;
        skip_whitespace(raw, &mut index);
        let number = match scan_unsigned_int(raw, &mut index) {
            Scanned::Value(number) => u16::try_from(number).ok()?,
            _ => return None,
        };

        skip_whitespace(raw, &mut index);
        if raw.as_bytes().get(index) != Some(&b'.') {
            return None;
        }
        index += 1;
        skip_whitespace(raw, &mut index);

        let subcode = match scan_unsigned_int(raw, &mut index) {
            Scanned::Value(subcode) => u8::try_from(subcode).ok()?,
            _ => return None,
        };
        Some(Code::new(self.word, number, subcode))
    }
}

impl fmt::Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)
    }
}

fn apply_sign(value: u32, negative: bool) -> i32 {
    // scanners never produce values above i32::MAX
    let value = value as i32;
    if negative {
        -value
    } else {
        value
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Escape {
    Verbatim,
    Quotes,
    QuotesAndSingleQuotes,
}

/// A string argument, decoded lazily from the line it was parsed from.
#[derive(Debug, Clone, Copy)]
pub struct StringArgument<'a> {
    text: &'a str,
    escape: Escape,
    length: usize,
}

impl<'a> StringArgument<'a> {
    fn verbatim(text: &'a str) -> Self {
        Self {
            text,
            escape: Escape::Verbatim,
            length: text.len(),
        }
    }

    /// The content as a slice of the line, when it needs no decoding.
    pub fn as_str(&self) -> Option<&'a str> {
        match self.escape {
            Escape::Verbatim => Some(self.text),
            Escape::Quotes | Escape::QuotesAndSingleQuotes => None,
        }
    }

    pub fn chars(&self) -> DecodedChars<'a> {
        DecodedChars {
            chars: self.text.chars(),
            escape: self.escape,
            lowercase: None,
        }
    }

    /// Length in bytes of the decoded content, as counted while scanning the literal.
    ///
    /// Exact unless single-quote escapes lower-case a character into one of a different length.
    pub fn decoded_len_hint(&self) -> usize {
        self.length
    }

    #[cfg(feature = "alloc")]
    pub fn to_cow(&self) -> Cow<'a, str> {
        match self.as_str() {
            Some(text) => Cow::Borrowed(text),
            None => {
                let mut decoded = String::with_capacity(self.length);
                decoded.extend(self.chars());
                Cow::Owned(decoded)
            }
        }
    }
}

impl fmt::Display for StringArgument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.as_str() {
            return f.write_str(text);
        }
        self.chars().try_for_each(|ch| fmt::Write::write_char(&mut *f, ch))
    }
}

impl PartialEq<str> for StringArgument<'_> {
    fn eq(&self, other: &str) -> bool {
        self.chars().eq(other.chars())
    }
}

impl PartialEq<&str> for StringArgument<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.chars().eq(other.chars())
    }
}

/// Iterator over the decoded chars of a [`StringArgument`].
#[derive(Debug, Clone)]
pub struct DecodedChars<'a> {
    chars: Chars<'a>,
    escape: Escape,
    lowercase: Option<ToLowercase>,
}

impl Iterator for DecodedChars<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if let Some(lowercase) = &mut self.lowercase {
            match lowercase.next() {
                Some(ch) => return Some(ch),
                None => self.lowercase = None,
            }
        }

        let ch = self.chars.next()?;
        match (ch, self.escape) {
            (_, Escape::Verbatim) => Some(ch),
            // either the first half of "" or the closing quote
            ('"', _) => self.chars.next(),
            ('\'', Escape::QuotesAndSingleQuotes) => {
                let mut lowercase = self.chars.next()?.to_lowercase();
                let first = lowercase.next();
                self.lowercase = Some(lowercase);
                first
            }
            _ => Some(ch),
        }
    }
}

impl FusedIterator for DecodedChars<'_> {}
