use core::{fmt, iter::FusedIterator};

use log::trace;

use crate::{
    parser::{Comment, Field},
    settings::ParsingSettings,
    types::Code,
    utils::trim_whitespace_start,
    Error,
};

/// A line starting with a dispatchable `<word><number>[.<subcode>]` code.
///
/// Only the code is decoded up front. The fields that follow are re-scanned on each lookup.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Command<'a> {
    code: Code,
    fields: &'a str,
    settings: ParsingSettings,
}

impl<'a> Command<'a> {
    /// Parses a line, skipping one leading comment. `None` if the line does not start with a
    /// code.
    pub fn try_parse(line: &'a str, settings: &ParsingSettings) -> Option<Command<'a>> {
        let (_, rest) = Comment::try_parse(trim_whitespace_start(line));
        let rest = trim_whitespace_start(rest);

        let (field, fields) = Field::try_parse(rest, settings);
        let Some(field) = field else {
            trace!("no command in {:?}", line);
            return None;
        };

        let code = field.code_argument();
        if !code.is_valid() {
            trace!("{:?} is not a command code", field.raw());
            return None;
        }

        Some(Command {
            code,
            fields: trim_whitespace_start(fields),
            settings: *settings,
        })
    }

    pub fn code(&self) -> Code {
        self.code
    }

    /// Returns `'G'` for `G1 X0 Y0`.
    pub fn word(&self) -> char {
        self.code.word()
    }

    /// Returns `1` for `G1 X0 Y0`.
    pub fn number(&self) -> u16 {
        self.code.number()
    }

    /// Returns `42` for `M1.42 A0`.
    pub fn subcode(&self) -> u8 {
        self.code.subcode()
    }

    /// The text following the code, leading whitespace removed.
    pub fn raw_fields(&self) -> &'a str {
        self.fields
    }

    pub fn settings(&self) -> &ParsingSettings {
        &self.settings
    }

    /// Iterates the fields after the code, left to right. Stops at the first text that is not a
    /// field, such as a comment.
    pub fn fields(&self) -> Fields<'a> {
        Fields {
            tail: self.fields,
            settings: self.settings,
            done: false,
        }
    }

    /// The first field with the given word. The word is normalized like parsed words are.
    pub fn try_get_field(&self, word: char) -> Option<Field<'a>> {
        let word = self.settings.case_normalization().apply(word);
        self.fields().find(|field| field.word() == word)
    }

    /// The field with the given word, or `default` parsed as a field when the command has none.
    ///
    /// `default` must hold exactly one field with the requested word: `get_optional_field('Z',
    /// "Z42")`. Anything else is reported as an error.
    pub fn get_optional_field(&self, word: char, default: &'a str) -> Result<Field<'a>, Error> {
        if let Some(field) = self.try_get_field(word) {
            return Ok(field);
        }

        let word = self.settings.case_normalization().apply(word);
        match Field::try_parse(default, &self.settings) {
            (Some(field), "") if field.word() == word => Ok(field),
            (Some(field), tail) if field.word() == word => Err(Error::DefaultFieldTail(tail.len())),
            _ => Err(Error::DefaultFieldWord(word)),
        }
    }

    /// The integral part of the field's argument, or `default` when the command has no such
    /// field. A field without a numeric argument is an error.
    pub fn get_int_field_or_default(&self, word: char, default: i32) -> Result<i32, Error> {
        self.try_get_field(word)
            .map_or(Ok(default), |field| field.int_argument())
    }

    /// Like [`get_int_field_or_default`](Command::get_int_field_or_default) for scaled
    /// integers. `default` is taken as already scaled.
    pub fn get_scaled_int_field_or_default(&self, word: char, default: i32) -> Result<i32, Error> {
        self.try_get_field(word)
            .map_or(Ok(default), |field| field.scaled_int_argument())
    }
}

impl fmt::Display for Command<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)?;
        if !self.fields.is_empty() {
            write!(f, " {}", self.fields)?;
        }
        Ok(())
    }
}

/// Lazy iterator over the fields of a [`Command`].
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    tail: &'a str,
    settings: ParsingSettings,
    done: bool,
}

impl<'a> Fields<'a> {
    /// The text not consumed yet. Once the iterator is exhausted, this is what stopped it.
    pub fn remainder(&self) -> &'a str {
        self.tail
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = Field<'a>;

    fn next(&mut self) -> Option<Field<'a>> {
        if self.done {
            return None;
        }
        self.tail = trim_whitespace_start(self.tail);
        let (field, tail) = Field::try_parse(self.tail, &self.settings);
        self.tail = tail;
        self.done = field.is_none();
        field
    }
}

impl FusedIterator for Fields<'_> {}
