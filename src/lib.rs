//! This crate implements a zero-copy gcode line decoder.
//!
//! Lines are decoded into comments, fields and commands that borrow the caller's buffer. Nothing
//! on the parsing path allocates, so the decoder runs as-is on `no_std` motion controllers. What a
//! command *means* is left to the caller (motion planning, stepper execution, ...).
//!
//! ```
//! use gcode_view::{Code, Command, ParsingSettings};
//!
//! let settings = ParsingSettings::default().with_fractional_scale(3)?;
//! let command = Command::try_parse("G1 X10.5 Y-2", &settings).expect("a command");
//!
//! assert_eq!(command.code(), Code::G1_LINEAR_MOVE);
//! assert_eq!(command.get_scaled_int_field_or_default('X', 0)?, 10_500);
//! assert_eq!(command.get_scaled_int_field_or_default('Z', 0)?, 0);
//! # Ok::<(), gcode_view::Error>(())
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod settings;
mod types;
mod utils;

mod parser;

#[cfg(feature = "alloc")]
pub mod stream;

pub use parser::{
    ArgumentKind, Command, Comment, CommentKind, DecodedChars, Field, Fields, StringArgument,
};
pub use settings::{CaseNormalization, ParsingSettings, MAX_FRACTIONAL_SCALE};
pub use types::{Code, Decimal};

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum Error {
    /// The fractional scale of [`ParsingSettings`] is outside `0..=5`.
    #[error("fractional scale must be within 0..=5, got {0}")]
    InvalidScale(u8),
    /// The field does not carry an argument of the requested family.
    #[error("{0} argument missing")]
    ArgumentMissing(&'static str),
    #[error("scaled integer is too big")]
    ScaledIntegerOverflow,
    #[error("bad number format")]
    BadNumberFormat,
    /// The default field literal does not describe a field with the requested word.
    #[error("default field representation must start from '{0}'")]
    DefaultFieldWord(char),
    /// The default field literal has unparsed text left after the field.
    #[error("unexpected tail of {0} byte(s) after default field parsing")]
    DefaultFieldTail(usize),
    #[error("line is not valid utf-8")]
    InvalidUTF8String,
}
