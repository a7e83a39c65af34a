//! The ebnf representation of a line following [https://bottlecaps.de/rr/ui]'s syntax.
//! Whitespace is spaces and tabs, line terminators are expected to be stripped already.
//! ```ebnf
//! line         ::= ws* comment? ws* command?
//! comment      ::= ';' .* | '(' [^)]* ')'? /* unterminated comments run to the end of line */
//! command      ::= [a-zA-Z] ws* [0-9]+ ( ws* '.' ws* [0-9]+ )? ( ws* field )* .*
//! field        ::= ( [a-zA-Z] | '*' ) ws* argument?
//! argument     ::= real_number | string
//! real_number  ::= ( ( '+' | '-' ) ws* )? ( [0-9]+ ( ws* '.' ( ws* [0-9]+ )? )? | '.' ws* [0-9]+ )
//! string       ::= '"' ( [^"] | '""' | "'" . )* '"'?   /* "'" only escapes when enabled */
//! ws           ::= [ \t]
//! ```
//!
//! Each recognizer takes a line and returns what it found together with the rest of the line, so
//! that the recognized text followed by the rest is always the line it was given.
mod command;
mod comment;
mod field;
mod values;

pub use command::{Command, Fields};
pub use comment::{Comment, CommentKind};
pub use field::{ArgumentKind, DecodedChars, Field, StringArgument};
