use core::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum CommentKind {
    /// `G1 X10 ; comment`
    EndOfLine,
    /// `G1 (comment) X10`
    Inline,
    /// `G1 (comment`
    InlineUnterminated,
}

/// A comment found at the head of a line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Comment<'a> {
    raw: &'a str,
    kind: CommentKind,
}

impl<'a> Comment<'a> {
    /// Recognizes a comment at the very start of `line`.
    ///
    /// Returns the comment and the text following it. When `line` does not start with `;` or `(`
    /// there is no comment and the tail is `line` itself.
    pub fn try_parse(line: &'a str) -> (Option<Comment<'a>>, &'a str) {
        let kind = match line.as_bytes().first() {
            Some(b';') => CommentKind::EndOfLine,
            Some(b'(') => match line.find(')') {
                Some(end) => {
                    let (raw, tail) = line.split_at(end + 1);
                    let kind = CommentKind::Inline;
                    return (Some(Comment { raw, kind }), tail);
                }
                None => CommentKind::InlineUnterminated,
            },
            _ => return (None, line),
        };
        let (raw, tail) = line.split_at(line.len());
        (Some(Comment { raw, kind }), tail)
    }

    /// The comment including its delimiters.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn kind(&self) -> CommentKind {
        self.kind
    }

    /// The comment text without its delimiters.
    pub fn content(&self) -> &'a str {
        match self.kind {
            CommentKind::Inline => &self.raw[1..self.raw.len() - 1],
            CommentKind::EndOfLine | CommentKind::InlineUnterminated => &self.raw[1..],
        }
    }
}

impl fmt::Display for Comment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.content())
    }
}
