//! Splits an asynchronous byte stream into lines the parser can borrow.
use alloc::vec::Vec;

use futures::stream::{Stream, StreamExt};
use log::{debug, trace};

use crate::Error;

const DEFAULT_CAPACITY: usize = 256;

/// Reads lines terminated by `\n`, `\r` or `\r\n` out of a byte stream.
///
/// A single buffer is reused for every line, the returned `&str` is only valid until the next
/// call. The end of the input always terminates a last line, which is empty when the input ends
/// with a terminator.
///
/// ```
/// use futures::stream;
/// use gcode_view::stream::LineReader;
///
/// let mut reader = LineReader::new(stream::iter(b"G1 X1\r\nG1 X2".iter().copied()));
/// futures_executor::block_on(async {
///     assert_eq!(reader.next_line().await, Some(Ok("G1 X1")));
///     assert_eq!(reader.next_line().await, Some(Ok("G1 X2")));
///     assert_eq!(reader.next_line().await, None);
/// });
/// ```
#[derive(Debug)]
pub struct LineReader<S> {
    input: S,
    buffer: Vec<u8>,
    skip_line_feed: bool,
    finished: bool,
}

impl<S> LineReader<S>
where
    S: Stream<Item = u8> + Unpin,
{
    pub fn new(input: S) -> Self {
        Self::with_capacity(input, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(input: S, capacity: usize) -> Self {
        Self {
            input,
            buffer: Vec::with_capacity(capacity),
            skip_line_feed: false,
            finished: false,
        }
    }

    /// Reads the next line, without its terminator.
    ///
    /// A line that is not valid utf-8 is reported as an error and skipped, reading can go on
    /// with the next one.
    pub async fn next_line(&mut self) -> Option<Result<&str, Error>> {
        if self.finished {
            return None;
        }

        self.buffer.clear();
        loop {
            match self.input.next().await {
                // second half of "\r\n"
                Some(b'\n') if self.skip_line_feed => self.skip_line_feed = false,
                Some(b @ (b'\r' | b'\n')) => {
                    self.skip_line_feed = b == b'\r';
                    break;
                }
                Some(b) => {
                    self.skip_line_feed = false;
                    self.buffer.push(b);
                }
                None => {
                    debug!("end of input");
                    self.finished = true;
                    break;
                }
            }
        }

        match core::str::from_utf8(&self.buffer) {
            Ok(line) => {
                trace!("line {:?}", line);
                Some(Ok(line))
            }
            Err(e) => {
                debug!("dropping line: {}", e);
                Some(Err(Error::InvalidUTF8String))
            }
        }
    }

    pub fn into_inner(self) -> S {
        self.input
    }
}
