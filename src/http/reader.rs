//! Line reading over a buffered byte stream.
//!
//! Lines are pulled from the same `AsyncBufRead` that later serves the body, so
//! nothing past the current line is consumed.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::error::{Error, Result};

/// Longest line accepted, terminator included.
pub const MAX_LINE_LEN: usize = 64 * 1024;

/// Reads one line and strips its `\n` or `\r\n` terminator.
///
/// Returns `None` at end of stream. A last line without a terminator is
/// returned as-is. Bytes are decoded one character each (ISO-8859-1), so
/// arbitrary octets never fail to decode.
///
/// At most [`MAX_LINE_LEN`] bytes are buffered; a longer line fails with
/// [`Error::LineTooLong`] and the stream is left mid-line.
pub async fn read_line<R>(reader: &mut R) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let n = (&mut *reader)
        .take(MAX_LINE_LEN as u64 + 1)
        .read_until(b'\n', &mut buf)
        .await?;

    if n == 0 {
        return Ok(None);
    }

    if buf.len() > MAX_LINE_LEN {
        return Err(Error::LineTooLong {
            limit: MAX_LINE_LEN,
        });
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }

    Ok(Some(buf.iter().map(|&b| b as char).collect()))
}
