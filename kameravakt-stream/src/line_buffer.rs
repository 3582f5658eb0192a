//! Splits an unbounded byte stream into newline-terminated lines.

use bytes::BytesMut;

/// Accumulates response-body chunks and yields complete lines.
///
/// Lines are delimited by `\n`; trailing `\r` bytes are trimmed. Bytes
/// after the last newline stay buffered until more of the stream
/// arrives.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: BytesMut,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk of the response body.
    pub fn extend(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Pops the next complete line, without its delimiter.
    pub fn next_line(&mut self) -> Option<String> {
        let newline = self.buf.iter().position(|&b| b == b'\n')?;
        let line = self.buf.split_to(newline + 1);
        Some(
            String::from_utf8_lossy(&line[..newline])
                .trim_end_matches('\r')
                .to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(buf: &mut LineBuffer) -> Vec<String> {
        std::iter::from_fn(|| buf.next_line()).collect()
    }

    #[test]
    fn splits_lines_and_trims_carriage_returns() {
        let mut buf = LineBuffer::new();
        buf.extend(b"<eventType>motion</eventType>\r\n<eventState>active</eventState>\n");
        assert_eq!(
            drain(&mut buf),
            vec![
                "<eventType>motion</eventType>",
                "<eventState>active</eventState>",
            ]
        );
    }

    #[test]
    fn holds_partial_lines_across_chunks() {
        let mut buf = LineBuffer::new();
        buf.extend(b"<eventTy");
        assert!(buf.next_line().is_none());
        buf.extend(b"pe>motion</eventType>\npartial");
        assert_eq!(drain(&mut buf), vec!["<eventType>motion</eventType>"]);
        buf.extend(b" tail\n");
        assert_eq!(drain(&mut buf), vec!["partial tail"]);
    }

    #[test]
    fn empty_lines_are_preserved_as_empty_strings() {
        let mut buf = LineBuffer::new();
        buf.extend(b"\n\r\nx\n");
        assert_eq!(drain(&mut buf), vec!["", "", "x"]);
    }
}
