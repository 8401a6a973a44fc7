/// Maximum bytes buffered for a single reply frame.
pub const MAX_FRAME_BYTES: usize = 1024 * 1024;

/// Result of feeding bytes into the framer.
#[derive(Debug, PartialEq)]
pub enum FeedOutcome {
    /// A newline was observed; the whole buffer, trimmed, is the frame.
    FrameReady(String),
    /// No newline yet, keep reading.
    Incomplete,
    /// The buffer exceeded [`MAX_FRAME_BYTES`] without a newline.
    Overflow(usize),
}

/// Accumulates inbound bytes until a newline marks the reply complete.
///
/// The reply is exactly one line. Once any newline is present the entire
/// accumulated buffer, trimmed of surrounding whitespace, becomes the
/// candidate frame; bytes after the newline are not kept for a next frame
/// since each connection serves exactly one request.
#[derive(Debug, Default)]
pub struct LineFramer {
    buffer: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of inbound bytes, in arrival order.
    pub fn feed(&mut self, bytes: &[u8]) -> FeedOutcome {
        self.buffer.extend_from_slice(bytes);
        if self.buffer.contains(&b'\n') {
            let text = String::from_utf8_lossy(&self.buffer);
            FeedOutcome::FrameReady(text.trim().to_string())
        } else if self.buffer.len() > MAX_FRAME_BYTES {
            FeedOutcome::Overflow(self.buffer.len())
        } else {
            FeedOutcome::Incomplete
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_line_in_one_chunk() {
        let mut framer = LineFramer::new();
        assert_eq!(
            framer.feed(b"{\"a\":1}\n"),
            FeedOutcome::FrameReady("{\"a\":1}".to_string())
        );
    }

    #[test]
    fn byte_by_byte_yields_the_same_frame() {
        let mut framer = LineFramer::new();
        let input = b"{\"a\":1}\n";
        for byte in &input[..input.len() - 1] {
            assert_eq!(framer.feed(&[*byte]), FeedOutcome::Incomplete);
        }
        assert_eq!(
            framer.feed(&[input[input.len() - 1]]),
            FeedOutcome::FrameReady("{\"a\":1}".to_string())
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let mut framer = LineFramer::new();
        assert_eq!(
            framer.feed(b"  {\"a\":1}\r\n"),
            FeedOutcome::FrameReady("{\"a\":1}".to_string())
        );
    }

    #[test]
    fn trailing_bytes_in_the_same_chunk_stay_in_the_frame() {
        // One-shot connections: everything buffered when the first newline
        // shows up is handed to the decoder as-is.
        let mut framer = LineFramer::new();
        assert_eq!(
            framer.feed(b"{\"a\":1}\n{\"b\":2}"),
            FeedOutcome::FrameReady("{\"a\":1}\n{\"b\":2}".to_string())
        );
    }

    #[test]
    fn multibyte_utf8_split_across_chunks_survives() {
        let mut framer = LineFramer::new();
        let line = "{\"msg\":\"héllo\"}\n".as_bytes();
        let (head, tail) = line.split_at(9);
        assert_eq!(framer.feed(head), FeedOutcome::Incomplete);
        assert_eq!(
            framer.feed(tail),
            FeedOutcome::FrameReady("{\"msg\":\"héllo\"}".to_string())
        );
    }

    #[test]
    fn oversized_buffer_without_newline_overflows() {
        let mut framer = LineFramer::new();
        let chunk = vec![b'x'; MAX_FRAME_BYTES + 1];
        assert!(matches!(framer.feed(&chunk), FeedOutcome::Overflow(_)));
    }
}
