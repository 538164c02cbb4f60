//! Framing of the Skydesk line protocol.
//!
//! A client opens a connection, sends one request line and reads frames until
//! the server closes the connection. Each frame is the reply text followed by
//! a single NUL byte. Chat broadcasts reach a waiting client as extra frames
//! ahead of its own reply.

use std::io::{self, BufRead, BufReader, Read, Write};

/// Size of the request buffer; longer request lines are truncated.
pub const BUFFER_SIZE: usize = 256;

/// Terminates every reply frame.
pub const FRAME_TERMINATOR: u8 = 0;

/// Read one request line of at most [`BUFFER_SIZE`] bytes.
///
/// The line ends at `\n`, at a NUL byte, at end of stream, or when the buffer
/// is full. Trailing `\r` and surrounding whitespace are removed and invalid
/// UTF-8 is replaced rather than rejected. A peer that closes without sending
/// anything yields an empty string.
pub fn read_request<R: Read>(reader: R) -> io::Result<String> {
    let mut reader = BufReader::new(reader.take(BUFFER_SIZE as u64));
    let mut raw = Vec::with_capacity(BUFFER_SIZE);

    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            break;
        }

        if let Some(end) = available
            .iter()
            .position(|byte| *byte == b'\n' || *byte == FRAME_TERMINATOR)
        {
            raw.extend_from_slice(&available[..end]);
            break;
        }

        let consumed = available.len();
        raw.extend_from_slice(available);
        reader.consume(consumed);
    }

    Ok(String::from_utf8_lossy(&raw).trim().to_string())
}

/// Write one reply frame and flush it.
pub fn write_frame<W: Write>(mut writer: W, text: &str) -> io::Result<()> {
    writer.write_all(text.as_bytes())?;
    writer.write_all(&[FRAME_TERMINATOR])?;
    writer.flush()
}

/// Write one request line and flush it.
pub fn write_request<W: Write>(mut writer: W, line: &str) -> io::Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Read every frame until the peer closes the connection.
///
/// Bytes after the last terminator (a frame cut short by the peer) are
/// returned as a final frame.
pub fn read_frames<R: Read>(mut reader: R) -> io::Result<Vec<String>> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;

    let mut frames: Vec<String> = raw
        .split(|byte| *byte == FRAME_TERMINATOR)
        .map(|frame| String::from_utf8_lossy(frame).into_owned())
        .collect();

    // `split` yields an empty tail after a trailing terminator
    if frames.last().is_some_and(|frame| frame.is_empty()) {
        frames.pop();
    }

    Ok(frames)
}
