//! Fixed-buffer byte transfer between a reader and a writer.

use std::io::{self, ErrorKind, Read, Write};

/// Size of the chunk buffer used by every transfer loop.
pub const BUFFER_SIZE: usize = 8192;

/// Which side of a transfer failed.
#[derive(Debug)]
pub enum TransferError {
    /// Reading from the source failed.
    Read(io::Error),
    /// Writing to the destination failed.
    Write(io::Error),
}

/// Copy everything from `reader` into `writer` in [`BUFFER_SIZE`] chunks.
///
/// The loop ends when a read returns `0`. Interrupted reads are retried.
/// The writer is not flushed; that is left to the caller.
///
/// Returns the number of bytes transferred.
///
/// # Errors
///
/// Returns [`TransferError::Read`] or [`TransferError::Write`] for the first
/// failing call. Bytes already written stay written.
pub fn pump<R, W>(reader: &mut R, writer: &mut W) -> Result<u64, TransferError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buffer = [0u8; BUFFER_SIZE];
    let mut total = 0u64;

    loop {
        let length = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(length) => length,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(TransferError::Read(e)),
        };

        writer
            .write_all(&buffer[..length])
            .map_err(TransferError::Write)?;
        total += length as u64;
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out at most `chunk` bytes per read and fails with `Interrupted`
    /// every other call.
    struct Stuttering<'a> {
        data: &'a [u8],
        chunk: usize,
        interrupt: bool,
    }

    impl Read for Stuttering<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::from(ErrorKind::Interrupted));
            }
            let n = self.chunk.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::from(ErrorKind::PermissionDenied))
        }
    }

    #[test]
    fn test_pump_across_buffer_boundaries() {
        for len in [0, 1, BUFFER_SIZE - 1, BUFFER_SIZE, BUFFER_SIZE * 2 + 17] {
            let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
            let mut out = Vec::new();

            let copied = pump(&mut data.as_slice(), &mut out).unwrap();

            assert_eq!(copied, len as u64);
            assert_eq!(out, data);
        }
    }

    #[test]
    fn test_pump_retries_interrupted_and_short_reads() {
        let data = b"short reads still get through".to_vec();
        let mut reader = Stuttering {
            data: &data,
            chunk: 3,
            interrupt: false,
        };
        let mut out = Vec::new();

        let copied = pump(&mut reader, &mut out).unwrap();

        assert_eq!(copied, data.len() as u64);
        assert_eq!(out, data);
    }

    #[test]
    fn test_pump_reports_failing_side() {
        let mut out = Vec::new();
        assert!(matches!(
            pump(&mut FailingReader, &mut out),
            Err(TransferError::Read(_))
        ));

        assert!(matches!(
            pump(&mut &b"data"[..], &mut FailingWriter),
            Err(TransferError::Write(_))
        ));
    }
}
