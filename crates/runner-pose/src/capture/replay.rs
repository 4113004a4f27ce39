//! Recorded landmark frames, one JSON document per line

use crate::error::CaptureError;
use crate::landmarks::LandmarkFrame;
use crate::traits::LandmarkSource;
use crate::Result;
use anyhow::Context;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Plays back a recording. Each line holds a `LandmarkFrame` or `null`
/// for a tick where no pose was detected; end of input yields no frames.
pub struct ReplaySource<R: BufRead> {
    reader: R,
    line: usize,
    buf: String,
    released: bool,
}

impl ReplaySource<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open landmark recording: {:?}", path.as_ref()))?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
            released: false,
        }
    }

    /// Lines consumed so far
    pub fn position(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> LandmarkSource for ReplaySource<R> {
    fn poll_frame(&mut self) -> std::result::Result<Option<LandmarkFrame>, CaptureError> {
        if self.released {
            return Err(CaptureError::Released);
        }

        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;

        let text = self.buf.trim();
        if text.is_empty() {
            return Ok(None);
        }
        serde_json::from_str::<Option<LandmarkFrame>>(text).map_err(|source| {
            CaptureError::Malformed {
                line: self.line,
                source,
            }
        })
    }

    fn release(&mut self) -> std::result::Result<(), CaptureError> {
        self.released = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::BodyPoint;
    use std::io::Cursor;

    #[test]
    fn test_replay_lines() {
        let data = concat!(
            r#"{"width":640.0,"height":480.0,"points":{"nose":{"x":320.0,"y":100.0}}}"#,
            "\n",
            "null\n",
            "\n",
            "{broken\n",
        );
        let mut source = ReplaySource::from_reader(Cursor::new(data));

        let first = source.poll_frame().unwrap().unwrap();
        assert_eq!(first.get(BodyPoint::Nose).map(|p| p.y), Some(100.0));
        assert!(source.poll_frame().unwrap().is_none());
        assert!(source.poll_frame().unwrap().is_none());
        assert!(matches!(source.poll_frame(), Err(CaptureError::Malformed { line: 4, .. })));

        // Exhausted
        assert!(source.poll_frame().unwrap().is_none());
        assert_eq!(source.position(), 4);

        source.release().unwrap();
        assert!(matches!(source.poll_frame(), Err(CaptureError::Released)));
    }

    #[test]
    fn test_open_missing_file() {
        let err = ReplaySource::open("/nonexistent/recording.jsonl").err().unwrap();
        assert!(err.to_string().contains("Failed to open landmark recording"));
    }
}
