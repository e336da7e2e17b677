//! Incremental record sinks
//!
//! [`JsonArraySink`] frames records as a single top-level JSON array, one
//! object per line, written as records arrive. The array is only well formed
//! once [`RecordSink::close`] has run.

use crate::domain::{Record, Result};
use async_trait::async_trait;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

/// Destination for exported records
#[async_trait]
pub trait RecordSink: Send {
    /// Appends one record
    async fn write_record(&mut self, record: &Record) -> Result<()>;

    /// Finalizes framing and flushes; further writes are an error
    async fn close(&mut self) -> Result<()>;
}

/// Streams records into a JSON array
pub struct JsonArraySink<W> {
    writer: W,
    written: usize,
    closed: bool,
}

impl<W> JsonArraySink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            written: 0,
            closed: false,
        }
    }

    /// Records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Returns the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonArraySink<BufWriter<File>> {
    /// Creates (or truncates) `path` and streams into it
    pub async fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path.as_ref()).await?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

#[async_trait]
impl<W> RecordSink for JsonArraySink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn write_record(&mut self, record: &Record) -> Result<()> {
        if self.closed {
            return Err(crate::domain::CognitoBackupError::Export(
                "write after sink was closed".to_string(),
            ));
        }

        let separator: &[u8] = if self.written == 0 { b"[\n" } else { b",\n" };
        let body = serde_json::to_vec(record)?;

        self.writer.write_all(separator).await?;
        self.writer.write_all(&body).await?;
        self.written += 1;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let trailer: &[u8] = if self.written == 0 { b"[]\n" } else { b"\n]\n" };
        self.writer.write_all(trailer).await?;
        self.writer.flush().await?;
        Ok(())
    }
}
