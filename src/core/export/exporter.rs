//! Paginated exporter
//!
//! Follows a cursor-paginated listing to the end, optionally enriching every
//! record with a secondary lookup, and streams each record to a sink as soon
//! as it is ready. Nothing beyond one page is held in memory.

use super::sink::RecordSink;
use super::summary::ExportSummary;
use crate::domain::{CognitoBackupError, Page, PageCursor, Record, Result};
use crate::log_page_fetched;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde_json::{Map, Value};
use std::time::Instant;

/// Default number of enrichment calls in flight within a page
pub const DEFAULT_EXPORT_CONCURRENCY: usize = 5;

/// One cursor-paginated listing
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the page at `cursor`; `None` is the first page
    async fn fetch_page(&self, cursor: Option<PageCursor>) -> Result<Page>;
}

/// Secondary per-record lookup merged into the exported record
#[async_trait]
pub trait RecordEnricher: Send + Sync {
    /// Returns the supplemental fields for `record`
    async fn enrich(&self, record: &Record) -> Result<Map<String, Value>>;
}

/// Exporter tuning
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// Enrichment calls allowed in flight within one page
    pub concurrency: usize,
}

impl ExportOptions {
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new(DEFAULT_EXPORT_CONCURRENCY)
    }
}

/// Drives a [`PageSource`] into a [`RecordSink`]
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    options: ExportOptions,
}

impl Exporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Exports every record reachable from the first page
    ///
    /// Any listing or enrichment failure aborts the export. The sink is closed
    /// on both the success and the failure path; on failure a close error is
    /// logged and the original error returned.
    pub async fn export<S>(
        &self,
        source: &dyn PageSource,
        enricher: Option<&dyn RecordEnricher>,
        sink: &mut S,
    ) -> Result<ExportSummary>
    where
        S: RecordSink + ?Sized,
    {
        let start = Instant::now();
        let outcome = self.drain(source, enricher, sink).await;
        let closed = sink.close().await;

        match outcome {
            Ok(summary) => {
                closed?;
                Ok(summary.with_duration(start.elapsed()))
            }
            Err(e) => {
                if let Err(close_err) = closed {
                    tracing::warn!(error = %close_err, "Failed to close sink after export error");
                }
                Err(e)
            }
        }
    }

    async fn drain<S>(
        &self,
        source: &dyn PageSource,
        enricher: Option<&dyn RecordEnricher>,
        sink: &mut S,
    ) -> Result<ExportSummary>
    where
        S: RecordSink + ?Sized,
    {
        let mut summary = ExportSummary::new();
        let mut cursor: Option<PageCursor> = None;

        loop {
            let Page {
                records,
                next_cursor,
            } = source.fetch_page(cursor.take()).await?;
            summary.pages += 1;
            log_page_fetched!(summary.pages, records.len(), next_cursor.is_some());

            match enricher {
                None => {
                    for record in records {
                        sink.write_record(&record).await?;
                        summary.records += 1;
                    }
                }
                Some(enricher) => {
                    let mut enriched = stream::iter(records)
                        .map(|mut record| async move {
                            let fields = enricher.enrich(&record).await?;
                            record.merge(fields);
                            Ok::<Record, CognitoBackupError>(record)
                        })
                        .buffer_unordered(self.options.concurrency);

                    while let Some(record) = enriched.next().await {
                        sink.write_record(&record?).await?;
                        summary.records += 1;
                    }
                }
            }

            match next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::sink::JsonArraySink;
    use serde_json::json;

    struct TwoPages;

    #[async_trait]
    impl PageSource for TwoPages {
        async fn fetch_page(&self, cursor: Option<PageCursor>) -> Result<Page> {
            let rec = |n: &str| Record::try_from(json!({ "Username": n })).unwrap();
            Ok(match cursor.as_ref().map(PageCursor::as_str) {
                None => Page::new(vec![rec("a"), rec("b")], Some(PageCursor::new("next"))),
                Some("next") => Page::last(vec![rec("c")]),
                Some(other) => panic!("unexpected cursor {other}"),
            })
        }
    }

    struct Tagger;

    #[async_trait]
    impl RecordEnricher for Tagger {
        async fn enrich(&self, record: &Record) -> Result<Map<String, Value>> {
            let mut fields = Map::new();
            fields.insert(
                "Tag".to_string(),
                json!(format!("tag-{}", record.display_key())),
            );
            Ok(fields)
        }
    }

    #[tokio::test]
    async fn test_export_without_enrichment() {
        let mut sink = JsonArraySink::new(Vec::new());
        let summary = Exporter::default()
            .export(&TwoPages, None, &mut sink)
            .await
            .unwrap();

        assert_eq!(summary.pages, 2);
        assert_eq!(summary.records, 3);

        let out: Vec<Record> = serde_json::from_slice(&sink.into_inner()).unwrap();
        let names: Vec<_> = out.iter().filter_map(Record::username).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_export_merges_enrichment() {
        let mut sink = JsonArraySink::new(Vec::new());
        Exporter::new(ExportOptions::new(2))
            .export(&TwoPages, Some(&Tagger), &mut sink)
            .await
            .unwrap();

        let out: Vec<Record> = serde_json::from_slice(&sink.into_inner()).unwrap();
        assert_eq!(out.len(), 3);
        assert!(out
            .iter()
            .all(|r| r.get_str("Tag") == Some(format!("tag-{}", r.display_key()).as_str())));
    }

    #[test]
    fn test_options_clamp_zero() {
        assert_eq!(ExportOptions::new(0).concurrency, 1);
        assert_eq!(ExportOptions::default().concurrency, DEFAULT_EXPORT_CONCURRENCY);
    }
}
