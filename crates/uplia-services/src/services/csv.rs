//! Streaming CSV encoder for upload records.
//!
//! Transforms a lazy record stream into CSV byte chunks, header first, one
//! row per record. Encoding is pull-driven: a row is encoded only when the
//! consumer polls for the next chunk, so at most one encoded row is held in
//! memory at a time and the whole report never materializes.

use bytes::Bytes;
use futures::{stream, Stream, StreamExt};
use std::io;
use uplia_core::{AppError, Upload};

/// Column order of the generated report.
pub const CSV_COLUMNS: [&str; 4] = ["ID", "Name", "URL", "Uploaded at"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Encode a record stream as a stream of CSV chunks.
///
/// The header row is emitted first, even when `records` is empty. A failure
/// in the record stream is forwarded as a chunk-level error so the consuming
/// sink aborts the upload instead of truncating the file. Pure: consuming
/// the input stream is the only effect; restart by re-invoking with a fresh
/// record stream.
pub fn encode_csv<S>(records: S) -> impl Stream<Item = io::Result<Bytes>> + Send
where
    S: Stream<Item = Result<Upload, AppError>> + Send,
{
    let header = stream::once(async { encode_record(CSV_COLUMNS) });
    let rows = records.map(|record| match record {
        Ok(upload) => encode_record([
            upload.id.to_string(),
            upload.name,
            upload.remote_url,
            upload.created_at.format(TIMESTAMP_FORMAT).to_string(),
        ]),
        Err(err) => Err(io::Error::other(err)),
    });
    header.chain(rows)
}

/// Encode a single record into one newline-terminated chunk, quoting fields
/// that contain the delimiter, a quote or a newline (RFC 4180).
fn encode_record<I, T>(fields: I) -> io::Result<Bytes>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(fields).map_err(io::Error::other)?;
    let buf = writer
        .into_inner()
        .map_err(|e| io::Error::other(e.to_string()))?;
    Ok(Bytes::from(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn sample_upload(name: &str) -> Upload {
        Upload::new(name, format!("uploads/{}", name), format!("https://x/{}", name))
    }

    async fn collect(
        input: Vec<Result<Upload, AppError>>,
    ) -> Vec<io::Result<Bytes>> {
        encode_csv(stream::iter(input)).collect().await
    }

    #[tokio::test]
    async fn empty_stream_yields_header_only() {
        let chunks = collect(vec![]).await;
        assert_eq!(chunks.len(), 1);
        assert_eq!(
            chunks[0].as_ref().unwrap().as_ref(),
            b"ID,Name,URL,Uploaded at\n"
        );
    }

    #[tokio::test]
    async fn one_chunk_per_record_after_header() {
        let upload = sample_upload("a.jpg");
        let chunks = collect(vec![Ok(upload.clone())]).await;
        assert_eq!(chunks.len(), 2);

        let row = String::from_utf8(chunks[1].as_ref().unwrap().to_vec()).unwrap();
        let expected = format!(
            "{},a.jpg,https://x/a.jpg,{}\n",
            upload.id,
            upload.created_at.format(TIMESTAMP_FORMAT)
        );
        assert_eq!(row, expected);
    }

    #[tokio::test]
    async fn fields_with_metacharacters_are_quoted() {
        let mut upload = sample_upload("plain");
        upload.name = "we,ird \"name\"\nhere".to_string();
        let chunks = collect(vec![Ok(upload.clone())]).await;

        let row = String::from_utf8(chunks[1].as_ref().unwrap().to_vec()).unwrap();
        let expected_name = "\"we,ird \"\"name\"\"\nhere\"";
        assert!(row.contains(expected_name), "row was: {row}");
    }

    #[tokio::test]
    async fn record_error_surfaces_as_chunk_error() {
        let upload = sample_upload("ok.jpg");
        let chunks = collect(vec![
            Ok(upload),
            Err(AppError::Stream("cursor lost".to_string())),
        ])
        .await;

        assert_eq!(chunks.len(), 3);
        assert!(chunks[0].is_ok());
        assert!(chunks[1].is_ok());
        let err = chunks[2].as_ref().unwrap_err();
        assert!(err.to_string().contains("cursor lost"));
    }
}
