//! Writing outputs to disk.

use scrivener_core::GenerationRecord;
use scrivener_error::{TransportError, TransportErrorKind};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Export file format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString,
)]
pub enum ExportFormat {
    /// `generated-content.md`
    #[default]
    #[strum(serialize = "md", serialize = "markdown")]
    Markdown,
    /// `generated-content.txt`
    #[strum(serialize = "txt", serialize = "text")]
    Text,
}

impl ExportFormat {
    /// Default file name for this format.
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "generated-content.md",
            ExportFormat::Text => "generated-content.txt",
        }
    }
}

/// Write `output` into `dir` under the format's file name.
///
/// Returns `None` without touching the filesystem when `output` is empty.
#[instrument(skip(output), fields(len = output.len()))]
pub(crate) async fn export_output(
    output: &str,
    format: ExportFormat,
    dir: &Path,
) -> Result<Option<PathBuf>, TransportError> {
    if output.is_empty() {
        return Ok(None);
    }

    let path = dir.join(format.file_name());
    write_file(&path, output).await?;
    Ok(Some(path))
}

/// File name for an exported record: `<mode>-<unix-ms>.txt`.
pub fn record_file_name(mode: &str, unix_ms: i64) -> String {
    format!("{}-{}.txt", mode, unix_ms)
}

/// Write a stored record's output into `dir` as plain text, named after its
/// mode and the export time.
#[instrument(skip(record), fields(id = %record.id(), mode = %record.mode()))]
pub async fn export_record(
    record: &GenerationRecord,
    dir: &Path,
) -> Result<PathBuf, TransportError> {
    let name = record_file_name(record.mode(), chrono::Utc::now().timestamp_millis());
    let path = dir.join(name);
    write_file(&path, record.output()).await?;
    Ok(path)
}

async fn write_file(path: &Path, contents: &str) -> Result<(), TransportError> {
    tokio::fs::write(path, contents).await.map_err(|e| {
        TransportError::new(TransportErrorKind::Io(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;

    info!(path = %path.display(), "Output exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_parsing() {
        assert_eq!(ExportFormat::from_str("md").unwrap(), ExportFormat::Markdown);
        assert_eq!(ExportFormat::from_str("txt").unwrap(), ExportFormat::Text);
        assert!(ExportFormat::from_str("pdf").is_err());
    }

    #[tokio::test]
    async fn test_export_writes_file() {
        let dir = std::env::temp_dir().join(format!("scrivener-export-{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await.unwrap();

        let path = export_output("Hello", ExportFormat::Text, &dir)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(path.file_name().unwrap(), "generated-content.txt");
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "Hello");

        assert!(
            export_output("", ExportFormat::Markdown, &dir)
                .await
                .unwrap()
                .is_none()
        );
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[test]
    fn test_record_file_name() {
        assert_eq!(
            record_file_name("blog-post", 1_700_000_000_123),
            "blog-post-1700000000123.txt"
        );
    }

    #[tokio::test]
    async fn test_export_record_writes_full_output() {
        let dir = std::env::temp_dir().join(format!("scrivener-record-{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await.unwrap();

        let record = GenerationRecord::builder()
            .mode("social-media")
            .prompt("Launch day")
            .output("We shipped!\nThanks, everyone.")
            .tokens_used(9)
            .build()
            .unwrap();
        let before = chrono::Utc::now().timestamp_millis();
        let path = export_record(&record, &dir).await.unwrap();

        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        let stamp: i64 = name
            .strip_prefix("social-media-")
            .and_then(|rest| rest.strip_suffix(".txt"))
            .unwrap()
            .parse()
            .unwrap();
        assert!(stamp >= before);
        assert_eq!(
            tokio::fs::read_to_string(&path).await.unwrap(),
            "We shipped!\nThanks, everyone."
        );
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
