//! History and bookmark command handlers.

use super::server_url;
use scrivener_client::{StoreClient, export_record};
use scrivener_core::GenerationRecord;
use scrivener_error::{ScrivenerResult, TransportError, TransportErrorKind};
use uuid::Uuid;

const PREVIEW_CHARS: usize = 80;

fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > PREVIEW_CHARS || text.lines().nth(1).is_some() {
        let cut: String = line.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        line.to_string()
    }
}

fn print_record(record: &GenerationRecord) {
    let marker = if record.is_bookmarked() { "*" } else { " " };
    println!(
        "{} {}  {}  {:<19}  ~{} tokens",
        marker,
        record.id(),
        record.created_at().format("%Y-%m-%d %H:%M"),
        record.mode(),
        record.tokens_used()
    );
    println!("    {}", preview(record.prompt()));
}

/// Handle the `history` and `bookmarks` commands
pub async fn handle_history_command(
    server: Option<String>,
    bookmarked_only: bool,
) -> ScrivenerResult<()> {
    let client = StoreClient::new(server_url(server)?)?;
    let records = client.list(bookmarked_only).await?;

    if records.is_empty() {
        if bookmarked_only {
            println!("No bookmarks yet");
        } else {
            println!("No saved generations yet");
        }
        return Ok(());
    }

    for record in &records {
        print_record(record);
    }
    Ok(())
}

fn render_full(record: &GenerationRecord) -> String {
    format!(
        "{}  {}  ~{} tokens{}\nPrompt: {}\n\n{}",
        record.mode(),
        record.created_at().format("%Y-%m-%d %H:%M"),
        record.tokens_used(),
        if record.is_bookmarked() { "  (bookmarked)" } else { "" },
        record.prompt(),
        record.output()
    )
}

/// Handle the `show` command
pub async fn handle_show_command(
    server: Option<String>,
    id: Uuid,
    export: bool,
) -> ScrivenerResult<()> {
    let client = StoreClient::new(server_url(server)?)?;
    let record = client.find(id).await?.ok_or_else(|| {
        TransportError::new(TransportErrorKind::Status {
            status_code: 404,
            body: format!("Generation {} not found", id),
        })
    })?;

    println!("{}", render_full(&record));

    if export {
        let dir = std::env::current_dir().map_err(|e| {
            TransportError::new(TransportErrorKind::Io(e.to_string()))
        })?;
        let path = export_record(&record, &dir).await?;
        eprintln!("Exported to {}", path.display());
    }
    Ok(())
}

/// Handle the `bookmark` command
pub async fn handle_bookmark_command(
    server: Option<String>,
    id: Uuid,
    is_bookmarked: bool,
) -> ScrivenerResult<()> {
    let client = StoreClient::new(server_url(server)?)?;
    let record = client.set_bookmark(id, is_bookmarked).await?;
    print_record(&record);
    Ok(())
}

/// Handle the `delete` command
pub async fn handle_delete_command(server: Option<String>, id: Uuid) -> ScrivenerResult<()> {
    let client = StoreClient::new(server_url(server)?)?;
    client.delete(id).await?;
    println!("Deleted {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_long_and_multiline_text() {
        assert_eq!(preview("short"), "short");
        assert_eq!(preview("first\nsecond"), "first...");
        let long = "x".repeat(100);
        assert_eq!(preview(&long), format!("{}...", "x".repeat(80)));
    }

    #[test]
    fn test_full_render_keeps_every_output_line() {
        let record = GenerationRecord::builder()
            .mode("blog-post")
            .prompt("Why tea")
            .output("Tea is calm.\nTea is warm.")
            .tokens_used(12)
            .is_bookmarked(true)
            .build()
            .unwrap();

        let text = render_full(&record);
        assert!(text.starts_with("blog-post  "));
        assert!(text.contains("~12 tokens  (bookmarked)"));
        assert!(text.contains("Prompt: Why tea"));
        assert!(text.ends_with("Tea is calm.\nTea is warm."));
    }
}
