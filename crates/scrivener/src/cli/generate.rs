//! `generate` command handler.

use super::{GenerateArgs, server_url};
use scrivener_client::{RunStatus, Workbench};
use scrivener_core::WritingMode;
use scrivener_error::{ScrivenerResult, TransportError, TransportErrorKind};
use std::io::Write;
use tracing::{info, warn};

/// Write one fragment and flush so it shows up immediately.
fn write_fragment(out: &mut impl Write, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}

/// Handle the `generate` command
///
/// Fragments go to stdout as they arrive; statistics and status go to stderr.
pub async fn handle_generate_command(
    server: Option<String>,
    args: GenerateArgs,
) -> ScrivenerResult<()> {
    let server = server_url(server)?;
    let workbench = Workbench::connect(&server)?;
    workbench
        .set_mode(WritingMode::from_identifier(&args.mode))
        .await;

    let prompt = args.prompt.join(" ");
    let run = workbench
        .generate(&prompt, |text| {
            if let Err(e) = write_fragment(&mut std::io::stdout().lock(), text) {
                warn!(error = %e, len = text.len(), "Failed to write fragment to stdout");
            }
        })
        .await?;
    println!();

    eprintln!("{}", run.stats());
    eprintln!("Session total: ~{} tokens", workbench.session_tokens().await);

    if *run.status() == RunStatus::Failed {
        let error = run
            .error()
            .clone()
            .unwrap_or_else(|| TransportError::new(TransportErrorKind::AbnormalClose(String::new())));
        eprintln!("Generation failed; partial output kept above");
        return Err(error.into());
    }

    if args.save || args.bookmark {
        if let Some(record) = workbench.save().await? {
            eprintln!("Saved {}", record.id());
        }
    }
    if args.bookmark {
        let bookmarked = workbench.toggle_bookmark().await?;
        eprintln!("Bookmarked: {}", bookmarked);
    }

    if let Some(format) = args.export {
        let dir = std::env::current_dir().map_err(|e| {
            TransportError::new(TransportErrorKind::Io(e.to_string()))
        })?;
        if let Some(path) = workbench.export(format, &dir).await? {
            eprintln!("Exported to {}", path.display());
        }
    }

    info!(status = %run.status(), "Generate command finished");
    Ok(())
}
