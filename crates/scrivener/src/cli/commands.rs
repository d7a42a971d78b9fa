//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};
use scrivener_client::ExportFormat;
use std::net::SocketAddr;
use uuid::Uuid;

/// Streaming AI writing assistant.
#[derive(Parser, Debug)]
#[command(name = "scrivener")]
#[command(about = "Scrivener - streaming AI writing assistant")]
#[command(version)]
pub struct Cli {
    /// Scrivener server URL (defaults to scrivener.toml, then http://localhost:3000)
    #[arg(long, global = true, env = "SCRIVENER_SERVER_URL")]
    pub server: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Stream a generation to stdout
    Generate(GenerateArgs),

    /// List saved generations, newest first
    History,

    /// List bookmarked generations, newest first
    Bookmarks,

    /// Print a saved generation in full
    Show {
        /// Generation id
        id: Uuid,

        /// Also write the output to <mode>-<unix-ms>.txt
        #[arg(long)]
        export: bool,
    },

    /// Bookmark a saved generation
    Bookmark {
        /// Generation id
        id: Uuid,

        /// Remove the bookmark instead
        #[arg(long)]
        off: bool,
    },

    /// Delete a saved generation
    Delete {
        /// Generation id
        id: Uuid,
    },
}

/// Arguments for `serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Listen address (overrides SCRIVENER_BIND_ADDR)
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// PostgreSQL URL (overrides DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Arguments for `generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Writing mode: email, blog-post, social-media, code-comments,
    /// product-description (anything else means email)
    #[arg(short, long, default_value = "email")]
    pub mode: String,

    /// Save the result
    #[arg(long)]
    pub save: bool,

    /// Save and bookmark the result
    #[arg(long)]
    pub bookmark: bool,

    /// Write the result to generated-content.<md|txt>
    #[arg(long, value_name = "md|txt")]
    pub export: Option<ExportFormat>,

    /// What to write about
    #[arg(required = true, num_args = 1..)]
    pub prompt: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_args() {
        let cli = Cli::try_parse_from([
            "scrivener",
            "generate",
            "--mode",
            "blog-post",
            "--export",
            "md",
            "--bookmark",
            "Why",
            "tea",
        ])
        .unwrap();

        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.mode, "blog-post");
        assert_eq!(args.export, Some(ExportFormat::Markdown));
        assert!(args.bookmark);
        assert!(!args.save);
        assert_eq!(args.prompt.join(" "), "Why tea");
    }

    #[test]
    fn test_generate_requires_prompt() {
        assert!(Cli::try_parse_from(["scrivener", "generate"]).is_err());
    }

    #[test]
    fn test_bookmark_off() {
        let id = Uuid::new_v4();
        let cli = Cli::try_parse_from(["scrivener", "bookmark", &id.to_string(), "--off"]).unwrap();
        assert!(matches!(cli.command, Commands::Bookmark { id: parsed, off: true } if parsed == id));
    }

    #[test]
    fn test_show_with_export() {
        let id = Uuid::new_v4();
        let cli =
            Cli::try_parse_from(["scrivener", "show", &id.to_string(), "--export"]).unwrap();
        assert!(matches!(cli.command, Commands::Show { id: parsed, export: true } if parsed == id));

        let cli = Cli::try_parse_from(["scrivener", "show", &id.to_string()]).unwrap();
        assert!(matches!(cli.command, Commands::Show { export: false, .. }));
        assert!(Cli::try_parse_from(["scrivener", "show", "not-a-uuid"]).is_err());
    }
}
