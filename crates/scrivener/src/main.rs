//! Scrivener command-line interface.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use scrivener_core::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json_logs)?;

    match cli.command {
        Commands::Serve(args) => cli::handle_serve_command(args).await?,
        Commands::Generate(args) => cli::handle_generate_command(cli.server, args).await?,
        Commands::History => cli::handle_history_command(cli.server, false).await?,
        Commands::Bookmarks => cli::handle_history_command(cli.server, true).await?,
        Commands::Show { id, export } => {
            cli::handle_show_command(cli.server, id, export).await?
        }
        Commands::Bookmark { id, off } => {
            cli::handle_bookmark_command(cli.server, id, !off).await?
        }
        Commands::Delete { id } => cli::handle_delete_command(cli.server, id).await?,
    }

    Ok(())
}
