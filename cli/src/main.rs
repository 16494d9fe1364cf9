use clap::{Parser, Subcommand};
use limelight_cli::commands;
use limelight_cli::logging;
use limelight_cli::readline;
use limelight_cli::CliContext;
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();
    let ctx = CliContext::new();

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "limelight overlay engine")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start every enabled overlay
    Start,
    /// Stop the running overlays
    Stop,
    Status,
    Config,
    /// Inject an alert locally (no server required)
    Alert {
        #[arg(short, long)]
        text: String,
        /// On-screen seconds (minimum 2)
        #[arg(short, long, default_value_t = 5)]
        duration: u64,
        #[arg(short, long, default_value = "/static/images/cat_hype.png")]
        image: String,
        #[arg(short, long, default_value = "/static/audio/alert.mp3")]
        audio: String,
    },
    /// Point the engine at a different server
    SetEndpoint {
        #[arg(long)]
        snapshot: Option<String>,
        #[arg(long)]
        push: Option<String>,
    },
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "limelight".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Start) => commands::start(ctx).await,
        Some(Commands::Stop) => commands::stop(ctx).await,
        Some(Commands::Status) => commands::status(ctx).await,
        Some(Commands::Config) => commands::show_config(ctx).await,
        Some(Commands::Alert {
            text,
            duration,
            image,
            audio,
        }) => commands::send_alert(ctx, text, *duration, image, audio).await,
        Some(Commands::SetEndpoint { snapshot, push }) => {
            commands::set_endpoint(ctx, snapshot.as_deref(), push.as_deref()).await
        }
        Some(Commands::Exit) => {
            commands::stop(ctx).await;
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
