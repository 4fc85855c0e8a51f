use clap::{Parser, Subcommand};
use online_test_client::{
    commands::{login, result, test},
    config::{get_config, init_config},
    models::score::QueryKind,
    ui::prompt::{InputLines, Prompt, Redirect, TerminalPrompt},
    AppState,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "online-test", about = "Take the online system administration test")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and remember the identity for later commands
    Login { username: String },
    /// Forget the stored identity
    Logout,
    /// Start a test and answer it interactively
    Start,
    /// Show a result card
    Result {
        #[arg(long, default_value_t = QueryKind::Best)]
        query: QueryKind,
    },
    /// Show every recorded result
    Statistics,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("online_test_client=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    init_config()?;
    let state = AppState::new(get_config()?.clone())?;
    info!("Using backend at {}", state.api_client.base_url());

    let input = InputLines::from_stdin();
    let prompt = Arc::new(TerminalPrompt::new(input.clone()));

    match cli.command {
        Command::Login { username } => match login::login(&state, &username).await {
            Ok((_, message)) => println!("{}", message),
            Err(e) => prompt.alert(&e.alert_message()),
        },
        Command::Logout => {
            login::logout(&state).await?;
            println!("Logged out");
        }
        Command::Start => {
            let redirect = test::run_test_screen(&state, prompt.clone(), input).await?;
            match redirect {
                Some(Redirect::Result(kind)) => show_result(&state, prompt.as_ref(), kind).await,
                Some(target) => println!("-> {}", target.path()),
                None => {}
            }
        }
        Command::Result { query } => show_result(&state, prompt.as_ref(), query).await,
        Command::Statistics => {
            if let Some(table) = result::statistics_view(&state, prompt.as_ref()).await {
                println!("{}", table);
            }
            print_redirect(prompt.as_ref());
        }
    }

    Ok(())
}

async fn show_result(state: &AppState, prompt: &TerminalPrompt, kind: QueryKind) {
    if let Some(card) = result::result_view(state, prompt, kind).await {
        println!("{}", card);
    }
    print_redirect(prompt);
}

fn print_redirect(prompt: &TerminalPrompt) {
    if let Some(target) = prompt.pending_redirect() {
        println!("-> {}", target.path());
    }
}
