use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use archiai_ai::GeminiClient;
use archiai_cli::{init_logging, render_plan, styles_table, write_output, LogTarget, OutputFormat};
use archiai_config::constants::ARCHIAI_LOG_FILE;
use archiai_config::Settings;
use archiai_plan::generate_plan;
use archiai_prompts::ArchitectureStyle;

#[derive(Parser)]
#[command(name = "archiai")]
#[command(about = "ArchiAI - architecture and PRD plans from a project description")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal user interface (default)
    Tui,
    /// Generate a plan without the interface and print or save it
    Generate {
        /// What the project should do
        description: String,

        /// Preferred architecture style (see `archiai styles`); omit for auto
        #[arg(long, short)]
        style: Option<ArchitectureStyle>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "markdown")]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List the architecture styles accepted by --style
    Styles,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match handle_command(cli.command.unwrap_or(Commands::Tui)).await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    let log_file = std::env::var(ARCHIAI_LOG_FILE).ok();

    match command {
        Commands::Tui => {
            init_logging(&LogTarget::for_mode(true, log_file))?;
            start_tui(Settings::from_env()?).await
        }
        Commands::Generate {
            description,
            style,
            format,
            output,
        } => {
            init_logging(&LogTarget::for_mode(false, log_file))?;
            run_generate(Settings::from_env()?, &description, style, format, output).await
        }
        Commands::Styles => {
            println!("{}", "Architecture styles".blue().bold());
            println!("{}", styles_table());
            Ok(())
        }
    }
}

async fn run_generate(
    settings: Settings,
    description: &str,
    style: Option<ArchitectureStyle>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let client = GeminiClient::from_settings(&settings)?;

    eprintln!(
        "{} {}",
        "Generating plan with".cyan(),
        client.model().bold()
    );

    let plan = generate_plan(&client, description, style)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let content = render_plan(&plan, format)?;
    write_output(&content, output.as_deref()).await?;

    if let Some(path) = output {
        eprintln!(
            "{} {}",
            "Saved plan to".green().bold(),
            path.display()
        );
    }
    Ok(())
}

async fn start_tui(settings: Settings) -> anyhow::Result<()> {
    use crossterm::{execute, terminal};

    let client = GeminiClient::from_settings(&settings)?;
    let mut app = archiai_tui::App::new(Arc::new(client), settings.model.clone());

    terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let result = app.run(&mut terminal).await;

    // Always restore the terminal, even if the app failed
    let cleanup_result = (|| -> anyhow::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    })();

    if let Err(cleanup_error) = cleanup_result {
        eprintln!("Terminal cleanup error: {}", cleanup_error);
    }

    result
}
