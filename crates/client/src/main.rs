//! Interactive terminal assistant over the code-assistant MCP server.
//!
//! Spawns the server binary as a child process and loops a menu of project
//! workflows; model requests go to the Anthropic Messages API.

use anyhow::Result;
use clap::Parser;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

mod ai;
mod prompts;
mod session;
mod workflows;

use ai::ModelClient;
use workflows::{Assistant, DocstringOutcome};

#[derive(Parser)]
#[command(name = "code-assistant")]
#[command(about = "Project assistant over the code-assistant MCP tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Server binary to spawn (a path, or a name resolved on PATH)
    #[arg(long, default_value = "code-assistant-mcp")]
    server: String,

    /// Project directory to work on (prompted for when omitted)
    #[arg(long)]
    project: Option<String>,

    /// Anthropic model id
    #[arg(long, default_value = "claude-3-5-sonnet-20241022")]
    model: String,

    /// Upper bound on files analyzed for a project report
    #[arg(long, default_value_t = 5)]
    max_files: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

const MENU: &[&str] = &[
    "Analyze project",
    "Suggest improvements for a file",
    "Update docstrings in a file",
    "Generate a new file",
    "Quit",
];

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let model = ModelClient::from_env(cli.model.as_str())?;
    let assistant = Assistant::connect(&cli.server, model, cli.max_files).await?;

    let tools = assistant.tool_names().await?;
    println!(
        "Connected to {} ({} tools available)",
        style(&cli.server).green(),
        tools.len()
    );
    println!("{}", style(tools.join(", ")).dim());

    let project = match cli.project {
        Some(project) => project,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Project directory")
            .interact_text()?,
    };

    loop {
        println!();
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Code Assistant")
            .items(MENU)
            .default(0)
            .interact()?;

        let outcome = match choice {
            0 => run_report(&assistant, &project).await,
            1 => run_improve(&assistant).await,
            2 => run_docstrings(&assistant).await,
            3 => run_generate(&assistant, &project).await,
            _ => break,
        };
        if let Err(err) = outcome {
            println!("{} {err:#}", style("error:").red().bold());
        }
    }

    assistant.shutdown().await?;
    Ok(())
}

async fn run_report(assistant: &Assistant, project: &str) -> Result<()> {
    println!("Analyzing project, this can take a moment...");
    let report = assistant.analyze_project(project).await?;
    println!("\n{}", style("=== Project report ===").cyan().bold());
    println!("{report}");
    Ok(())
}

async fn run_improve(assistant: &Assistant) -> Result<()> {
    let file_path: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("File to improve")
        .interact_text()?;
    println!("Analyzing the file...");
    let suggestions = assistant.improve_file(&file_path).await?;
    println!(
        "\n{}",
        style("=== Improvement suggestions ===").cyan().bold()
    );
    println!("{suggestions}");
    Ok(())
}

async fn run_docstrings(assistant: &Assistant) -> Result<()> {
    let file_path: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("File to document")
        .interact_text()?;
    println!("Updating docstrings...");
    match assistant.update_docstrings(&file_path).await? {
        DocstringOutcome::AlreadyDocumented => {
            println!("Every declaration already has a docstring.");
        }
        DocstringOutcome::NothingGenerated => {
            println!("No docstring could be generated for this file.");
        }
        DocstringOutcome::Updated { items } => {
            println!("Documented {} declarations:", items.len());
            for item in items {
                println!("  - {}", item.name);
            }
        }
    }
    Ok(())
}

async fn run_generate(assistant: &Assistant, project: &str) -> Result<()> {
    let relative_path: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("New file path (relative to the project)")
        .interact_text()?;
    let description: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("What should it do?")
        .interact_text()?;
    println!("Generating the file...");
    let generated = assistant
        .generate_file(project, &relative_path, &description)
        .await?;
    println!(
        "Created {} ({})",
        style(&generated.path).green(),
        generated.language
    );
    Ok(())
}
