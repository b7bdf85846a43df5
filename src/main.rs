//! eduguide CLI: render Markdown and generate course guides.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use eduguide::config::DEFAULT_CONFIG_FILE;
use eduguide::guide::{POPULAR_TOPICS, export};
use eduguide::{Config, CourseOutline, ExportFormat, GeminiClient, GenerateError, Options};

#[derive(Debug, Parser)]
#[command(name = "eduguide", version, about = "Generate structured course guides with Gemini")]
struct Cli {
    /// Configuration file (defaults to ./eduguide.toml when present)
    #[arg(long, global = true, env = "EDUGUIDE_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a Markdown file (or stdin) to HTML
    Render {
        /// Input file, or `-` for stdin
        input: Option<PathBuf>,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave fenced code block content untouched by inline rules
        #[arg(long)]
        protect_code_blocks: bool,
    },

    /// Generate a course guide from an outline
    Generate {
        /// TOML outline file (title, target_audience, duration_scope, topics)
        #[arg(long)]
        outline: Option<PathBuf>,

        /// Course title
        #[arg(long)]
        title: Option<String>,

        /// Target audience
        #[arg(long)]
        audience: Option<String>,

        /// Duration or scope of the course
        #[arg(long)]
        duration: Option<String>,

        /// Topic to cover (repeatable; replaces the outline file's topics)
        #[arg(long = "topic")]
        topics: Vec<String>,

        /// Output format: html, text or json
        #[arg(long, default_value_t = ExportFormat::Html)]
        format: ExportFormat,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Model name, overriding the config file
        #[arg(long)]
        model: Option<String>,
    },

    /// List popular topic suggestions
    Topics,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(generate) = err.downcast_ref::<GenerateError>() {
                error!(error = %generate, "generation failed");
                eprintln!("Error: {}", generate.user_message());
            } else {
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "eduguide=info",
        1 => "eduguide=debug",
        _ => "eduguide=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Render {
            input,
            output,
            protect_code_blocks,
        } => {
            let markdown = read_input(input.as_deref())?;
            let options = Options {
                protect_code_blocks: protect_code_blocks || config.render.protect_code_blocks,
            };
            let html = eduguide::render_with_options(&markdown, &options);
            write_output(output.as_deref(), &html)
        }
        Command::Generate {
            outline,
            title,
            audience,
            duration,
            topics,
            format,
            output,
            model,
        } => {
            let mut outline = match outline {
                Some(path) => load_outline(&path)?,
                None => CourseOutline::new(),
            };
            if let Some(title) = title {
                outline.title = title;
            }
            if let Some(audience) = audience {
                outline.target_audience = audience;
            }
            if let Some(duration) = duration {
                outline.duration_scope = duration;
            }
            if !topics.is_empty() {
                outline.topics = topics;
            }
            outline.validate().map_err(GenerateError::InvalidOutline)?;

            let mut gemini = config.gemini_config()?;
            if let Some(model) = model {
                gemini.model = model;
            }
            debug!(config = ?gemini, "resolved client settings");

            let client = GeminiClient::new(gemini)?;
            let guide = client.generate_guide(&outline).await?;
            let rendered = export(&guide, format, &config.render)
                .context("failed to serialize guide")?;
            write_output(output.as_deref(), &rendered)
        }
        Command::Topics => {
            let mut stdout = io::stdout().lock();
            for topic in POPULAR_TOPICS {
                writeln!(stdout, "{topic}")?;
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                bail!("config file {} does not exist", path.display());
            }
            Ok(Config::load(path)?)
        }
        None => Ok(Config::load(Path::new(DEFAULT_CONFIG_FILE))?),
    }
}

fn load_outline(path: &Path) -> Result<CourseOutline> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read outline {}", path.display()))?;
    CourseOutline::from_toml_str(&content)
        .with_context(|| format!("failed to parse outline {}", path.display()))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
