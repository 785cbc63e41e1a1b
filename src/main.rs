// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, LevelFilter, Level, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use xlifflow::app_config::{self, Config, TranslationProvider};
use xlifflow::app_controller::Controller;
use xlifflow::batching::SplitStrategy;
use xlifflow::providers::mock::MockProvider;
use xlifflow::workspace::Workspace;

/// CLI provider choice; `mock` answers locally without any network access
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliProvider {
    #[value(name = "openai")]
    OpenAI,
    Anthropic,
    Mock,
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum GlossaryCommand {
    /// Print the translation of a term
    Lookup {
        term: String,
    },
    /// Print every term
    List,
    /// Add or replace a term
    Set {
        term: String,
        translation: String,
    },
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the workspace folders and an empty glossary
    Init,

    /// Create a new project
    New {
        project: String,
    },

    /// Split a source document into batch files
    Split {
        project: String,

        /// File name in the project's source/ folder, or a path to import
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Segments per batch
        #[arg(short, long)]
        batch_size: Option<usize>,

        /// Spread segments evenly across batches
        #[arg(long)]
        balanced: bool,

        /// Also extract units that already have a translation
        #[arg(long)]
        all: bool,
    },

    /// Print an agent task for one batch as JSON
    Task {
        project: String,
        batch: u32,
    },

    /// Translate batches directly through a provider, one at a time
    Translate {
        project: String,

        /// Batch numbers to (re)translate; defaults to batches without output
        #[arg(short, long, value_delimiter = ',', num_args = 1..)]
        batches: Option<Vec<u32>>,

        /// Translation provider to use
        #[arg(short, long, value_enum)]
        provider: Option<CliProvider>,

        /// Model name to use for translation
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Merge translated batches into final/
    Merge {
        project: String,
    },

    /// Show a project's progress
    Status {
        project: String,
    },

    /// List projects
    Projects,

    /// Inspect or edit the shared glossary
    Glossary {
        #[command(subcommand)]
        command: GlossaryCommand,
    },

    /// Generate shell completions for xlifflow
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// xlifflow - batch translation workflow for XLIFF documents
///
/// Splits bilingual documents into batches, hands them to translators or an
/// AI provider, and merges the results back into the original structure.
#[derive(Parser, Debug)]
#[command(name = "xlifflow")]
#[command(version)]
#[command(about = "Split, translate and merge XLIFF documents in batches")]
#[command(long_about = "xlifflow splits a source document into numbered batch files, lets \
translators (people, agents or an AI provider) fill in output files, and merges them back.

EXAMPLES:
    xlifflow init                                  # Create projects/, tools/ and glossary/
    xlifflow new manual                            # Create a project
    xlifflow split manual ~/docs/manual.sdlxliff   # Import and split a source document
    xlifflow task manual 2                         # Print an agent task for batch 2
    xlifflow translate manual -p openai            # Translate pending batches directly
    xlifflow merge manual                          # Write final/manual.zh-CN.sdlxliff
    xlifflow completions bash > xlifflow.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in <workspace>/conf.json by default. If the config file
    doesn't exist, a default one will be created automatically. API keys may also be
    given through the XLIFFLOW_API_KEY environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Workspace root directory
    #[arg(short, long, global = true, default_value = ".", env = "XLIFFLOW_WORKSPACE")]
    workspace: PathBuf,

    /// Configuration file path (defaults to <workspace>/conf.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Prefix and ANSI colour for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("ERROR", "1;31"),
            Level::Warn => ("WARN ", "1;33"),
            Level::Info => ("INFO ", "1;32"),
            Level::Debug => ("DEBUG", "1;36"),
            Level::Trace => ("TRACE", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level() && metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (prefix, colour) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", colour, now, prefix, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    // Start permissive; the effective level is narrowed once the config is known
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();
    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: CommandLineOptions) -> Result<()> {
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "xlifflow", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(level) = cli.log_level {
        log::set_max_level(app_config::LogLevel::from(level).to_level_filter());
    }

    let workspace = Workspace::new(&cli.workspace);
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| workspace.root().join("conf.json"));
    let mut config = Config::load_or_create(&config_path)?;

    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    // Command-line overrides for the commands that take them
    let mut use_mock = false;
    match &cli.command {
        Commands::Split {
            batch_size,
            balanced,
            all,
            ..
        } => {
            if let Some(size) = batch_size {
                config.split.batch_size = *size;
            }
            if *balanced {
                config.split.strategy = SplitStrategy::Balanced;
            }
            if *all {
                config.split.extract_all = true;
            }
        }
        Commands::Translate { provider, model, .. } => {
            match provider {
                Some(CliProvider::OpenAI) => config.translation.provider = TranslationProvider::OpenAI,
                Some(CliProvider::Anthropic) => config.translation.provider = TranslationProvider::Anthropic,
                Some(CliProvider::Mock) => use_mock = true,
                None => {}
            }
            if let Some(model) = model {
                config.translation.active_provider_config_mut().model = model.clone();
            }
        }
        _ => {}
    }

    let controller = Controller::with_config(config, workspace);

    match cli.command {
        Commands::Init => {
            controller.init()?;
        }
        Commands::New { project } => {
            let project = controller.new_project(&project)?;
            println!("{}", project.root().display());
        }
        Commands::Split { project, source, .. } => {
            let manifest = controller.split(&project, &source)?;
            println!(
                "{} segment(s) -> {} batch(es): {}",
                manifest.total_segments,
                manifest.total_batches,
                manifest.batch_files.join(", ")
            );
        }
        Commands::Task { project, batch } => {
            let task = controller.task(&project, batch)?;
            let json = serde_json::to_string_pretty(&task).context("Failed to serialize task")?;
            println!("{}", json);
        }
        Commands::Translate { project, batches, .. } => {
            let selection = batches.as_deref();
            let summary = if use_mock {
                controller
                    .translate_with_provider(&project, selection, Box::new(MockProvider::working()))
                    .await?
            } else {
                controller.translate(&project, selection).await?
            };

            if !summary.is_success() {
                let failed: Vec<String> = summary.failed.iter().map(|(n, _)| n.to_string()).collect();
                return Err(anyhow!("Translation failed for batch(es): {}", failed.join(", ")));
            }
            info!("All selected batches translated");
        }
        Commands::Merge { project } => {
            let report = controller.merge(&project)?;
            if report.untranslated > 0 {
                println!(
                    "Merged {} segment(s), {} left untranslated -> {}",
                    report.merged,
                    report.untranslated,
                    report.output_path.display()
                );
            } else {
                println!("Merged {} segment(s) -> {}", report.merged, report.output_path.display());
            }
        }
        Commands::Status { project } => {
            print!("{}", controller.status(&project)?);
        }
        Commands::Projects => {
            for name in controller.projects()? {
                println!("{}", name);
            }
        }
        Commands::Glossary { command } => match command {
            GlossaryCommand::Lookup { term } => match controller.glossary_lookup(&term)? {
                Some(translation) => println!("{}", translation),
                None => println!("not found"),
            },
            GlossaryCommand::List => {
                for (term, translation) in controller.glossary()?.iter() {
                    println!("{} -> {}", term, translation);
                }
            }
            GlossaryCommand::Set { term, translation } => {
                if let Some(previous) = controller.glossary_set(&term, &translation)? {
                    info!("Replaced {:?} (was {:?})", term, previous);
                }
            }
        },
        Commands::Completions { .. } => {}
    }

    Ok(())
}
