use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use taskgroups::config::Config;
use taskgroups::core::{Locale, Specification};
use taskgroups::log::LogLevel;
use taskgroups::registry::{Registry, TaskGroupSource};
use taskgroups::tempfiles::TempFileWriter;
use taskgroups::{filter_by_type_and_locale, tglog, tglog_error, Error, QueueResolver, Result};

/// Resolve locale-aware task group queues from a registry
#[derive(Parser, Debug)]
#[command(name = "taskgroups")]
#[command(version, about, long_about = None)]
#[command(
    after_help = "ENVIRONMENT:\n    TASKGROUPS_DEBUG=1     Enable debug logging (alternative to --debug)"
)]
pub struct Cli {
    /// Enable debug logging (writes to ~/.taskgroups/taskgroups.log)
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Override the log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Resolve capability types, in order, into a queue
    Resolve {
        /// Capability types in pipeline order
        #[arg(required = true)]
        types: Vec<String>,

        /// Registry file (defaults to the configured registry)
        #[arg(long, short = 'r')]
        registry: Option<PathBuf>,

        /// Locale tag (defaults to the configured locale)
        #[arg(long, short = 'l')]
        locale: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Exit non-zero if any capability is unresolved
        #[arg(long)]
        strict: bool,

        /// Copy the registry into the debug temp folder
        #[arg(long)]
        capture: bool,
    },

    /// Show the candidate chosen for each capability type
    Candidates {
        /// Registry file (defaults to the configured registry)
        #[arg(long, short = 'r')]
        registry: Option<PathBuf>,

        /// Locale tag (defaults to the configured locale)
        #[arg(long, short = 'l')]
        locale: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    taskgroups::log::init_with_debug(cli.debug);
    if let Some(level) = cli.log_level {
        taskgroups::log::set_level(level);
    }

    let result = match cli.command {
        Command::Resolve {
            types,
            registry,
            locale,
            json,
            strict,
            capture,
        } => run_resolve(types, registry, locale, json, strict, capture),
        Command::Candidates {
            registry,
            locale,
            json,
        } => run_candidates(registry, locale, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tglog_error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse_log_level(s: &str) -> std::result::Result<LogLevel, String> {
    LogLevel::parse(s).ok_or_else(|| {
        format!(
            "unknown log level '{}' (expected error, warn, info, debug or trace)",
            s
        )
    })
}

/// Registry path and locale from the command line, falling back to config.
fn inputs(
    config: &Config,
    registry: Option<PathBuf>,
    locale: Option<String>,
) -> Result<(PathBuf, Locale)> {
    let registry = registry.or_else(|| config.registry_path()).ok_or_else(|| {
        Error::InvalidArgument("no registry given and none configured".to_string())
    })?;
    let locale = match locale {
        Some(tag) => tag.parse()?,
        None => config.locale.clone().ok_or_else(|| {
            Error::InvalidArgument("no locale given and none configured".to_string())
        })?,
    };
    Ok((registry, locale))
}

fn run_resolve(
    types: Vec<String>,
    registry: Option<PathBuf>,
    locale: Option<String>,
    json: bool,
    strict: bool,
    capture: bool,
) -> Result<ExitCode> {
    let config = Config::load()?;
    let (registry_path, locale) = inputs(&config, registry, locale)?;
    let registry = Registry::load(&registry_path)?;

    let specs = Specification::list(&types);

    if !capture {
        return print_queue(&registry, &specs, &locale, json, strict);
    }

    // Dropping the writer removes the capture unless keep_temp_files is set.
    let mut writer = config.temp_file_writer()?;
    let path = writer.write_temp_file(&registry_path, "registry")?;
    println!("Captured registry: {}", path.display());
    print_queue(&registry, &specs, &locale, json, strict)
}

fn print_queue(
    registry: &Registry,
    specs: &[Specification],
    locale: &Locale,
    json: bool,
    strict: bool,
) -> Result<ExitCode> {
    let queue = QueueResolver::new(&registry.descriptors(), specs, locale).resolve();
    tglog!(
        "Resolved {} specifications for locale {} ({} unresolved)",
        queue.len(),
        locale,
        queue.unresolved().count()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&queue)?);
    } else {
        println!("Queue (locale {}):", queue.locale());
        for (i, entry) in queue.iter().enumerate() {
            println!("  {:>3}. {:<16} {}", i + 1, entry.spec, entry.resolution);
        }
    }

    if strict {
        if let Err(e) = queue.require_complete() {
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_candidates(
    registry: Option<PathBuf>,
    locale: Option<String>,
    json: bool,
) -> Result<ExitCode> {
    let config = Config::load()?;
    let (registry_path, locale) = inputs(&config, registry, locale)?;
    let registry = Registry::load(&registry_path)?;
    let candidates = filter_by_type_and_locale(&registry.descriptors(), &locale);

    if json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("Candidates (locale {}):", candidates.locale());
    if candidates.is_empty() {
        println!("  (none)");
    }
    for (capability, entry) in candidates.entries() {
        if let Some(chosen) = entry.chosen() {
            println!(
                "  {:<16} {:<24} [{}]",
                capability,
                chosen.name,
                entry.precedence()
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}
