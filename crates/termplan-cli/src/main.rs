mod check_cmd;
mod config;
mod parse_cmd;
mod report;
mod validate_cmd;

use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use termplan_core::ValidatorConfig;

use config::TermplanConfig;

#[derive(Parser)]
#[command(name = "termplan", about = "Course requisite parser and term plan validator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a requisite string and show the predicates it yields
    Parse {
        /// Raw requisite text, e.g. "Prereq: One of ECE 250, CS 240"
        text: String,
        /// Print the parse result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate one or more plan files
    Validate {
        /// Paths to plan TOML files
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Print reports as JSON
        #[arg(long)]
        json: bool,
        /// Override the overload threshold
        #[arg(long)]
        max_courses_per_term: Option<usize>,
    },
    /// Check whether a catalog course can be added to a term
    Check {
        /// Path to the plan TOML file
        file: PathBuf,
        /// Target term label (1A through 4B)
        #[arg(long)]
        term: String,
        /// Course code from the plan's [[courses]] list
        #[arg(long)]
        course: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Override the overload threshold
        #[arg(long)]
        max_courses_per_term: Option<usize>,
    },
    /// Write a termplan config file
    Init {
        /// Courses allowed per term before an overload warning
        #[arg(long, default_value_t = ValidatorConfig::DEFAULT_MAX_COURSES_PER_TERM)]
        max_courses_per_term: usize,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Execute the `termplan init` command: write config file.
fn cmd_init(max_courses_per_term: usize, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }
    ValidatorConfig::try_new(max_courses_per_term).context("invalid --max-courses-per-term")?;

    let cfg = config::ConfigFile {
        validation: config::ValidationSection {
            max_courses_per_term,
        },
    };
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  validation.max_courses_per_term = {max_courses_per_term}");

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let all_valid = match cli.command {
        Commands::Parse { text, json } => {
            parse_cmd::run_parse(&text, json)?;
            true
        }
        Commands::Validate {
            files,
            json,
            max_courses_per_term,
        } => {
            let resolved = TermplanConfig::resolve(max_courses_per_term)?;
            validate_cmd::run_validate(&files, resolved.validator, json).await?
        }
        Commands::Check {
            file,
            term,
            course,
            json,
            max_courses_per_term,
        } => {
            let resolved = TermplanConfig::resolve(max_courses_per_term)?;
            check_cmd::run_check(&file, &term, &course, resolved.validator, json).await?
        }
        Commands::Init {
            max_courses_per_term,
            force,
        } => {
            cmd_init(max_courses_per_term, force)?;
            true
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "termplan", &mut std::io::stdout());
            true
        }
    };

    if !all_valid {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod test_util {
    use std::sync::{Mutex, MutexGuard};

    // Serializes tests that modify environment variables.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    pub fn lock_env() -> MutexGuard<'static, ()> {
        ENV_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn validate_requires_a_file() {
        assert!(Cli::try_parse_from(["termplan", "validate"]).is_err());
    }

    #[test]
    fn check_parses_flags() {
        let cli = Cli::try_parse_from([
            "termplan",
            "check",
            "plan.toml",
            "--term",
            "2A",
            "--course",
            "ECE 250",
            "--max-courses-per-term",
            "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Check {
                term,
                course,
                max_courses_per_term,
                json,
                ..
            } => {
                assert_eq!(term, "2A");
                assert_eq!(course, "ECE 250");
                assert_eq!(max_courses_per_term, Some(5));
                assert!(!json);
            }
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn init_writes_config_once() {
        let _lock = test_util::lock_env();
        let tmp = tempfile::TempDir::new().unwrap();
        let orig_xdg = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", tmp.path()) };

        cmd_init(5, false).unwrap();
        let loaded = config::load_config().unwrap();
        let second = cmd_init(4, false);
        cmd_init(4, true).unwrap();
        let forced = config::load_config().unwrap();

        match orig_xdg {
            Some(x) => unsafe { std::env::set_var("XDG_CONFIG_HOME", x) },
            None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
        }

        assert_eq!(loaded.validation.max_courses_per_term, 5);
        assert!(second.is_err(), "second init without --force should fail");
        assert_eq!(forced.validation.max_courses_per_term, 4);
    }
}
