//! # Feeder CLI
//!
//! Drives the feeder configuration core from the command line: parse pasted
//! text, edit and validate saved form data, render and submit a page.

mod commands;
mod session;

use clap::{Parser, Subcommand, ValueEnum};
use feeder_core::config::runtime::LogLevel;
use feeder_core::config::LoggingPreferences;
use feeder_core::logging::{self, codes};
use feeder_core::log_info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "feeder", version, about = "Feeder configuration CLI")]
struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    json: bool,
    #[arg(short, long, global = true, help = "Log every event to stderr")]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Arguments shared by commands that work on saved form data
#[derive(clap::Args, Debug)]
struct PageArgs {
    #[arg(long, help = "Feeder schema (TOML)")]
    schema: PathBuf,
    #[arg(long, default_value = "feeder-data.json", help = "Saved form data (JSON)")]
    data: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a schema and report problems
    CheckSchema { schema: PathBuf },
    /// Parse pasted text without saving anything
    Parse {
        #[arg(long)]
        schema: PathBuf,
        #[arg(help = "Text file to parse; stdin when omitted")]
        input: Option<PathBuf>,
    },
    /// Parse pasted text and merge it into the saved data
    Apply {
        #[command(flatten)]
        page: PageArgs,
        input: Option<PathBuf>,
        #[arg(long, default_value_t = false, help = "Show the parsed values before applying")]
        preview: bool,
    },
    /// Set dimensions or machine-info fields as KEY=VALUE
    Edit {
        #[command(flatten)]
        page: PageArgs,
        #[arg(required = true)]
        assignments: Vec<String>,
    },
    /// Run a wizard gate against the saved data
    Validate {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long, value_enum, default_value_t = Gate::Ok)]
        gate: Gate,
    },
    /// Print the configuration summary
    Render {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long, default_value_t = false)]
        html: bool,
    },
    /// Clear the saved data for the page
    Clear {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Send the page to the outbox directory for delivery
    Submit {
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        contact: ContactArgs,
        #[arg(long = "attach")]
        attachments: Vec<PathBuf>,
        #[arg(long, default_value = "outbox")]
        outbox: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct ContactArgs {
    #[arg(long, default_value = "")]
    company: String,
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Gate {
    /// Dimensions only
    Next,
    /// Dimensions, then machine info
    Ok,
    /// List everything missing
    Report,
}

fn logging_preferences(verbose: bool) -> LoggingPreferences {
    let mut preferences = LoggingPreferences::default();
    if verbose {
        preferences.enable_console_logging = true;
        preferences.min_log_level = LogLevel::Debug;
    }
    preferences
}

fn init_logging(verbose: bool) -> Result<(), String> {
    logging::config::init_runtime_preferences(logging_preferences(verbose))
        .and_then(|()| logging::init_global_logging())
        .map_err(|e| {
            logging::safe_log_error(codes::system::INITIALIZATION_FAILURE, &e);
            e
        })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    log_info!("Feeder CLI starting");
    let json = cli.json;

    let succeeded = match cli.command {
        Commands::CheckSchema { schema } => commands::check_schema(&schema, json)?,
        Commands::Parse { schema, input } => commands::parse(&schema, input.as_deref(), json)?,
        Commands::Apply {
            page,
            input,
            preview,
        } => commands::apply(&page.schema, &page.data, input.as_deref(), preview, json)?,
        Commands::Edit { page, assignments } => {
            commands::edit(&page.schema, &page.data, &assignments)?
        }
        Commands::Validate { page, gate } => {
            commands::validate(&page.schema, &page.data, gate, json)?
        }
        Commands::Render { page, html } => commands::render(&page.schema, &page.data, html)?,
        Commands::Clear { page } => commands::clear(&page.schema, &page.data)?,
        Commands::Submit {
            page,
            contact,
            attachments,
            outbox,
        } => {
            let contact = feeder_wizard::ContactForm {
                company_name: contact.company,
                name: contact.name,
                email: contact.email,
                phone: contact.phone,
                message: contact.message,
            };
            commands::submit(
                &page.schema,
                &page.data,
                &contact,
                &attachments,
                &outbox,
                json,
            )?
        }
    };

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_submit_arguments() {
        let cli = Cli::try_parse_from([
            "feeder",
            "--json",
            "submit",
            "--schema",
            "bowl.toml",
            "--company",
            "Acme",
            "--attach",
            "a.pdf",
            "--attach",
            "b.png",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Submit {
                page,
                contact,
                attachments,
                outbox,
            } => {
                assert_eq!(page.data, PathBuf::from("feeder-data.json"));
                assert_eq!(contact.company, "Acme");
                assert_eq!(attachments.len(), 2);
                assert_eq!(outbox, PathBuf::from("outbox"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_verbose_logs_debug_to_console() {
        let cli = Cli::try_parse_from(["feeder", "-v", "check-schema", "bowl.toml"]).unwrap();
        assert!(cli.verbose);

        let preferences = logging_preferences(cli.verbose);
        assert!(preferences.enable_console_logging);
        assert_eq!(preferences.min_log_level, LogLevel::Debug);
    }

    #[test]
    fn test_gate_values() {
        let cli = Cli::try_parse_from([
            "feeder", "validate", "--schema", "bowl.toml", "--gate", "next",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Validate {
                gate: Gate::Next,
                ..
            }
        ));
    }
}
