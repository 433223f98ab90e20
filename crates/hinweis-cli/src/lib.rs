// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod case_source;
mod commands;
mod deadline_commands;
mod helpers;
mod logging;
mod policy_commands;

use case_source::JsonFileCaseSource;
use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Generator, Shell};
use commands::{PolicyCommand, SurfaceCli};
use deadline_commands::{WatchOptions, WindowSelection};
use hinweis_core::{ExitCode, MachineError};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;
use std::time::Duration;

const HINWEIS_HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
Usage: {usage}

Options:
{options}

Commands:
{subcommands}
{after-help}";

#[derive(Parser)]
#[command(name = "hinweis")]
#[command(version)]
#[command(about = "Deadline traffic lights for whistleblower cases")]
#[command(help_template = HINWEIS_HELP_TEMPLATE)]
#[command(
    after_help = "Environment:\n  HINWEIS_POLICY_PATH   Deadline policy file\n  HINWEIS_LOG_LEVEL     Log verbosity override\n  HINWEIS_LOG_JSON      Emit logs as JSON lines"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[arg(long, global = true, default_value_t = false)]
    trace: bool,
    /// Policy file, overriding every other lookup location.
    #[arg(long, global = true)]
    policy: Option<PathBuf>,
    /// Evaluate as of this instant instead of the wall clock.
    #[arg(long, global = true)]
    now: Option<String>,
    #[arg(long = "print-config-paths", default_value_t = false)]
    print_config_paths: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Traffic-light status for every case in a case file.
    Evaluate {
        #[arg(long)]
        cases: PathBuf,
        #[arg(long, value_enum)]
        surface: Option<SurfaceCli>,
        #[arg(long)]
        window_days: Option<u32>,
    },
    /// Dashboard tile counts.
    Summary {
        #[arg(long)]
        cases: PathBuf,
        #[arg(long, value_enum)]
        surface: Option<SurfaceCli>,
    },
    /// German label for a signed day count.
    Label {
        #[arg(long, allow_negative_numbers = true)]
        days: i64,
    },
    /// Lifecycle steps reachable from a case status.
    Transitions {
        #[arg(long)]
        status: String,
    },
    Policy {
        #[command(subcommand)]
        command: PolicyCommand,
    },
    /// Periodically re-read the case file and print fresh counts.
    Watch {
        #[arg(long)]
        cases: PathBuf,
        #[arg(long, value_enum)]
        surface: Option<SurfaceCli>,
        #[arg(long)]
        interval_secs: Option<u64>,
        #[arg(long)]
        max_refreshes: Option<u64>,
    },
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
    Version,
}

pub fn main_entry() -> ProcessExitCode {
    let wants_json = std::env::args().any(|arg| arg == "--json");
    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success.code()),
        Err(err) => {
            emit_error(&err, wants_json);
            ProcessExitCode::from(err.exit_code.code())
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            _ => {
                return Err(CliError {
                    exit_code: ExitCode::Usage,
                    machine: MachineError::new("usage_error", "invalid command line arguments")
                        .with_detail("error", &err.to_string()),
                });
            }
        },
    };
    let output_mode = OutputMode { json: cli.json };
    logging::init_tracing(LogFlags {
        quiet: cli.quiet,
        verbose: cli.verbose,
        trace: cli.trace,
    });
    if cli.print_config_paths {
        return helpers::emit_ok(output_mode, helpers::config_paths_payload())
            .map_err(CliError::internal);
    }

    let command = cli.command.ok_or_else(|| CliError {
        exit_code: ExitCode::Usage,
        machine: MachineError::new("usage_error", "missing command; see --help"),
    })?;
    let context = RunContext {
        policy_flag: cli.policy,
        now_flag: cli.now,
    };

    match command {
        Commands::Evaluate {
            cases,
            surface,
            window_days,
        } => {
            let (policy, clock) = context.policy_and_clock()?;
            let selection =
                WindowSelection::resolve(&policy, surface.map(Into::into), window_days);
            deadline_commands::run_evaluate(
                &JsonFileCaseSource::new(cases),
                &policy,
                clock.as_ref(),
                selection,
                output_mode,
            )
        }
        Commands::Summary { cases, surface } => {
            let (policy, clock) = context.policy_and_clock()?;
            let selection = WindowSelection::resolve(&policy, surface.map(Into::into), None);
            deadline_commands::run_summary(
                &JsonFileCaseSource::new(cases),
                &policy,
                clock.as_ref(),
                selection,
                output_mode,
            )
        }
        Commands::Label { days } => deadline_commands::run_label(days, output_mode),
        Commands::Transitions { status } => {
            deadline_commands::run_transitions(&status, output_mode)
        }
        Commands::Policy { command } => match command {
            PolicyCommand::Validate { path } => {
                let path = path.or(context.policy_flag);
                policy_commands::run_validate(path.as_deref(), output_mode)
            }
            PolicyCommand::Show => policy_commands::run_show(
                &helpers::locate_policy(context.policy_flag.as_deref()),
                output_mode,
            ),
            PolicyCommand::CheckBump { old, new } => {
                policy_commands::run_check_bump(&old, &new, output_mode)
            }
        },
        Commands::Watch {
            cases,
            surface,
            interval_secs,
            max_refreshes,
        } => {
            let (policy, clock) = context.policy_and_clock()?;
            let selection = WindowSelection::resolve(&policy, surface.map(Into::into), None);
            let interval = Duration::from_secs(
                interval_secs.unwrap_or(policy.refresh.dashboard_interval_secs),
            );
            deadline_commands::run_watch(
                &JsonFileCaseSource::new(cases),
                &policy,
                clock.as_ref(),
                selection,
                WatchOptions {
                    interval,
                    max_refreshes,
                },
                output_mode,
            )
        }
        Commands::Completion { shell } => {
            print_completion(shell);
            Ok(())
        }
        Commands::Version => print_version(output_mode).map_err(CliError::internal),
    }
}

struct RunContext {
    policy_flag: Option<PathBuf>,
    now_flag: Option<String>,
}

impl RunContext {
    fn policy_and_clock(
        &self,
    ) -> Result<(hinweis_policies::FristenPolicy, Box<dyn hinweis_core::Clock>), CliError> {
        let clock = helpers::clock_from_flag(self.now_flag.as_deref())?;
        let source = helpers::locate_policy(self.policy_flag.as_deref());
        let policy = helpers::load_policy(&source)?;
        Ok((policy, clock))
    }
}

#[derive(Clone, Copy)]
struct LogFlags {
    quiet: bool,
    verbose: u8,
    trace: bool,
}

#[derive(Clone, Copy)]
struct OutputMode {
    json: bool,
}

fn print_completion<G: Generator>(generator: G) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(generator, &mut command, name, &mut std::io::stdout());
}

fn print_version(output_mode: OutputMode) -> Result<(), String> {
    helpers::emit_ok(
        output_mode,
        json!({
            "name": "hinweis",
            "version": env!("CARGO_PKG_VERSION"),
            "policy_schema_version": hinweis_policies::PolicySchemaVersion::V1.as_str(),
        }),
    )
}

#[derive(Debug)]
struct CliError {
    exit_code: ExitCode,
    machine: MachineError,
}

impl CliError {
    fn internal(message: String) -> Self {
        Self {
            exit_code: ExitCode::Internal,
            machine: MachineError::new("internal_error", &message),
        }
    }
}

fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        match serde_json::to_string(&error.machine) {
            Ok(payload) => eprintln!("{payload}"),
            Err(_) => eprintln!(
                "{{\"code\":\"internal_error\",\"message\":\"failed to encode structured error\",\"details\":{{}}}}"
            ),
        }
    } else {
        eprintln!("{}", error.machine.message);
        for (key, value) in &error.machine.details {
            eprintln!("  {key}: {value}");
        }
    }
}
