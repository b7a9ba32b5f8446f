//! bcm2cfg command line front end.
//!
//! One command per invocation; results go to stdout, logs and errors to
//! stderr. Exit status is 1 on any error or failed verification.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgAction, ArgGroup, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use bcm2cfg_core::constants::GENERIC_PROFILE;
use bcm2cfg_core::pipeline::{run, Command, RunConfig};
use bcm2cfg_core::profile::{profiles, ProfileOverride};
use bcm2cfg_core::types::{ConfigError, FormatError};

#[derive(Parser, Debug)]
#[command(
    author,
    about = "Broadcom cable modem config backup utility",
    disable_version_flag = true,
    group(ArgGroup::new("command").args(["verify", "fix", "decrypt", "encrypt", "list"]))
)]
struct Cli {
    /// Verify the checksum.
    #[arg(short = 'V', long)]
    verify: bool,

    /// Fix the size field and checksum.
    #[arg(short, long)]
    fix: bool,

    /// Decrypt the input.
    #[arg(short, long)]
    decrypt: bool,

    /// Encrypt the input.
    #[arg(short, long)]
    encrypt: bool,

    /// List header and records.
    #[arg(short, long)]
    list: bool,

    /// Encryption password.
    #[arg(short, long, value_name = "PASSWORD")]
    password: Option<String>,

    /// Output file.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Ignore a bad checksum before encrypt/decrypt/list.
    #[arg(short = 'n', long)]
    ignore_bad_checksum: bool,

    /// Print the built-in profiles and exit.
    #[arg(short = 'L', long)]
    list_profiles: bool,

    /// Device profile.
    #[arg(short = 'P', long, env = "BCM2CFG_PROFILE", default_value = GENERIC_PROFILE)]
    profile: String,

    /// Profile override, `var=arg` (repeatable).
    #[arg(short = 'O', long = "override", value_name = "VAR=ARG")]
    overrides: Vec<ProfileOverride>,

    /// More log output (repeatable). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,

    /// Input file.
    #[arg(required_unless_present = "list_profiles")]
    input: Option<PathBuf>,
}

impl Cli {
    fn selected_command(&self) -> Option<Command> {
        [
            (self.verify, Command::Verify),
            (self.fix, Command::Fix),
            (self.decrypt, Command::Decrypt),
            (self.encrypt, Command::Encrypt),
            (self.list, Command::List),
        ]
        .into_iter()
        .find_map(|(set, cmd)| set.then_some(cmd))
    }

    fn into_config(self) -> Result<RunConfig> {
        let command = self
            .selected_command()
            .ok_or_else(|| ConfigError::usage("no command specified (one of -V -f -d -e -l)"))?;
        let input = self.input.context("no input file specified")?;

        let mut cfg = RunConfig::new(command, input).with_profile(self.profile);
        cfg.output = self.output;
        cfg.password = self.password;
        cfg.ignore_bad_checksum = self.ignore_bad_checksum;
        cfg.overrides = self.overrides;
        Ok(cfg)
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .try_init();
}

fn print_profiles() {
    for p in profiles() {
        println!("{}", p);
    }
}

fn execute(cli: Cli) -> Result<bool> {
    if cli.list_profiles {
        print_profiles();
        return Ok(true);
    }

    let json = cli.json;
    let cfg = cli.into_config()?;
    debug!(command = %cfg.command, input = %cfg.input.display(), "parsed arguments");

    let outcome = run(&cfg)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", outcome);
    }
    Ok(outcome.success())
}

/// Parse arguments; on failure the message is printed and the exit status
/// returned. Help and version exit 0, every usage error exits 1.
fn parse_args<I, T>(args: I) -> Result<Cli, u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|e| {
        let _ = e.print();
        match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
            _ => 1,
        }
    })
}

fn main() -> ExitCode {
    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(code) => return ExitCode::from(code),
    };
    init_tracing(cli.verbose);

    match execute(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            match err.downcast_ref::<ConfigError>() {
                // The mismatch line is a result, not a diagnostic.
                Some(ConfigError::Format(FormatError::ChecksumMismatch(v))) => println!("{}", v),
                _ => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
