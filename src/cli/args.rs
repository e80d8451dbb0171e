//! CLI argument definitions and parsing structures

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// phingrun - run Phing build scripts
#[derive(Parser, Debug)]
#[command(name = "phingrun")]
#[command(about = "Run Phing build scripts with resolved build files, properties and targets")]
#[command(long_about = r#"
phingrun translates a handful of options into a Phing command line and runs it.

EXAMPLES:
  # Run the default target of <root_dir>/build.xml
  phingrun run

  # Run specific targets with properties
  phingrun run --target build,test -D env=prod,region=eu

  # Use another build file and print the command line first
  phingrun -v run --file ci/build.xml --debug

  # See the command line without running Phing
  phingrun run --dry-run

CONFIGURATION:
  Configuration is loaded with precedence: CLI flags > PHINGRUN_* env > config file > defaults
  Config file is discovered by searching upward from CWD for .phingrun/config.toml
  Use --config to specify an explicit config file path

EXIT CODES:
  Phing's own exit code is returned when it runs.
  -1 when Phing cannot be located, 1 when the build file is missing or Phing
  fails to run, 2 for invalid arguments or configuration.
"#)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only report errors; passes -quiet to Phing
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v prints the command line, -vv also passes -verbose to Phing)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Project root used for the default build file and the basedir property
    #[arg(long, global = true)]
    pub root_dir: Option<PathBuf>,

    /// Phing home directory (exported as PHING_HOME)
    #[arg(long, global = true)]
    pub phing_home: Option<PathBuf>,

    /// PHP classpath for Phing (default: <phing-home>/classes)
    #[arg(long, global = true)]
    pub phing_classpath: Option<PathBuf>,

    /// Phing executable name or path (default: phing)
    #[arg(long, global = true)]
    pub phing: Option<String>,

    /// Kill Phing after this many seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run Phing on a build file
    Run {
        /// Build file to use (default: <root_dir>/build.xml)
        #[arg(short, long)]
        file: Option<String>,

        /// Pass -debug to Phing
        #[arg(long)]
        debug: bool,

        /// Comma-separated properties, each KEY=VALUE
        #[arg(short = 'D', long, value_name = "LIST")]
        property: Option<String>,

        /// Comma-separated targets to run
        #[arg(long, value_name = "LIST")]
        target: Option<String>,

        /// Print the command line without running Phing
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the effective configuration and the source of each value
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Build the clap command, for completion generation and tests.
#[must_use]
pub fn build_cli() -> clap::Command {
    Cli::command()
}
