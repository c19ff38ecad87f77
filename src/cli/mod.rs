// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code. More specific options for `macro-lightning`
//! subcommands are contained in modules.
//!
//! Arguments of subcommands that can be read from an argument file must all be
//! optional. This allows all arguments to be optional *and* usable in an
//! arguments file.
//!
//! Only 3 things should be public in this module: `MacroLightning`,
//! `MacroLightning::run`, and `MacroLightningError`.

#[macro_use]
mod common;
mod constraints;
mod error;
mod escape;
mod rate;
mod reference;
mod threshold;
mod velocity_fraction;

pub use error::MacroLightningError;

use std::path::PathBuf;

use clap::{AppSettings, Args, Parser, Subcommand};
use log::info;

use crate::PROGRESS_BARS;

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

#[derive(Debug, Parser)]
#[clap(
    version,
    author,
    about = r#"Event rates and exclusion constraints for macroscopic dark matter ("macros") seeding lightning on the Earth and Jupiter.
All quantities are CGS unless a unit is given."#
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(infer_subcommands = true)]
#[clap(propagate_version = true)]
#[clap(infer_long_args = true)]
pub struct MacroLightning {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// Don't draw progress bars.
    #[clap(long)]
    #[clap(global = true)]
    no_progress_bars: bool,

    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    #[clap(global = true)]
    verbosity: u8,

    /// Only verify that arguments were correctly ingested and print out
    /// high-level information.
    #[clap(long)]
    #[clap(global = true)]
    dry_run: bool,

    /// Save the input arguments into a new TOML file that can be used to
    /// reproduce this run.
    #[clap(long)]
    #[clap(global = true)]
    save_toml: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
#[clap(arg_required_else_help = true)]
enum Command {
    #[clap(alias = "vfrac")]
    #[clap(about = "The fraction of a Maxwellian halo faster than a speed, and their flux speed.")]
    VelocityFraction(velocity_fraction::VelocityFractionArgs),

    #[clap(about = "The cross-sections needed to seed lightning on each planet.")]
    Threshold(threshold::ThresholdArgs),

    #[clap(alias = "rates")]
    #[clap(about = "Expected lightning events of (mass, cross-section) candidates, and whether they are excluded.")]
    Rate(rate::RateArgs),

    #[clap(alias = "constrain")]
    #[clap(about = "The smallest excluded cross-section over a sweep of macro masses.")]
    Constraints(constraints::ConstraintsArgs),

    #[clap(about = "Tabulate reference cross-section lines, e.g. nuclear density.")]
    Reference(reference::ReferenceArgs),

    #[clap(about = "The escape speed of a nested system of bodies.")]
    Escape(escape::EscapeArgs),
}

impl MacroLightning {
    pub fn run(self) -> Result<(), MacroLightningError> {
        // Set up logging.
        let GlobalArgs {
            verbosity,
            dry_run,
            no_progress_bars,
            save_toml,
        } = self.global_opts;
        setup_logging(verbosity)
            .map_err(|e| MacroLightningError::Generic(format!("Failed to initialise logging: {e}")))?;
        // Enable progress bars if the user didn't say "no progress bars".
        if !no_progress_bars {
            PROGRESS_BARS.store(true);
        }

        // Print the version of macro-lightning and its build-time information.
        let sub_command = match &self.command {
            Command::VelocityFraction(_) => "velocity-fraction",
            Command::Threshold(_) => "threshold",
            Command::Rate(_) => "rate",
            Command::Constraints(_) => "constraints",
            Command::Reference(_) => "reference",
            Command::Escape(_) => "escape",
        };
        info!("macro-lightning {} {}", sub_command, env!("CARGO_PKG_VERSION"));
        display_build_info();

        macro_rules! merge_save_run {
            ($args:expr) => {{
                let args = $args.merge()?;
                if let Some(toml) = save_toml {
                    use std::{
                        fs::File,
                        io::{BufWriter, Write},
                    };

                    let mut f = BufWriter::new(File::create(toml)?);
                    let toml_str = toml::to_string(&args).map_err(|e| {
                        MacroLightningError::ArgFile(format!("Couldn't serialise arguments to toml: {e}"))
                    })?;
                    f.write_all(toml_str.as_bytes())?;
                }
                args.run(dry_run)?;
            }};
        }

        match self.command {
            Command::Rate(args) => {
                merge_save_run!(args)
            }

            Command::Constraints(args) => {
                merge_save_run!(args)
            }

            // Calculators.
            Command::VelocityFraction(args) => args.run()?,
            Command::Threshold(args) => args.run()?,
            Command::Reference(args) => args.run()?,
            Command::Escape(args) => args.run()?,
        }

        info!("macro-lightning {} complete.", sub_command);
        Ok(())
    }
}

/// Log to stderr so that stdout only carries results. Each `-v` lowers the
/// level; from three on, records also show their source line.
fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let level = match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::from_default_env();
    builder
        .target(env_logger::Target::Stderr)
        .format_target(false)
        .filter_level(level);
    if verbosity >= 3 {
        builder.format(|buf, record| {
            use std::io::Write;

            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                buf.timestamp(),
                record.level(),
                record.target(),
                record.line().unwrap_or(0),
                record.args()
            )
        });
    }
    builder.try_init()
}

/// Log the git revision, build time and compiler of this executable.
fn display_build_info() {
    let revision = match (GIT_COMMIT_HASH_SHORT, GIT_DIRTY) {
        (Some(hash), Some(true)) => format!("{hash} (dirty)"),
        (Some(hash), _) => hash.to_string(),
        (None, _) => "<no git info>".to_string(),
    };
    match GIT_HEAD_REF {
        Some(head) => info!("Built from {revision} ({head})"),
        None => info!("Built from {revision}"),
    }
    info!("Built at {BUILT_TIME_UTC} with {RUSTC_VERSION}");
}
