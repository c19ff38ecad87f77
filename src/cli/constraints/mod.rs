// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.


use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{
    parse_output, MassSweepArgs, PhysicsArgs, PhysicsSelection, Warn, ARG_FILE_HELP, OUTPUT_HELP,
};
use crate::{cli::common::display_warnings, params::ConstraintsParams, MacroLightningError};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ConstraintsArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(short, long, help = OUTPUT_HELP.as_str(), help_heading = "OUTPUT")]
    pub(super) output: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(flatten)]
    pub(super) mass_args: MassSweepArgs,

    #[clap(flatten)]
    #[serde(flatten)]
    pub(super) physics_args: PhysicsArgs,
}

impl ConstraintsArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<ConstraintsArgs, MacroLightningError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let ConstraintsArgs {
                args_file: _,
                output,
                mass_args,
                physics_args,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(ConstraintsArgs {
                args_file: None,
                output: cli_args.output.or(output),
                mass_args: cli_args.mass_args.merge(mass_args),
                physics_args: cli_args.physics_args.merge(physics_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<ConstraintsParams, MacroLightningError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            output,
            mass_args,
            physics_args,
        } = self;

        let masses = mass_args.parse()?;
        if masses.len() < 2 {
            "Only one mass is being swept; the constraint curve will have at most one point"
                .warn();
        }
        let PhysicsSelection {
            physics,
            planets,
            exposure,
        } = physics_args.parse()?;
        let output = parse_output(output)?;

        display_warnings();

        Ok(ConstraintsParams {
            physics,
            planets,
            masses,
            exposure,
            output,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), MacroLightningError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}
