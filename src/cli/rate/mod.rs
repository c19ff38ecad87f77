// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use vec1::Vec1;

use super::common::{parse_output, PhysicsArgs, PhysicsSelection, ARG_FILE_HELP, OUTPUT_HELP};
use crate::{
    cli::common::display_warnings,
    params::RateParams,
    unit_parsing::{parse_area, parse_mass},
    MacroLightningError,
};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct RateArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// Dark-matter masses to evaluate. Units may be given (e.g. 1e3kg);
    /// grams otherwise.
    #[clap(
        short,
        long,
        alias = "mass",
        multiple_values(true),
        help_heading = "CANDIDATES"
    )]
    pub(super) masses: Option<Vec<String>>,

    /// Cross-sections to evaluate; every cross-section is paired with every
    /// mass. Units may be given (e.g. 1e-12m2); cm² otherwise.
    #[clap(
        short = 's',
        long,
        aliases = &["sigma", "sigmas"],
        multiple_values(true),
        help_heading = "CANDIDATES"
    )]
    pub(super) cross_sections: Option<Vec<String>>,

    #[clap(short, long, help = OUTPUT_HELP.as_str(), help_heading = "OUTPUT")]
    pub(super) output: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(flatten)]
    pub(super) physics_args: PhysicsArgs,
}

impl RateArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<RateArgs, MacroLightningError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let RateArgs {
                args_file: _,
                masses,
                cross_sections,
                output,
                physics_args,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(RateArgs {
                args_file: None,
                masses: cli_args.masses.or(masses),
                cross_sections: cli_args.cross_sections.or(cross_sections),
                output: cli_args.output.or(output),
                physics_args: cli_args.physics_args.merge(physics_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<RateParams, MacroLightningError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            masses,
            cross_sections,
            output,
            physics_args,
        } = self;

        let masses = masses
            .unwrap_or_default()
            .iter()
            .map(|m| parse_mass(m))
            .collect::<Result<Vec<_>, _>>()?;
        let masses = Vec1::try_from_vec(masses).map_err(|_| RateArgsError::NoMasses)?;
        let cross_sections = cross_sections
            .unwrap_or_default()
            .iter()
            .map(|s| parse_area(s))
            .collect::<Result<Vec<_>, _>>()?;
        let cross_sections =
            Vec1::try_from_vec(cross_sections).map_err(|_| RateArgsError::NoCrossSections)?;

        let PhysicsSelection {
            physics,
            planets,
            exposure,
        } = physics_args.parse()?;
        let output = parse_output(output)?;

        display_warnings();

        Ok(RateParams {
            physics,
            planets,
            masses,
            cross_sections,
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

#[derive(Error, Debug)]
pub(super) enum RateArgsError {
    #[error("No masses were specified")]
    NoMasses,

    #[error("No cross-sections were specified")]
    NoCrossSections,
}
