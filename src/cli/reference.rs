// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{
    io::{BufWriter, Write},
    path::PathBuf,
    str::FromStr,
};

use clap::Parser;
use itertools::Itertools;
use log::info;
use serde::Serialize;
use strum::IntoEnumIterator;

use super::common::{display_warnings, parse_output, MassSweepArgs, OUTPUT_HELP};
use crate::{
    params::write_output,
    physics::{reference::ReferenceLine, PhysicsError},
    MacroLightningError,
};

lazy_static::lazy_static! {
    static ref LINES_HELP: String =
        format!("The reference lines to tabulate. Default: all. Supported lines: {}", ReferenceLine::iter().join(", "));
}

/// Tabulate the reference cross-section lines drawn alongside constraints.
#[derive(Parser, Debug, Default)]
pub struct ReferenceArgs {
    #[clap(short, long, multiple_values(true), help = LINES_HELP.as_str())]
    lines: Option<Vec<String>>,

    #[clap(short, long, help = OUTPUT_HELP.as_str(), help_heading = "OUTPUT")]
    output: Option<PathBuf>,

    #[clap(flatten)]
    mass_args: MassSweepArgs,
}

/// Cross-sections [cm²] of each line at each mass [g].
#[derive(Debug, Serialize)]
struct ReferenceTable {
    lines: Vec<&'static str>,
    masses: Vec<f64>,
    cross_sections: Vec<Vec<f64>>,
}

impl ReferenceTable {
    fn new(lines: &[ReferenceLine], masses: Vec<f64>) -> Result<ReferenceTable, PhysicsError> {
        let cross_sections = masses
            .iter()
            .map(|&m| {
                lines
                    .iter()
                    .map(|l| l.cross_section(m))
                    .collect::<Result<Vec<f64>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ReferenceTable {
            lines: lines.iter().map(|&l| l.into()).collect(),
            masses,
            cross_sections,
        })
    }

    fn write_tsv<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        writeln!(w, "mass_g\t{}", self.lines.iter().join("\t"))?;
        for (mass, row) in self.masses.iter().zip(self.cross_sections.iter()) {
            writeln!(
                w,
                "{mass:e}\t{}",
                row.iter().map(|s| format!("{s:e}")).join("\t")
            )?;
        }
        Ok(())
    }
}

impl ReferenceArgs {
    pub(super) fn run(self) -> Result<(), MacroLightningError> {
        let lines = match self.lines {
            None => ReferenceLine::iter().collect(),
            Some(lines) => lines
                .iter()
                .map(|l| {
                    ReferenceLine::from_str(l.trim()).map_err(|_| {
                        MacroLightningError::Physics(format!(
                            "Unknown reference line '{l}'. Supported lines: {}",
                            ReferenceLine::iter().join(", ")
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
        };
        let masses = self.mass_args.parse()?;
        let output = parse_output(self.output)?;
        display_warnings();

        let table = ReferenceTable::new(&lines, masses.into_vec())?;
        match output {
            Some((path, output_type)) => {
                write_output(&table, &path, output_type, |f| table.write_tsv(f))?;
                info!("Wrote {}", path.display());
            }
            None => {
                let stdout = std::io::stdout();
                let mut out = BufWriter::new(stdout.lock());
                table.write_tsv(&mut out)?;
                out.flush()?;
            }
        }
        Ok(())
    }
}
