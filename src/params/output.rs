// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writing results for external plotting.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use log::debug;
use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

/// Supported output formats. The format of a file is taken from its
/// extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub(crate) enum OutputType {
    Tsv,
    Json,
    Yaml,
}

impl OutputType {
    pub(crate) fn from_path(path: &Path) -> Option<OutputType> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| match e.to_lowercase().as_str() {
                // Accept the usual alternative yaml extension.
                "yml" => Some(OutputType::Yaml),
                e => OutputType::from_str(e).ok(),
            })
    }
}

/// Serialise `value` to `path` as json or yaml. Tab-separated output is
/// format-specific, so `tsv` calls back into `write_tsv`.
pub(crate) fn write_output<T, F>(
    value: &T,
    path: &Path,
    output_type: OutputType,
    write_tsv: F,
) -> Result<(), WriteError>
where
    T: Serialize,
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    debug!("Writing {output_type} output to {}", path.display());
    let mut f = BufWriter::new(File::create(path).map_err(|e| WriteError::Create {
        path: path.to_path_buf(),
        err: e,
    })?);
    match output_type {
        OutputType::Tsv => write_tsv(&mut f)?,
        OutputType::Json => serde_json::to_writer_pretty(&mut f, value)?,
        OutputType::Yaml => serde_yaml::to_writer(&mut f, value)?,
    }
    f.flush()?;
    Ok(())
}

#[derive(Error, Debug)]
pub(crate) enum WriteError {
    #[error("Couldn't create '{path}': {err}")]
    Create {
        path: PathBuf,
        err: std::io::Error,
    },

    #[error("Couldn't write json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Couldn't write yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
