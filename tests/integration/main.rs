// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod calculators;
mod clean_stdout;
mod constraints;
mod rate;

use std::{process::Output, str::from_utf8};

use assert_cmd::{output::OutputError, Command};

fn macro_lightning() -> Command {
    Command::cargo_bin("macro-lightning").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Find the value printed after `key` and a tab.
fn get_value(stdout: &str, key: &str) -> f64 {
    stdout
        .lines()
        .find_map(|l| l.strip_prefix(key).and_then(|v| v.strip_prefix('\t')))
        .unwrap_or_else(|| panic!("'{key}' wasn't in the output: {stdout}"))
        .trim()
        .parse()
        .unwrap()
}
