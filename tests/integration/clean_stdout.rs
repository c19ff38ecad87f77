// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure that only results go to stdout, so they can be piped
//! elsewhere. Logging goes to stderr.

use crate::{get_cmd_output, macro_lightning};

#[test]
fn test_rate_stdout_is_only_results() {
    #[rustfmt::skip]
    let cmd = macro_lightning()
        .args([
            "rate",
            "-m", "1e6",
            "-s", "1e-4",
            "-vv",
        ])
        .ok();
    assert!(cmd.is_ok(), "rate failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    // A header and one line per planet.
    assert_eq!(stdout.lines().count(), 3, "{stdout}");
    assert!(stderr.contains("macro-lightning rate"), "{stderr}");
}
