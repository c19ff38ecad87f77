// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;

use macro_lightning::EventRate;
use tempfile::TempDir;

use crate::{get_cmd_output, macro_lightning};

#[test]
fn test_rate_stdout() {
    #[rustfmt::skip]
    let cmd = macro_lightning()
        .args([
            "rate",
            "--masses", "1e6", "1e12",
            "--sigmas", "1e-4",
            "--planets", "earth",
        ])
        .ok();
    assert!(cmd.is_ok(), "rate failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("planet\tmass_g\tcross_section_cm2"));

    let light: Vec<&str> = lines[1].split('\t').collect();
    assert_eq!(&light[..3], &["earth", "1e6", "1e-4"]);
    // Thousands of strikes expected; that's excluded.
    assert_eq!(&light[4..], &["true", "true"]);

    let heavy: Vec<&str> = lines[2].split('\t').collect();
    assert_eq!(heavy[1], "1e12");
    assert_eq!(&heavy[4..], &["true", "false"]);
}

#[test]
fn test_rate_arg_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let arg_file = tmp_dir.path().join("rate.json");
    let output = tmp_dir.path().join("rates.json");
    let mut f = std::fs::File::create(&arg_file).unwrap();
    write!(
        f,
        r#"{{
    "masses": ["1e6"],
    "cross_sections": ["1e-4"],
    "planets": ["jupiter"],
    "output": "{}"
}}"#,
        output.display()
    )
    .unwrap();
    drop(f);

    let cmd = macro_lightning()
        .args(["rate", &arg_file.display().to_string()])
        .ok();
    assert!(cmd.is_ok(), "rate failed: {}", cmd.err().unwrap());

    let rates: Vec<EventRate> =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(rates.len(), 1);
    assert!(rates[0].excluded);
}

#[test]
fn test_rate_needs_candidates() {
    let cmd = macro_lightning().args(["rate", "--masses", "1e6"]).ok();
    assert!(cmd.is_err());
}
