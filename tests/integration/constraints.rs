// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use macro_lightning::{ConstraintCurve, Planet};
use tempfile::TempDir;

use crate::{get_cmd_output, macro_lightning};

#[test]
fn test_constraints_stdout() {
    #[rustfmt::skip]
    let cmd = macro_lightning()
        .args([
            "constraints",
            "--mass-min", "1e3",
            "--mass-max", "1e12",
            "--num-masses", "10",
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_ok(), "constraints failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);

    // One block per planet, separated by a blank line.
    let blocks: Vec<&str> = stdout.split("\n\n").collect();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].starts_with("# planet: earth"));
    assert!(blocks[1].starts_with("# planet: jupiter"));

    let rows = |block: &str| {
        block
            .lines()
            .filter(|l| !l.starts_with('#') && !l.starts_with("mass_g"))
            .map(|l| {
                let v: Vec<f64> = l.split('\t').map(|v| v.parse().unwrap()).collect();
                (v[0], v[1])
            })
            .collect::<Vec<_>>()
    };
    let earth = rows(blocks[0]);
    let jupiter = rows(blocks[1]);
    // 1e12 g is too rare for the Earth but not for Jupiter.
    assert!(earth.len() < jupiter.len());
    assert!(!earth.is_empty());
    // Light macros are excluded right down to the seeding threshold, which
    // doesn't depend on mass.
    assert_eq!(earth[0].1, earth[1].1);
}

#[test]
fn test_constraints_yaml_and_save_toml() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("curves.yml");

    #[rustfmt::skip]
    let cmd = macro_lightning()
        .args([
            "constraints",
            "--planets", "jupiter",
            "--exposure", "2yr",
            "--mass-min", "1e8",
            "--mass-max", "1e10",
            "-n", "3",
            "-o", &output.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "constraints failed: {}", cmd.err().unwrap());

    let curves: Vec<ConstraintCurve> =
        serde_yaml::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(curves.len(), 1);
    assert_eq!(curves[0].planet, Planet::Jupiter);
    assert_eq!(curves[0].points.len(), 3);
}

#[test]
fn test_constraints_dry_run() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("curves.json");
    let cmd = macro_lightning()
        .args(["constraints", "--dry-run", "-o", &output.display().to_string()])
        .ok();
    assert!(cmd.is_ok(), "constraints failed: {}", cmd.err().unwrap());
    assert!(!output.exists());
}

#[test]
fn test_constraints_bad_params_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let params = tmp_dir.path().join("params.toml");
    std::fs::write(&params, "confidence_level = 1.5\n").unwrap();
    let cmd = macro_lightning()
        .args(["constraints", "--params", &params.display().to_string()])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("confidence"), "{stderr}");
}
