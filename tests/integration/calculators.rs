// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests of the calculator subcommands.

use approx::assert_relative_eq;

use crate::{get_cmd_output, get_value, macro_lightning};

#[test]
fn test_velocity_fraction() {
    // v_min / dispersion = sqrt(2), so Q(3/2, 1).
    #[rustfmt::skip]
    let cmd = macro_lightning()
        .args([
            "velocity-fraction",
            "--v-min", "1.4142135623730951km/s",
            "--dispersion", "1km/s",
        ])
        .ok();
    assert!(cmd.is_ok(), "velocity-fraction failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert_relative_eq!(
        get_value(&stdout, "velocity_fraction"),
        0.57240670,
        max_relative = 1e-7
    );
    // 2a sqrt(2/pi) (1 + u) e^-u with u = 1.
    let expected_flux = 2.0 * 1e5 * (2.0 / std::f64::consts::PI).sqrt() * 2.0 * (-1.0f64).exp();
    assert_relative_eq!(
        get_value(&stdout, "flux_speed_cm_s"),
        expected_flux,
        max_relative = 1e-9
    );
}

#[test]
fn test_velocity_fraction_binned() {
    #[rustfmt::skip]
    let cmd = macro_lightning()
        .args([
            "velocity-fraction",
            "--v-min", "1cm/s",
            "--binned", "41",
        ])
        .ok();
    assert!(cmd.is_ok(), "velocity-fraction failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    // Only the cell at rest is slower.
    assert_relative_eq!(get_value(&stdout, "velocity_fraction"), 1.0, max_relative = 1e-2);
}

#[test]
fn test_velocity_fraction_binned_grid_too_large() {
    #[rustfmt::skip]
    let cmd = macro_lightning()
        .args([
            "velocity-fraction",
            "--v-min", "1cm/s",
            "--binned", "4194304",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("too many cells"), "{stderr}");
}

#[test]
fn test_velocity_fraction_bad_unit() {
    let cmd = macro_lightning()
        .args(["velocity-fraction", "--v-min", "3 furlongs/fortnight"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Supported units"), "{stderr}");
}

#[test]
fn test_escape() {
    let cmd = macro_lightning()
        .args(["escape", "11.186km/s", "42.1km/s"])
        .ok();
    assert!(cmd.is_ok(), "escape failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert_relative_eq!(
        get_value(&stdout, "escape_speed_km_s"),
        16.6485836,
        max_relative = 1e-7
    );
}

#[test]
fn test_escape_accumulate() {
    #[rustfmt::skip]
    let cmd = macro_lightning()
        .args([
            "escape", "11.186km/s", "42.1km/s", "550km/s",
            "--accumulate",
        ])
        .ok();
    assert!(cmd.is_ok(), "escape failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert_relative_eq!(get_value(&stdout, "1"), 11.186, max_relative = 1e-12);
    assert_relative_eq!(get_value(&stdout, "2"), 16.6485836, max_relative = 1e-7);
    assert_relative_eq!(get_value(&stdout, "3"), 161.94929058, max_relative = 1e-7);
}

#[test]
fn test_escape_wrong_number_of_orbital_speeds() {
    #[rustfmt::skip]
    let cmd = macro_lightning()
        .args([
            "escape", "11.186km/s", "42.1km/s", "550km/s",
            "--orbital-speeds", "29.8km/s",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("orbital speeds"), "{stderr}");
}

#[test]
fn test_escape_rejects_invalid_speeds() {
    for bad in ["nan", "0km/s", "inf"] {
        let cmd = macro_lightning()
            .args(["escape", bad, "42.1km/s"])
            .ok();
        assert!(cmd.is_err(), "escape accepted {bad}");
        let (stdout, stderr) = get_cmd_output(cmd);
        assert!(stderr.contains("escape speed"), "{stderr}");
        assert!(stdout.is_empty(), "{stdout}");
    }
}

#[test]
fn test_threshold() {
    let cmd = macro_lightning()
        .args(["threshold", "--planets", "earth", "--speed", "200km/s"])
        .ok();
    assert!(cmd.is_ok(), "threshold failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    let mut lines = stdout.lines();
    let header: Vec<&str> = lines.next().unwrap().split('\t').collect();
    assert_eq!(header[0], "planet");
    assert_eq!(header.len(), 6);

    let row: Vec<&str> = lines.next().unwrap().split('\t').collect();
    assert_eq!(row[0], "earth");
    let values: Vec<f64> = row[1..].iter().map(|v| v.parse().unwrap()).collect();
    let (sigma_min, sigma_sat, max_arrival, infall, at_speed) =
        (values[0], values[1], values[2], values[3], values[4]);
    assert!(sigma_min < sigma_sat);
    assert!(infall < max_arrival);
    // The leader speed is 200 km/s.
    assert_relative_eq!(at_speed, sigma_sat, max_relative = 1e-12);
    assert!(lines.next().is_none());
}

#[test]
fn test_reference_stdout() {
    #[rustfmt::skip]
    let cmd = macro_lightning()
        .args([
            "reference",
            "--lines", "cmb",
            "--mass-min", "1e3",
            "--mass-max", "1e5",
            "--num-masses", "3",
        ])
        .ok();
    assert!(cmd.is_ok(), "reference failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "mass_g\tcmb");
    let last: Vec<f64> = lines[3].split('\t').map(|v| v.parse().unwrap()).collect();
    assert_relative_eq!(last[0], 1e5, max_relative = 1e-12);
    assert_relative_eq!(last[1], 4.5e-2, max_relative = 1e-12);
}
