// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_relative_eq;
use clap::Parser;
use tempfile::TempDir;

use super::RateArgs;
use crate::{params::Planet, physics::EventRate, MacroLightningError};

#[test]
fn test_rate_args_parse() {
    #[rustfmt::skip]
    let args = vec![
        "rate",
        "--masses", "1e3", "1kg",
        "--sigmas", "1e-4", "1e-8 m2",
        "--planets", "earth",
        "--exposure", "1yr",
    ];
    let params = RateArgs::parse_from(args).parse().unwrap();
    assert_eq!(params.masses.as_slice(), &[1e3, 1e3]);
    assert_eq!(params.cross_sections[0], 1e-4);
    assert_relative_eq!(params.cross_sections[1], 1e-4, max_relative = 1e-12);
    assert_eq!(params.planets.as_slice(), &[Planet::Earth]);
    assert!(params.exposure.is_some());
    assert!(params.output.is_none());
}

#[test]
fn test_rate_args_run_writes_yaml() {
    let temp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = temp_dir.path().join("rates.yaml");
    let output_string = output.display().to_string();

    #[rustfmt::skip]
    let args = vec![
        "rate",
        "-m", "1e3",
        "-s", "1e-4",
        "--output", &output_string,
    ];
    let rate_args = RateArgs::parse_from(args);
    assert!(rate_args.clone().run(true).is_ok());
    assert!(!output.exists());

    assert!(rate_args.run(false).is_ok());
    let rates: Vec<EventRate> =
        serde_yaml::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    // Both planets by default.
    assert_eq!(rates.len(), 2);
    assert!(rates.iter().all(|r| r.excluded));
}

#[test]
fn test_missing_candidates() {
    let result = RateArgs::parse_from(["rate", "--sigmas", "1e-4"]).parse();
    assert!(matches!(result, Err(MacroLightningError::Physics(_))));

    let result = RateArgs::parse_from(["rate", "--masses", "1e3"]).parse();
    assert!(matches!(result, Err(MacroLightningError::Physics(_))));

    let result = RateArgs::parse_from(["rate", "--masses", "3 lb", "--sigmas", "1e-4"]).parse();
    assert!(matches!(result, Err(MacroLightningError::UnitParse(_))));
}
