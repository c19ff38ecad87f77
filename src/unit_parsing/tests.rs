// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::*;

use approx::assert_abs_diff_eq;

#[test]
fn test_parse_without_units() {
    for s in ["1", "1.0", " 1.0 ", "1e0"] {
        let result = parse_mass(s);
        assert!(result.is_ok(), "{:?}", result.unwrap_err());
        assert_abs_diff_eq!(result.unwrap(), 1.0);
    }

    let result = parse_area("2.5e-8");
    assert!(result.is_ok(), "{:?}", result.unwrap_err());
    assert_abs_diff_eq!(result.unwrap(), 2.5e-8);
}

#[test]
fn test_parse_time_with_units() {
    // Iterate over all possible units.
    for time_unit in TimeUnit::iter() {
        let time_unit_str: &'static str = time_unit.into();
        for time_unit_str in [time_unit_str.to_lowercase(), time_unit_str.to_uppercase()] {
            for s in [
                format!("2{time_unit_str}"),
                format!("2.0{time_unit_str}"),
                format!(" 2.0{time_unit_str} "),
                format!(" 2.0 {time_unit_str} "),
            ] {
                let result = parse_time(&s);
                assert!(result.is_ok(), "{:?}", result.unwrap_err());
                assert_abs_diff_eq!(result.unwrap(), 2.0 * time_unit.to_cgs());
            }
        }
    }
}

#[test]
fn test_parse_speed_with_units() {
    assert_abs_diff_eq!(parse_speed("200km/s").unwrap(), 2e7);
    assert_abs_diff_eq!(parse_speed("200 KM/S").unwrap(), 2e7);
    assert_abs_diff_eq!(parse_speed("3 m/s").unwrap(), 300.0);
    assert_abs_diff_eq!(parse_speed("3cm/s").unwrap(), 3.0);
}

#[test]
fn test_parse_scientific_notation_with_units() {
    assert_abs_diff_eq!(parse_mass("1e3kg").unwrap(), 1e6);
    assert_abs_diff_eq!(parse_mass("1e3 g").unwrap(), 1e3);
    assert_abs_diff_eq!(parse_area("1e-12m2").unwrap(), 1e-8);
    assert_abs_diff_eq!(parse_area("1E-8 cm2").unwrap(), 1e-8);
}

#[test]
fn test_parse_errors() {
    let result = parse_speed("fast km/s");
    assert!(matches!(
        result,
        Err(UnitParseError::GotUnitButCantParse { unit: "km/s", .. })
    ));

    let result = parse_mass("3 lb");
    assert!(matches!(
        result,
        Err(UnitParseError::Unknown {
            unit_type: "mass",
            ..
        })
    ));

    // A unit of the wrong kind is no unit at all.
    assert!(parse_time("3 km/s").is_err());
}
