// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The cross-section a macro needs to seed a lightning leader.
//!
//! A macro moving at speed v through gas of mass density ρ deposits ρσv² of
//! energy per unit path length by elastic scattering. A leader is seeded when
//! this meets the energy per unit length needed to ionise a conductive
//! channel.

use super::{finite, positive, PhysicsError};
use crate::params::{PhysicalParameters, Planet};

/// The smallest cross-section [cm²] that seeds a leader, for a macro moving at
/// `speed` [cm/s] through an atmosphere with `number_density` [cm⁻³] of
/// molecules of mass `molecular_mass` [g]. `energy_per_length` [erg/cm] is
/// the ionisation energy the channel needs per unit length.
///
/// The result scales as 1 / `number_density`.
pub fn threshold_cross_section(
    number_density: f64,
    molecular_mass: f64,
    energy_per_length: f64,
    speed: f64,
) -> Result<f64, PhysicsError> {
    let number_density = positive("number density", number_density)?;
    let molecular_mass = positive("molecular mass", molecular_mass)?;
    let energy_per_length = positive("energy per length", energy_per_length)?;
    let speed = positive("speed", speed)?;

    let sigma = energy_per_length / (number_density * molecular_mass * speed * speed);
    finite("threshold cross-section", sigma)?;
    // Underflowing to zero is as bad as overflowing.
    positive("threshold cross-section", sigma)
}

/// The smallest arrival speed [cm/s] at which a macro with `cross_section`
/// [cm²] seeds a leader. This is the inverse of [threshold_cross_section].
pub fn seeding_speed(
    cross_section: f64,
    number_density: f64,
    molecular_mass: f64,
    energy_per_length: f64,
) -> Result<f64, PhysicsError> {
    let cross_section = positive("cross-section", cross_section)?;
    let number_density = positive("number density", number_density)?;
    let molecular_mass = positive("molecular mass", molecular_mass)?;
    let energy_per_length = positive("energy per length", energy_per_length)?;

    let speed = (energy_per_length / (number_density * molecular_mass * cross_section)).sqrt();
    finite("seeding speed", speed)
}

/// The fastest arrival speed [cm/s] a bound halo macro can have at `planet`.
pub fn max_arrival_speed(params: &PhysicalParameters, planet: Planet) -> f64 {
    params.halo.max_speed().hypot(params.planet(planet).infall_speed())
}

/// The seeding threshold σ_min [cm²] of `planet`: even the fastest bound macro
/// cannot seed a leader with a smaller cross-section.
pub fn seeding_threshold(params: &PhysicalParameters, planet: Planet) -> Result<f64, PhysicsError> {
    let p = params.planet(planet);
    threshold_cross_section(
        p.number_density,
        p.molecular_mass,
        params.seeding.energy_per_length(),
        max_arrival_speed(params, planet),
    )
}

/// The saturation cross-section [cm²] of `planet`: macros at the leader speed
/// seed a leader. Above this, only the straight-channel requirement limits
/// which macros count.
pub fn saturation_cross_section(
    params: &PhysicalParameters,
    planet: Planet,
) -> Result<f64, PhysicsError> {
    let p = params.planet(planet);
    threshold_cross_section(
        p.number_density,
        p.molecular_mass,
        params.seeding.energy_per_length(),
        p.leader_speed,
    )
}
