// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Event rates and exclusion constraints for macroscopic dark matter ("macros")
seeding lightning on the Earth and Jupiter.

A macro crossing a storm deposits energy in the air by elastic scattering. If
it is fast enough and its cross-section big enough, the ionised channel it
leaves behind seeds a lightning strike. Not seeing such strikes excludes
regions of the (mass, cross-section) plane.
 */

mod cli;
pub mod constants;
pub mod math;
pub mod params;
pub mod physics;
pub mod unit_parsing;

use crossbeam_utils::atomic::AtomicCell;

/// Should we draw progress bars? Progress bars are only drawn by the binary,
/// and only when the user hasn't disabled them.
pub(crate) static PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);

// Re-exports.
pub use cli::{MacroLightning, MacroLightningError};
pub use params::{PhysicalParameters, Planet};
pub use physics::{
    flux_speed, seeding_speed, threshold_cross_section, velocity_fraction, CandidatePoint,
    ConstraintCurve, EventRate, PhysicsError, RateCalculator,
};
