// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use criterion::*;

use macro_lightning::{
    constants::DEFAULT_VELOCITY_DISPERSION,
    math::log_space,
    physics::{velocity_fraction, BinnedHalo, CandidatePoint, RateCalculator},
    PhysicalParameters, Planet,
};

fn velocity(c: &mut Criterion) {
    c.bench_function("velocity fraction", |b| {
        b.iter(|| velocity_fraction(black_box(3e7), black_box(DEFAULT_VELOCITY_DISPERSION)))
    });

    let halo = BinnedHalo::symmetric(
        6.0 * DEFAULT_VELOCITY_DISPERSION,
        64,
        DEFAULT_VELOCITY_DISPERSION,
    )
    .unwrap();
    c.bench_function("binned velocity fraction, 64^3 cells", |b| {
        b.iter(|| halo.velocity_fraction(black_box(3e7)))
    });
}

fn rates(c: &mut Criterion) {
    let params = PhysicalParameters::default();
    let calc = RateCalculator::new(&params, Planet::Earth).unwrap();
    let point = CandidatePoint::new(1e6, 1e-4).unwrap();
    c.bench_function("expected events", |b| {
        b.iter(|| calc.expected_events(black_box(point)))
    });

    let masses = log_space(1e1, 1e25, 50).unwrap();
    c.bench_function("constraint curve, 50 masses", |b| {
        b.iter(|| calc.constraint_curve(black_box(&masses)))
    });
}

criterion_group!(benches, velocity, rates);
criterion_main!(benches);
