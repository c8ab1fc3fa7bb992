use criterion::{black_box, criterion_group, criterion_main, Criterion};
use radiosky::constants::HYDROGEN_LINE_HZ;
use radiosky::ephemeris::{earth_pv, earth_pv_mjd};
use radiosky::framelib::ra_dec_to_az_alt;
use radiosky::planetlib::{moon_position, sun_position};
use radiosky::refraction::{pal, saemundsson};
use radiosky::time::utc_datetime;
use radiosky::{Atmosphere, RaDec};

fn ephemeris_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("ephemeris");
    group.bench_function("earth_pv", |b| {
        b.iter(|| earth_pv(black_box(2_400_000.5), black_box(53_411.529_127_10)))
    });
    group.bench_function("earth_pv_mjd", |b| {
        b.iter(|| earth_pv_mjd(black_box(60_370.916_666)))
    });
    group.finish();
}

fn refraction_bench(c: &mut Criterion) {
    let atmosphere = Atmosphere::default();

    let mut group = c.benchmark_group("refraction");
    group.bench_function("saemundsson", |b| {
        b.iter(|| saemundsson(black_box(10.0), atmosphere.pressure, atmosphere.temperature))
    });
    group.bench_function("pal_radio_10deg", |b| {
        b.iter(|| pal(black_box(10.0), &atmosphere, HYDROGEN_LINE_HZ, 52.0, 100.0))
    });
    group.bench_function("pal_radio_horizon", |b| {
        b.iter(|| pal(black_box(-0.5), &atmosphere, HYDROGEN_LINE_HZ, 52.0, 100.0))
    });
    group.finish();
}

fn positions_bench(c: &mut Criterion) {
    let Ok(dt) = utc_datetime(2024, 3, 1, 22, 0, 0) else {
        return;
    };
    let cas_a = RaDec::new(23.391, 58.808);

    let mut group = c.benchmark_group("positions");
    group.bench_function("ra_dec_to_az_alt_j2000", |b| {
        b.iter(|| ra_dec_to_az_alt(black_box(cas_a), 53.24, -2.31, &dt, true))
    });
    group.bench_function("sun_position", |b| {
        b.iter(|| sun_position(black_box(53.24), -2.31, &dt))
    });
    group.bench_function("moon_position", |b| {
        b.iter(|| moon_position(black_box(53.24), -2.31, &dt))
    });
    group.finish();
}

criterion_group!(benches, ephemeris_bench, refraction_bench, positions_bench);
criterion_main!(benches);
