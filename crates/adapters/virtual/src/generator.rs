//! Random draws for each sensor kind.

use rand::Rng;
use rand::distr::{Bernoulli, Distribution};

use classroom_domain::sensor::{Occupancy, SensorKind, SensorSnapshot};

const BASE_TEMPERATURE: f64 = 22.0;

pub(crate) fn temperature<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let raw = BASE_TEMPERATURE + rng.random_range(-3.0..=8.0);
    (raw * 10.0).round() / 10.0
}

pub(crate) fn humidity<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    f64::from(rng.random_range(40..=75_u32))
}

pub(crate) fn light<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    f64::from(rng.random_range(0..=1000_u32))
}

pub(crate) fn co2<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    f64::from(rng.random_range(400..=1500_u32))
}

pub(crate) fn snapshot<R: Rng + ?Sized>(rng: &mut R, occupancy: &Bernoulli) -> SensorSnapshot {
    let present = if occupancy.sample(rng) {
        Occupancy::Present
    } else {
        Occupancy::Absent
    };
    SensorSnapshot::builder()
        .reading(SensorKind::Temperature, temperature(rng))
        .reading(SensorKind::Humidity, humidity(rng))
        .reading(SensorKind::Light, light(rng))
        .reading(SensorKind::Co2, co2(rng))
        .occupancy(present)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn should_keep_every_draw_within_its_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let t = temperature(&mut rng);
            assert!((19.0..=30.0).contains(&t), "temperature {t}");
            assert!(((t * 10.0).round() - t * 10.0).abs() < 1e-6, "not rounded: {t}");

            assert!((40.0..=75.0).contains(&humidity(&mut rng)));
            assert!((0.0..=1000.0).contains(&light(&mut rng)));
            assert!((400.0..=1500.0).contains(&co2(&mut rng)));
        }
    }

    #[test]
    fn should_draw_whole_numbers_for_integer_sensors() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            for value in [humidity(&mut rng), light(&mut rng), co2(&mut rng)] {
                assert!((value.fract()).abs() < f64::EPSILON);
            }
        }
    }
}
