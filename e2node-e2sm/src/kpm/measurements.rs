//! Measurement sources for the KPM monitor

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::codec::{LabelKind, MeasurementRecord};

/// Measurement names the KPM monitor can report
pub const SUPPORTED_MEASUREMENTS: [&str; 3] = ["RRU.PrbTotDl", "RRU.PrbTotUl", "test"];

/// Returns true if `name` is one of [`SUPPORTED_MEASUREMENTS`].
pub fn is_supported_measurement(name: &str) -> bool {
    SUPPORTED_MEASUREMENTS.contains(&name)
}

/// Provides the records reported for a measurement/label pair.
pub trait MeasurementSource: Send {
    fn collect(&mut self, measurement: &str, label: LabelKind) -> Vec<MeasurementRecord>;
}

const RANDOM_SOURCE_SEED: u64 = 1234;

/// Produces 3..=10 integer records in 0..=100 from a seeded generator.
#[derive(Debug)]
pub struct RandomMeasurementSource {
    rng: StdRng,
}

impl RandomMeasurementSource {
    pub fn new() -> Self {
        Self::with_seed(RANDOM_SOURCE_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMeasurementSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasurementSource for RandomMeasurementSource {
    fn collect(&mut self, measurement: &str, label: LabelKind) -> Vec<MeasurementRecord> {
        let count = self.rng.gen_range(3..=10);
        tracing::trace!(
            "Collecting {} records of {} for label {}",
            count,
            measurement,
            label.as_str()
        );
        (0..count)
            .map(|_| MeasurementRecord::Integer(self.rng.gen_range(0..=100)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_measurements() {
        assert!(is_supported_measurement("RRU.PrbTotDl"));
        assert!(is_supported_measurement("test"));
        assert!(!is_supported_measurement("DRB.UEThpDl"));
    }

    #[test]
    fn test_random_source_bounds() {
        let mut source = RandomMeasurementSource::new();
        for _ in 0..50 {
            let records = source.collect("test", LabelKind::NoLabel);
            assert!((3..=10).contains(&records.len()));
            for record in records {
                match record {
                    MeasurementRecord::Integer(v) => assert!(v <= 100),
                    MeasurementRecord::NoValue => panic!("Unexpected NoValue record"),
                }
            }
        }
    }

    #[test]
    fn test_random_source_is_deterministic() {
        let mut a = RandomMeasurementSource::with_seed(7);
        let mut b = RandomMeasurementSource::with_seed(7);
        assert_eq!(
            a.collect("test", LabelKind::Min),
            b.collect("test", LabelKind::Min)
        );
    }
}
