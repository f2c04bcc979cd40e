use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal risk bucket derived from a composed probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskClass {
    I,
    II,
    III,
    IV,
}

impl RiskClass {
    pub const ALL: [RiskClass; 4] = [RiskClass::I, RiskClass::II, RiskClass::III, RiskClass::IV];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskClass::I => "I",
            RiskClass::II => "II",
            RiskClass::III => "III",
            RiskClass::IV => "IV",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskClass::I => "Low Risk",
            RiskClass::II => "Moderate Risk",
            RiskClass::III => "High Risk",
            RiskClass::IV => "Very High Risk",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskClass::I => "#22c55e",
            RiskClass::II => "#eab308",
            RiskClass::III => "#f97316",
            RiskClass::IV => "#ef4444",
        }
    }

    /// Classes III and IV call for active follow-up.
    pub fn is_elevated(&self) -> bool {
        matches!(self, RiskClass::III | RiskClass::IV)
    }

    fn index(&self) -> usize {
        match self {
            RiskClass::I => 0,
            RiskClass::II => 1,
            RiskClass::III => 2,
            RiskClass::IV => 3,
        }
    }
}

impl fmt::Display for RiskClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive lower / exclusive upper bound of one band as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandBounds {
    pub min: f64,
    pub max: f64,
}

/// Half-open probability bands partitioning `[0, 1]`.
///
/// Class `IV` is closed at the top so that a probability of exactly `1.0` still
/// classifies.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskBands {
    bounds: [BandBounds; 4],
}

impl Default for RiskBands {
    fn default() -> Self {
        Self {
            bounds: [
                BandBounds { min: 0.0, max: 0.30 },
                BandBounds { min: 0.30, max: 0.55 },
                BandBounds { min: 0.55, max: 0.75 },
                BandBounds { min: 0.75, max: 1.0 },
            ],
        }
    }
}

impl RiskBands {
    /// Build bands from a configured table, rejecting gaps, overlaps and missing classes.
    pub fn from_bounds(table: &BTreeMap<RiskClass, BandBounds>) -> Result<Self, BandError> {
        let mut bounds = [BandBounds { min: 0.0, max: 0.0 }; 4];
        for class in RiskClass::ALL {
            let band = table.get(&class).ok_or(BandError::MissingClass(class))?;
            if !band.min.is_finite() || !band.max.is_finite() || band.min >= band.max {
                return Err(BandError::EmptyBand(class));
            }
            bounds[class.index()] = *band;
        }

        if bounds[0].min != 0.0 {
            return Err(BandError::DoesNotStartAtZero(bounds[0].min));
        }
        if bounds[3].max != 1.0 {
            return Err(BandError::DoesNotEndAtOne(bounds[3].max));
        }
        for pair in RiskClass::ALL.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            if bounds[lower.index()].max != bounds[upper.index()].min {
                return Err(BandError::Discontinuous { lower, upper });
            }
        }

        Ok(Self { bounds })
    }

    pub fn bounds(&self, class: RiskClass) -> BandBounds {
        self.bounds[class.index()]
    }

    /// Map a probability to its class. Total over the reals: values below zero
    /// land in `I`, values above one land in `IV`.
    pub fn classify(&self, probability: f64) -> RiskClass {
        if probability.is_nan() || probability < self.bounds[1].min {
            RiskClass::I
        } else if probability < self.bounds[2].min {
            RiskClass::II
        } else if probability < self.bounds[3].min {
            RiskClass::III
        } else {
            RiskClass::IV
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BandError {
    #[error("risk class {0} has no configured band")]
    MissingClass(RiskClass),
    #[error("risk class {0} has an empty or non-finite band")]
    EmptyBand(RiskClass),
    #[error("lowest band must start at 0.0, found {0}")]
    DoesNotStartAtZero(f64),
    #[error("highest band must end at 1.0, found {0}")]
    DoesNotEndAtOne(f64),
    #[error("band {lower} does not end where band {upper} begins")]
    Discontinuous { lower: RiskClass, upper: RiskClass },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(edges: [f64; 5]) -> BTreeMap<RiskClass, BandBounds> {
        RiskClass::ALL
            .iter()
            .enumerate()
            .map(|(idx, class)| {
                (
                    *class,
                    BandBounds {
                        min: edges[idx],
                        max: edges[idx + 1],
                    },
                )
            })
            .collect()
    }

    #[test]
    fn default_bands_are_half_open() {
        let bands = RiskBands::default();
        assert_eq!(bands.classify(0.0), RiskClass::I);
        assert_eq!(bands.classify(0.2999), RiskClass::I);
        assert_eq!(bands.classify(0.30), RiskClass::II);
        assert_eq!(bands.classify(0.5499), RiskClass::II);
        assert_eq!(bands.classify(0.55), RiskClass::III);
        assert_eq!(bands.classify(0.75), RiskClass::IV);
        assert_eq!(bands.classify(1.0), RiskClass::IV);
    }

    #[test]
    fn classification_is_monotonic_across_unit_interval() {
        let bands = RiskBands::default();
        let mut previous = RiskClass::I;
        for step in 0..=1000 {
            let class = bands.classify(step as f64 / 1000.0);
            assert!(class >= previous, "class regressed at step {step}");
            previous = class;
        }
        assert_eq!(previous, RiskClass::IV);
    }

    #[test]
    fn configured_bands_shift_boundaries() {
        let bands =
            RiskBands::from_bounds(&table([0.0, 0.2, 0.4, 0.6, 1.0])).expect("valid bands");
        assert_eq!(bands.classify(0.25), RiskClass::II);
        assert_eq!(bands.classify(0.6), RiskClass::IV);
    }

    #[test]
    fn rejects_gaps_between_bands() {
        let mut bounds = table([0.0, 0.3, 0.55, 0.75, 1.0]);
        bounds.insert(RiskClass::III, BandBounds { min: 0.6, max: 0.75 });
        let err = RiskBands::from_bounds(&bounds).expect_err("gap detected");
        assert_eq!(
            err,
            BandError::Discontinuous {
                lower: RiskClass::II,
                upper: RiskClass::III
            }
        );
    }

    #[test]
    fn rejects_missing_classes_and_open_ends() {
        let mut bounds = table([0.0, 0.3, 0.55, 0.75, 1.0]);
        bounds.remove(&RiskClass::IV);
        assert_eq!(
            RiskBands::from_bounds(&bounds),
            Err(BandError::MissingClass(RiskClass::IV))
        );

        let bounds = table([0.1, 0.3, 0.55, 0.75, 1.0]);
        assert!(matches!(
            RiskBands::from_bounds(&bounds),
            Err(BandError::DoesNotStartAtZero(_))
        ));
    }
}
