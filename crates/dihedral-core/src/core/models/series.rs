use std::num::NonZeroU64;
use thiserror::Error;

/// Lower bound of the conventional dihedral domain, in degrees.
pub const ANGLE_DOMAIN_MIN: f64 = -180.0;
/// Upper bound of the conventional dihedral domain, in degrees.
pub const ANGLE_DOMAIN_MAX: f64 = 180.0;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SeriesError {
    #[error("Step and angle series differ in length ({steps} steps vs {angles} angles)")]
    LengthMismatch { steps: usize, angles: usize },

    #[error("Step index {position} multiplied by {multiplier} overflows a 64-bit step counter")]
    StepOverflow { position: u64, multiplier: u64 },
}

/// Monte Carlo cycle numbers at which each angle was saved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepSeries(Vec<u64>);

impl StepSeries {
    /// Builds `[1 * m, 2 * m, ..., len * m]` for multiplier `m`.
    pub fn with_multiplier(len: usize, multiplier: NonZeroU64) -> Result<Self, SeriesError> {
        let m = multiplier.get();
        (1..=len as u64)
            .map(|position| {
                position
                    .checked_mul(m)
                    .ok_or(SeriesError::StepOverflow {
                        position,
                        multiplier: m,
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The last (and largest) step, if any.
    pub fn max(&self) -> Option<u64> {
        self.0.last().copied()
    }
}

/// Dihedral angles in degrees, in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AngleSeries(Vec<f64>);

impl AngleSeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of values lying outside `[-180, 180]`.
    pub fn out_of_domain_count(&self) -> usize {
        self.0
            .iter()
            .filter(|a| !(ANGLE_DOMAIN_MIN..=ANGLE_DOMAIN_MAX).contains(*a))
            .count()
    }
}

/// A dihedral trajectory: parallel step and angle series of equal length.
///
/// Both halves are fixed at construction; the type offers no mutation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DihedralSeries {
    steps: StepSeries,
    angles: AngleSeries,
}

impl DihedralSeries {
    pub fn new(steps: StepSeries, angles: AngleSeries) -> Result<Self, SeriesError> {
        if steps.len() != angles.len() {
            return Err(SeriesError::LengthMismatch {
                steps: steps.len(),
                angles: angles.len(),
            });
        }
        Ok(Self { steps, angles })
    }

    /// Pairs every angle with its step, `step[i] = (i + 1) * multiplier`.
    pub fn from_angles(angles: Vec<f64>, multiplier: NonZeroU64) -> Result<Self, SeriesError> {
        let steps = StepSeries::with_multiplier(angles.len(), multiplier)?;
        Self::new(steps, AngleSeries::new(angles))
    }

    pub fn steps(&self) -> &StepSeries {
        &self.steps
    }

    pub fn angles(&self) -> &AngleSeries {
        &self.angles
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// Iterates `(step, angle)` pairs as plot coordinates.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.steps
            .as_slice()
            .iter()
            .zip(self.angles.as_slice())
            .map(|(&step, &angle)| (step as f64, angle))
    }

    pub fn into_parts(self) -> (StepSeries, AngleSeries) {
        (self.steps, self.angles)
    }
}
