use std::fmt;

use log::debug;
use serde::Serialize;

use super::{CalibrationConfig, CalibrationError, CalibrationFunction, TimePair};
use crate::numeric::{stats, FitError, HermiteInterpolant, InterpolantKind, LevenbergMarquardt, Model, Polynomial};

/// Weight of the exponent penalty of the power-law fit
const POWER_LAW_PENALTY: f64 = 10_000.0;

/// Relative RMS below which a fit counts as exact
const EXACT_FIT_RMS: f64 = 1e-9;

/// A calibration model family tried by the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CandidateModel {
    /// Polynomial of the given degree
    Polynomial {
        /// Degree
        degree: usize,
    },
    /// `a * x^b + c`
    PowerLaw,
    /// Exact interpolant of the given kind
    Interpolant(InterpolantKind),
}

impl fmt::Display for CandidateModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateModel::Polynomial { degree } => write!(f, "degree {} polynomial", degree),
            CandidateModel::PowerLaw => write!(f, "power law"),
            CandidateModel::Interpolant(kind) => write!(f, "{}", kind.label()),
        }
    }
}

/// What happened to a candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CandidateOutcome {
    /// Became the best model at the time it was tried
    Accepted,
    /// Monotone, but not enough better than the best so far
    NotImproved,
    /// Decreases somewhere on the time range
    NonMonotone,
    /// Could not be fitted
    FitFailed(String),
}

/// One entry of the selection log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateReport {
    /// Candidate family
    pub model: CandidateModel,
    /// RMS against the expected times, if the candidate was fitted
    pub rms: Option<f64>,
    /// Decision taken
    pub outcome: CandidateOutcome,
}

/// The chosen calibration and how it was chosen
#[derive(Debug, Clone)]
pub struct ModelSelection {
    /// Selected time transform
    pub function: CalibrationFunction,
    /// RMS of the selected transform
    pub rms: f64,
    /// Every candidate in the order tried
    pub candidates: Vec<CandidateReport>,
}

/// Picks the simplest monotone time transform that fits the time pairs
///
/// Candidates are tried in a fixed order (polynomials of rising degree, a
/// power law, then optionally the PCHIP and Akima interpolants). A candidate
/// replaces the best so far only when its RMS is lower by more than
/// `min_improvement` of the best RMS. The polynomial sweep stops at the first
/// degree that fails to fit or is not monotone on the trace time range.
#[derive(Debug, Clone, Copy)]
pub struct CalibrationModelSelector<'a> {
    config: &'a CalibrationConfig,
}

struct Best {
    function: CalibrationFunction,
    rms: f64,
}

impl<'a> CalibrationModelSelector<'a> {
    /// Selector using `config`
    pub fn new(config: &'a CalibrationConfig) -> Self {
        Self { config }
    }

    /// Select a calibration for `pairs` over the time range `[min, max]`
    ///
    /// Returns `Ok(None)` when no pairs are given and `InsufficientData` for a
    /// single pair.
    pub fn select(
        &self,
        pairs: &[TimePair],
        min: f64,
        max: f64,
    ) -> Result<Option<ModelSelection>, CalibrationError> {
        match pairs.len() {
            0 => return Ok(None),
            1 => {
                return Err(CalibrationError::InsufficientData {
                    required: 2,
                    available: 1,
                })
            }
            _ => {}
        }

        let observed: Vec<f64> = pairs.iter().map(|p| p.observed_time).collect();
        let expected: Vec<f64> = pairs.iter().map(|p| p.expected_time).collect();
        let scale = expected.iter().fold(1.0_f64, |acc, v| acc.max(v.abs()));

        let mut best: Option<Best> = None;
        let mut candidates = Vec::new();

        for degree in 1..pairs.len() {
            let model = CandidateModel::Polynomial { degree };
            let function = match Polynomial::fit(&observed, &expected, degree) {
                Ok(p) => CalibrationFunction::Polynomial(p),
                Err(e) => {
                    debug!("{} failed: {}", model, e);
                    candidates.push(failed(model, e));
                    break;
                }
            };
            let rms = self.rms(&function, &observed, &expected, scale, 0.0);
            if !self.consider(model, function, rms, min, max, &mut best, &mut candidates) {
                break;
            }
        }

        match fit_power_law(&observed, &expected) {
            Ok((function, penalty)) => {
                let rms = self.rms(&function, &observed, &expected, scale, penalty);
                self.consider(CandidateModel::PowerLaw, function, rms, min, max, &mut best, &mut candidates);
            }
            Err(e) => {
                debug!("power law failed: {}", e);
                candidates.push(failed(CandidateModel::PowerLaw, e));
            }
        }

        if self.config.use_interpolation {
            let mut points: Vec<(f64, f64)> = observed.iter().copied().zip(expected.iter().copied()).collect();
            points.sort_by(|a, b| a.0.total_cmp(&b.0));
            let (x, y): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();

            for kind in [InterpolantKind::Pchip, InterpolantKind::Akima] {
                let model = CandidateModel::Interpolant(kind);
                match HermiteInterpolant::build(kind, &x, &y) {
                    Ok(h) => {
                        let function = CalibrationFunction::MonotoneCubicInterpolant(h);
                        let rms = self.rms(&function, &observed, &expected, scale, 0.0);
                        self.consider(model, function, rms, min, max, &mut best, &mut candidates);
                    }
                    Err(e) => {
                        debug!("{} failed: {}", model, e);
                        candidates.push(failed(model, e));
                    }
                }
            }
        }

        let best = best.ok_or(CalibrationError::NoAcceptableModel)?;
        debug!("Selected calibration {} (RMS {:.6})", best.function.describe(), best.rms);
        Ok(Some(ModelSelection {
            function: best.function,
            rms: best.rms,
            candidates,
        }))
    }

    /// RMS of `function` plus a constant `offset`, floored to zero for exact fits
    fn rms(
        &self,
        function: &CalibrationFunction,
        observed: &[f64],
        expected: &[f64],
        scale: f64,
        offset: f64,
    ) -> f64 {
        let rms = stats::rms_error(observed.iter().map(|&t| function.evaluate(t) + offset), expected);
        if rms < EXACT_FIT_RMS * scale {
            0.0
        } else {
            rms
        }
    }

    /// Record a fitted candidate; returns `false` when it is not monotone
    #[allow(clippy::too_many_arguments)]
    fn consider(
        &self,
        model: CandidateModel,
        function: CalibrationFunction,
        rms: f64,
        min: f64,
        max: f64,
        best: &mut Option<Best>,
        candidates: &mut Vec<CandidateReport>,
    ) -> bool {
        if !function.is_strictly_increasing(min, max) {
            let rejected = CalibrationError::NonMonotoneModel {
                model: model.to_string(),
                min,
                max,
            };
            debug!("{}", rejected);
            candidates.push(CandidateReport {
                model,
                rms: Some(rms),
                outcome: CandidateOutcome::NonMonotone,
            });
            return false;
        }

        let improves = match best {
            None => rms.is_finite(),
            Some(current) => rms < current.rms - self.config.min_improvement * current.rms,
        };
        debug!("{}: RMS {:.6}{}", model, rms, if improves { " (accepted)" } else { "" });
        candidates.push(CandidateReport {
            model,
            rms: Some(rms),
            outcome: if improves {
                CandidateOutcome::Accepted
            } else {
                CandidateOutcome::NotImproved
            },
        });
        if improves {
            *best = Some(Best { function, rms });
        }
        true
    }
}

fn failed(model: CandidateModel, error: FitError) -> CandidateReport {
    CandidateReport {
        model,
        rms: None,
        outcome: CandidateOutcome::FitFailed(error.to_string()),
    }
}

/// `a * x^b + c` with a penalty pushing `b` back into `[0, 2]`
struct PenalizedPowerLaw;

impl PenalizedPowerLaw {
    fn penalty(b: f64) -> f64 {
        if b > 2.0 {
            (b - 1.0).abs() * POWER_LAW_PENALTY
        } else if b < 0.0 {
            (2.0 - b).abs() * POWER_LAW_PENALTY
        } else {
            0.0
        }
    }
}

impl Model for PenalizedPowerLaw {
    fn parameter_count(&self) -> usize {
        3
    }

    fn evaluate(&self, x: f64, p: &[f64]) -> f64 {
        p[0] * x.powf(p[1]) + p[2] + Self::penalty(p[1])
    }
}

/// Fit the power law seeded from a straight line; returns the function
/// without its penalty and the penalty at the optimum
fn fit_power_law(observed: &[f64], expected: &[f64]) -> Result<(CalibrationFunction, f64), FitError> {
    let line = Polynomial::fit(observed, expected, 1)?;
    let seed = [line.coefficients()[0], 1.0, line.coefficients()[1]];
    let report = LevenbergMarquardt::default().fit(&PenalizedPowerLaw, observed, expected, &seed)?;
    let [a, b, c] = [report.parameters[0], report.parameters[1], report.parameters[2]];
    if !(a.is_finite() && b.is_finite() && c.is_finite()) {
        return Err(FitError::Degenerate("non-finite power-law parameters".to_string()));
    }
    Ok((CalibrationFunction::PowerLaw { a, b, c }, PenalizedPowerLaw::penalty(b)))
}
