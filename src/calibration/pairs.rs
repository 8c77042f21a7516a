use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{CalibrationError, ReferencePeak};
use crate::config::AnalysisWindow;
use crate::noise::{self, BackgroundConfig};
use crate::numeric::stats;
use crate::trace::Trace;

/// One correspondence between an expected and an observed retention time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePair {
    /// Retention time from the reference list
    pub expected_time: f64,
    /// Apex time found in the trace
    pub observed_time: f64,
}

/// Locate every reference peak in `trace` and keep those that stand out
///
/// The observed time is the most intense sample within `expected ± window`.
/// Its signal-to-noise is measured against the background of
/// `expected ± background.window`, clipped to the analysis window; pairs
/// below `min_sn` are dropped.
pub fn determine_time_pairs(
    trace: &Trace,
    references: &[ReferencePeak],
    window: &AnalysisWindow,
    background: &BackgroundConfig,
    min_sn: f64,
) -> Result<Vec<TimePair>, CalibrationError> {
    let time = trace.time();
    let intensity = trace.intensity();
    let mut pairs = Vec::with_capacity(references.len());

    for reference in references {
        let search = trace.index_range(
            reference.expected_time - reference.window,
            reference.expected_time + reference.window,
        );
        let Some(offset) = stats::argmax(&intensity[search.clone()]) else {
            warn!(
                "No samples around {} ({:.2}), skipping",
                reference.label, reference.expected_time
            );
            continue;
        };
        let apex = search.start + offset;

        let region = window.clip(
            reference.expected_time - background.window,
            reference.expected_time + background.window,
        );
        let region = trace.index_range(region.start, region.end);
        if region.is_empty() {
            warn!(
                "No background samples for {} inside the analysis window, skipping",
                reference.label
            );
            continue;
        }
        let estimate = noise::estimate(&intensity[region], background)?;
        let sn = estimate.signal_to_noise(intensity[apex]);

        if sn >= min_sn {
            pairs.push(TimePair {
                expected_time: reference.expected_time,
                observed_time: time[apex],
            });
        } else {
            debug!(
                "{} at {:.4}: S/N {:.1} below {:.1}",
                reference.label, time[apex], sn, min_sn
            );
        }
    }

    Ok(pairs)
}
