use super::Peak;

/// Pick up to `chunks` calibrant candidates spread over the detected peaks
///
/// The span from the earliest to the latest apex is cut into `chunks` equal
/// time intervals (the last one closed); each interval contributes its most
/// intense peak. Intervals without a peak contribute nothing.
pub fn select_calibrants(peaks: &[Peak], chunks: usize) -> Vec<Peak> {
    if peaks.is_empty() || chunks == 0 {
        return Vec::new();
    }

    let (first, last) = peaks.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), p| (lo.min(p.apex_time), hi.max(p.apex_time)),
    );
    let width = (last - first) / chunks as f64;

    let mut best: Vec<Option<&Peak>> = vec![None; chunks];
    for peak in peaks {
        let index = if width > 0.0 {
            (((peak.apex_time - first) / width).floor() as usize).min(chunks - 1)
        } else {
            0
        };
        match best[index] {
            Some(current) if peak.max_intensity() <= current.max_intensity() => {}
            _ => best[index] = Some(peak),
        }
    }

    best.into_iter().flatten().cloned().collect()
}
