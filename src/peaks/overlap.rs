use log::debug;

use super::Peak;

/// Remove overlap between neighbouring peaks in one left-to-right pass
///
/// Peaks are ordered by apex time. When a peak ends at or after the start of
/// the next one, the overlapping span is split in proportion to the two
/// maximum intensities: the left peak keeps samples up to the boundary and
/// the right peak keeps samples after it. A left peak that loses all of its
/// samples is removed and the right peak is compared with the peak before it.
/// Empty peaks never survive. Returns the number of truncations performed.
pub fn resolve_overlaps(peaks: &mut Vec<Peak>) -> usize {
    peaks.sort_by(|a, b| a.apex_time.total_cmp(&b.apex_time));

    let mut truncations = 0;
    let mut kept: Vec<Peak> = Vec::with_capacity(peaks.len());

    for mut next in peaks.drain(..) {
        if next.samples.is_empty() {
            continue;
        }
        while let Some(current) = kept.last_mut() {
            let (Some(current_end), Some(next_start)) = (current.end_time(), next.start_time())
            else {
                break;
            };
            if current_end < next_start {
                break;
            }

            let overlap = current_end - next_start;
            let a = current.max_intensity();
            let b = next.max_intensity();
            let share = if a + b > 0.0 { a / (a + b) } else { 0.5 };
            let boundary = next_start + overlap * share;
            debug!(
                "Overlap of {:.4} between peaks at {:.4} and {:.4}, split at {:.4}",
                overlap, current.apex_time, next.apex_time, boundary
            );

            current.samples.retain(|&(t, _)| t <= boundary);
            next.samples.retain(|&(t, _)| t > boundary);
            truncations += 1;

            if current.samples.is_empty() {
                kept.pop();
                continue;
            }
            break;
        }
        if !next.samples.is_empty() {
            kept.push(next);
        }
    }

    *peaks = kept;
    truncations
}
