//! Combined summary table of a batch: a settings header followed by one
//! section per metric, with files as rows and analytes as columns.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::FileAnalysis;
use crate::config::AnalysisConfig;
use crate::noise::{BackgroundMethod, NoiseMode};
use crate::numeric::format_float;
use crate::quantitation::QuantitationResult;

type Metric = fn(&QuantitationResult) -> Option<f64>;

fn metrics() -> [(&'static str, Metric); 7] {
    [
        ("Peak Area", |r| Some(r.area)),
        ("Peak Noise (standard deviation of integration window)", |r| {
            Some(r.peak_noise)
        }),
        ("Background", |r| Some(r.background)),
        ("Noise", |r| Some(r.noise)),
        ("Signal-to-Noise", |r| Some(r.signal_to_noise)),
        ("GPQ (Gaussian Peak Quality)", |r| r.gaussian_residual),
        ("FWHM", |r| r.fwhm),
    ]
}

/// `YYYY-MM-DD-HHMMZ_summary.txt` for `timestamp`
pub fn summary_file_name(timestamp: &DateTime<Utc>) -> String {
    format!("{}_summary.txt", timestamp.format("%Y-%m-%d-%H%MZ"))
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "NAN".to_string(), format_float)
}

/// Analyte columns: labels in first-seen order with their expected times
fn columns(analyses: &[&FileAnalysis]) -> Vec<(String, f64)> {
    let mut columns: Vec<(String, f64)> = Vec::new();
    for result in analyses.iter().flat_map(|a| &a.results) {
        if !columns.iter().any(|(label, _)| *label == result.label) {
            columns.push((result.label.clone(), result.expected_time));
        }
    }
    columns
}

fn find<'a>(analysis: &'a FileAnalysis, label: &str) -> Option<&'a QuantitationResult> {
    analysis.results.iter().find(|r| r.label == label)
}

fn write_settings<W: Write>(
    writer: &mut W,
    config: &AnalysisConfig,
    timestamp: &DateTime<Utc>,
) -> io::Result<()> {
    writeln!(writer, "chromapeak Settings")?;
    writeln!(writer, "Version:\t{}", env!("CARGO_PKG_VERSION"))?;
    writeln!(writer, "Generated:\t{}", timestamp.to_rfc3339())?;
    writeln!(writer, "Start Time:\t{}", format_float(config.window.start))?;
    writeln!(writer, "End Time:\t{}", format_float(config.window.end))?;
    writeln!(writer, "Baseline Order:\t{}", config.baseline.order)?;
    writeln!(
        writer,
        "Background Window:\t{}",
        format_float(config.background.window)
    )?;
    match config.background.method {
        BackgroundMethod::Mt => {
            writeln!(writer, "Background and noise method:\tMT")?;
            writeln!(writer, "MT Slice Points:\t{}", config.background.slice_points)?;
        }
        BackgroundMethod::Noban => {
            writeln!(writer, "Background and noise method:\tNOBAN")?;
            writeln!(
                writer,
                "NOBAN Initial Estimate:\t{}",
                format_float(config.background.noban_start)
            )?;
        }
    }
    let noise = match config.background.noise {
        NoiseMode::Rms => "RMS",
        NoiseMode::Mm => "MM",
    };
    writeln!(writer, "Noise:\t{}", noise)?;
    writeln!(writer)
}

fn write_section<W, F>(
    writer: &mut W,
    title: &str,
    columns: &[(String, f64)],
    analyses: &[&FileAnalysis],
    row_label: impl Fn(&FileAnalysis) -> String,
    value: F,
) -> io::Result<()>
where
    W: Write,
    F: Fn(&FileAnalysis, &str) -> String,
{
    write!(writer, "{}", title)?;
    for (label, _) in columns {
        write!(writer, "\t{}", label)?;
    }
    writeln!(writer)?;
    for (_, time) in columns {
        write!(writer, "\t{}", format_float(*time))?;
    }
    writeln!(writer)?;

    for &analysis in analyses {
        write!(writer, "{}", row_label(analysis))?;
        for (label, _) in columns {
            write!(writer, "\t{}", value(analysis, label.as_str()))?;
        }
        writeln!(writer)?;
    }
    writeln!(writer)
}

/// Write the combined summary of `analyses`
pub fn write_summary<W: Write>(
    analyses: &[&FileAnalysis],
    config: &AnalysisConfig,
    timestamp: &DateTime<Utc>,
    mut writer: W,
) -> io::Result<()> {
    write_settings(&mut writer, config, timestamp)?;
    let columns = columns(analyses);
    let plain = |a: &FileAnalysis| a.name.clone();

    for (title, metric) in metrics() {
        write_section(&mut writer, title, &columns, analyses, plain, |a, label| {
            cell(find(a, label).and_then(metric))
        })?;
    }

    write_section(
        &mut writer,
        "Relative Peak Area (TAN)",
        &columns,
        analyses,
        plain,
        |a, label| {
            let total: f64 = a.results.iter().map(|r| r.area).sum();
            cell(find(a, label).map(|r| if total == 0.0 { 0.0 } else { r.area / total }))
        },
    )?;

    write_section(
        &mut writer,
        "Retention Time Residual",
        &columns,
        analyses,
        |a| match &a.calibration {
            Some(c) => format!("{} [{}]", a.name, c.selection.function.describe()),
            None => a.name.clone(),
        },
        |a, label| {
            cell(find(a, label).and_then(|r| r.peak_time.map(|t| (t - r.expected_time).abs())))
        },
    )?;

    write_section(&mut writer, "Retention Time", &columns, analyses, plain, |a, label| {
        cell(find(a, label).and_then(|r| r.peak_time))
    })?;

    writer.flush()
}

/// Write the summary into `dir` under a timestamped name; returns its path
pub fn write_summary_file(
    dir: &Path,
    analyses: &[&FileAnalysis],
    config: &AnalysisConfig,
    timestamp: &DateTime<Utc>,
) -> io::Result<PathBuf> {
    let path = dir.join(summary_file_name(timestamp));
    let file = File::create(&path)?;
    write_summary(analyses, config, timestamp, BufWriter::new(file))?;
    Ok(path)
}
