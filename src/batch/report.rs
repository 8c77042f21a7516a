use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use super::{BatchJob, FileOutcome};

/// Outcome class of one file
#[derive(Debug, Clone, PartialEq)]
pub enum FileStatus {
    /// Every step succeeded
    Ok,
    /// Processed, but some analytes could not be quantified
    Warning(String),
    /// The pipeline stopped with an error
    Failed(String),
}

impl FileStatus {
    fn is_ok(&self) -> bool {
        matches!(self, FileStatus::Ok)
    }

    fn is_failed(&self) -> bool {
        matches!(self, FileStatus::Failed(_))
    }
}

/// One line of the batch report
#[derive(Debug, Clone)]
pub struct ReportEntry {
    /// Input file
    pub file: String,
    /// What the pipeline did, e.g. the calibration used
    pub detail: String,
    /// Outcome class
    pub status: FileStatus,
}

/// Per-file overview of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per input file, in input order
    pub entries: Vec<ReportEntry>,
}

impl BatchReport {
    /// Build the report for the outcomes of `job`
    pub fn from_outcomes(outcomes: &[FileOutcome], job: &BatchJob) -> Self {
        let expected = job.analytes.as_ref().map(|a| a.len());
        let entries = outcomes
            .iter()
            .map(|outcome| {
                let file = outcome.path.display().to_string();
                match &outcome.result {
                    Err(e) => ReportEntry {
                        file,
                        detail: String::new(),
                        status: FileStatus::Failed(e.to_string()),
                    },
                    Ok(analysis) => {
                        let mut detail = Vec::new();
                        if analysis.baseline_corrected {
                            detail.push("baseline corrected".to_string());
                        }
                        if let Some(calibration) = &analysis.calibration {
                            detail.push(format!(
                                "calibrated on {} peaks: {}",
                                calibration.pairs.len(),
                                calibration.selection.function.describe()
                            ));
                        }
                        if expected.is_some() {
                            detail.push(format!("{} analytes", analysis.results.len()));
                        }
                        let status = match expected {
                            Some(n) if analysis.results.len() < n => FileStatus::Warning(format!(
                                "{} of {} analytes could not be located",
                                n - analysis.results.len(),
                                n
                            )),
                            _ => FileStatus::Ok,
                        };
                        ReportEntry {
                            file,
                            detail: detail.join(", "),
                            status,
                        }
                    }
                }
            })
            .collect();
        Self { entries }
    }

    /// Whether any file failed
    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(|e| e.status.is_failed())
    }

    /// Files processed without remarks
    pub fn success_count(&self) -> usize {
        self.entries.iter().filter(|e| e.status.is_ok()).count()
    }

    /// Files processed with warnings
    pub fn warning_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.status, FileStatus::Warning(_)))
            .count()
    }

    /// Files that failed
    pub fn failure_count(&self) -> usize {
        self.entries.iter().filter(|e| e.status.is_failed()).count()
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static WARN: Emoji<'_, '_> = Emoji("⚠", "[WARN]");
            static FAIL: Emoji<'_, '_> = Emoji("✗", "[FAIL]");

            let mut output = String::new();
            output.push_str(&format!("{}\n", style("Batch Report").bold().cyan()));
            output.push_str(&format!("{}\n\n", style("============").cyan()));

            for entry in &self.entries {
                let (symbol, color_fn): (_, fn(&str) -> console::StyledObject<&str>) =
                    match &entry.status {
                        FileStatus::Ok => (OK, |s| style(s).green()),
                        FileStatus::Warning(_) => (WARN, |s| style(s).yellow()),
                        FileStatus::Failed(_) => (FAIL, |s| style(s).red()),
                    };

                output.push_str(&format!("[{}] {}", symbol, color_fn(&entry.file)));
                if !entry.detail.is_empty() {
                    output.push_str(&format!(" ({})", entry.detail));
                }
                match &entry.status {
                    FileStatus::Ok => output.push('\n'),
                    FileStatus::Warning(msg) => {
                        output.push_str(&format!(" - {}: {}\n", style("WARNING").yellow().bold(), msg));
                    }
                    FileStatus::Failed(msg) => {
                        output.push_str(&format!(" - {}: {}\n", style("FAILED").red().bold(), msg));
                    }
                }
            }

            output.push('\n');
            output.push_str(&format!(
                "{}: {} processed, {} with warnings, {} failed\n",
                style("Summary").bold(),
                style(self.success_count()).green(),
                style(self.warning_count()).yellow(),
                style(self.failure_count()).red()
            ));
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Batch Report")?;
        writeln!(f, "============")?;
        writeln!(f)?;

        for entry in &self.entries {
            let symbol = match &entry.status {
                FileStatus::Ok => "✓",
                FileStatus::Warning(_) => "⚠",
                FileStatus::Failed(_) => "✗",
            };
            write!(f, "[{}] {}", symbol, entry.file)?;
            if !entry.detail.is_empty() {
                write!(f, " ({})", entry.detail)?;
            }
            match &entry.status {
                FileStatus::Ok => writeln!(f)?,
                FileStatus::Warning(msg) => writeln!(f, " - WARNING: {}", msg)?,
                FileStatus::Failed(msg) => writeln!(f, " - FAILED: {}", msg)?,
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} processed, {} with warnings, {} failed",
            self.success_count(),
            self.warning_count(),
            self.failure_count()
        )
    }
}
