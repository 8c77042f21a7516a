/// Errors raised while building, reading or transforming a trace
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// Time and intensity channels differ in length
    #[error("Length mismatch: {time} time values, {intensity} intensity values")]
    LengthMismatch {
        /// Number of time values
        time: usize,
        /// Number of intensity values
        intensity: usize,
    },

    /// A time or intensity value is NaN or infinite
    #[error("Non-finite value at sample {index}")]
    NonFinite {
        /// Offending sample
        index: usize,
    },

    /// Time values must be strictly increasing
    #[error("Time axis is not strictly increasing at sample {index}")]
    NotIncreasing {
        /// First sample that is not later than its predecessor
        index: usize,
    },

    /// I/O error while reading or writing a trace file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the TSV reader or writer
    #[error("TSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// A data line could not be parsed as `time\tintensity`
    #[error("Line {line}: {message}")]
    ParseError {
        /// 1-based line number
        line: u64,
        /// What went wrong
        message: String,
    },

    /// Smoothing parameters do not fit the trace
    #[error("Invalid smoothing parameters: {0}")]
    InvalidSmoothing(String),
}
