mod chart;
mod coerce;
mod extract;
mod report;
mod table;

pub use chart::{ChartSeries, draw_chart, export_json, export_path, render_chart, short_date};
pub use coerce::coerce;
pub use extract::{
    ALLOWED_COLUMNS, AnalysisColumn, DATE_FIELD, REPORT_FILTER, REPORT_TYPE_FIELD,
    extract_column_values, extract_dates,
};
pub use report::{Operation, Report, summarize};
pub use table::Table;

use std::fmt;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Invalid column: {0}")]
    InvalidColumn(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("missing field {0} in header row")]
    MissingField(String),
    #[error("cannot compute {0} of an empty series")]
    EmptySeries(Operation),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("terminal error: {0}")]
    Terminal(String),
}

impl WeatherError {
    /// Rejected user input, reported as a plain message rather than a failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WeatherError::InvalidColumn(_) | WeatherError::InvalidOperation(_)
        )
    }
}

/// The three positional arguments of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub file_path: String,
    pub column: String,
    pub operation: String,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{'file_path': '{}', 'column': '{}', 'operation': '{}'}}",
            self.file_path, self.column, self.operation
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub invocation: Invocation,
    pub report: Report,
}

/// Reads the export once, pulls the daily-summary column and dates out of it,
/// and applies the requested operation.
///
/// Checks happen in pipeline order: the file must load before the column is
/// validated, and the operation is validated last.
pub fn run(invocation: Invocation) -> Result<Outcome, WeatherError> {
    let table = Table::from_csv(&invocation.file_path)?;

    let (values, dates) = rayon::join(
        || extract_column_values(&table, &invocation.column),
        || extract_dates(&table),
    );
    let values = values?;
    let dates = dates?;
    let numbers = coerce(&values);
    debug!(
        raw = values.len(),
        numeric = numbers.len(),
        dates = dates.len(),
        "coerced column values"
    );

    let operation: Operation = invocation.operation.parse()?;
    let report = summarize(operation, &invocation.column, numbers, &dates)?;
    Ok(Outcome { invocation, report })
}
