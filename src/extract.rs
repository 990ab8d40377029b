use crate::{Table, WeatherError};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// `REPORT_TYPE` value of a daily-summary record. Matched exactly, padding included.
pub const REPORT_FILTER: &str = "SOD  ";

pub const REPORT_TYPE_FIELD: &str = "REPORT_TYPE";
pub const DATE_FIELD: &str = "DATE";

/// Columns the tool is allowed to analyze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisColumn {
    DailyAverageDryBulbTemperature,
    DailyAverageWindSpeed,
    DailyPrecipitation,
}

pub const ALLOWED_COLUMNS: [AnalysisColumn; 3] = [
    AnalysisColumn::DailyAverageDryBulbTemperature,
    AnalysisColumn::DailyAverageWindSpeed,
    AnalysisColumn::DailyPrecipitation,
];

impl AnalysisColumn {
    pub fn name(self) -> &'static str {
        match self {
            AnalysisColumn::DailyAverageDryBulbTemperature => "DailyAverageDryBulbTemperature",
            AnalysisColumn::DailyAverageWindSpeed => "DailyAverageWindSpeed",
            AnalysisColumn::DailyPrecipitation => "DailyPrecipitation",
        }
    }
}

impl fmt::Display for AnalysisColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnalysisColumn {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALLOWED_COLUMNS
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| WeatherError::InvalidColumn(s.to_string()))
    }
}

fn field_index(table: &Table, name: &str) -> Result<usize, WeatherError> {
    table
        .column_index(name)
        .ok_or_else(|| WeatherError::MissingField(name.to_string()))
}

/// Collects `field` from every daily-summary row, in row order.
///
/// `field` is only required once a matching row exists, so a table with no
/// daily summaries yields an empty list even when the field is absent.
fn collect_daily(table: &Table, field: &str) -> Result<Vec<String>, WeatherError> {
    if table.rows().is_empty() {
        return Ok(Vec::new());
    }
    let report_idx = field_index(table, REPORT_TYPE_FIELD)?;
    let field_idx = table.column_index(field);

    let missing = || WeatherError::MissingField(field.to_string());
    let values = table
        .rows()
        .iter()
        .filter(|row| row.get(report_idx).map(String::as_str) == Some(REPORT_FILTER))
        .map(|row| {
            field_idx
                .and_then(|idx| row.get(idx))
                .cloned()
                .ok_or_else(missing)
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!(
        field,
        rows = table.rows().len(),
        matched = values.len(),
        "filtered daily summary records"
    );
    Ok(values)
}

/// Raw values of `column` for every row whose `REPORT_TYPE` is exactly [`REPORT_FILTER`].
///
/// `column` must name one of [`ALLOWED_COLUMNS`]; anything else is rejected
/// with [`WeatherError::InvalidColumn`] regardless of the table contents.
pub fn extract_column_values(table: &Table, column: &str) -> Result<Vec<String>, WeatherError> {
    let column: AnalysisColumn = column.parse()?;
    collect_daily(table, column.name())
}

/// `DATE` stamps of the same rows [`extract_column_values`] selects.
pub fn extract_dates(table: &Table) -> Result<Vec<String>, WeatherError> {
    collect_daily(table, DATE_FIELD)
}
