use crate::WeatherError;
use std::path::Path;
use tracing::debug;

/// A fully materialized CSV export: one header row and every record as raw strings.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Table { headers, rows }
    }

    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self, WeatherError> {
        let path = path.as_ref();
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b',')
            .trim(csv::Trim::None)
            .from_path(path)?;
        Self::from_reader(&mut rdr).inspect(|table| {
            debug!(
                path = %path.display(),
                rows = table.rows.len(),
                columns = table.headers.len(),
                "loaded table"
            );
        })
    }

    pub fn from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> Result<Self, WeatherError> {
        let headers = rdr.headers()?.iter().map(String::from).collect();
        let rows: Vec<Vec<String>> = rdr
            .records()
            .map(|r| {
                let record = r?;
                Ok(record.iter().map(String::from).collect::<Vec<String>>())
            })
            .collect::<Result<Vec<_>, WeatherError>>()?;
        Ok(Table { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reader_keeps_padding() {
        let data = "REPORT_TYPE,DATE\nSOD  ,2020-05-10\n";
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        let table = Table::from_reader(&mut rdr).unwrap();
        assert_eq!(table.headers(), ["REPORT_TYPE", "DATE"]);
        assert_eq!(table.rows()[0][0], "SOD  ");
        assert_eq!(table.column_index("DATE"), Some(1));
        assert_eq!(table.column_index("Pressure"), None);
    }

    #[test]
    fn test_from_reader_ragged_row() {
        let data = "REPORT_TYPE,DATE\nSOD  \n";
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        assert!(matches!(
            Table::from_reader(&mut rdr),
            Err(WeatherError::Csv(_))
        ));
    }

    #[test]
    fn test_from_csv_missing_file() {
        let err = Table::from_csv("/nonexistent/weather.csv").unwrap_err();
        assert!(matches!(err, WeatherError::Csv(_)));
        assert!(!err.is_validation());
    }
}
