use crate::WeatherError;
use crate::chart::ChartSeries;
use statrs::statistics::{Data, Max, Min};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Min,
    Max,
    Avg,
    List,
    Chart,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Min,
        Operation::Max,
        Operation::Avg,
        Operation::List,
        Operation::Chart,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Min => "min",
            Operation::Max => "max",
            Operation::Avg => "avg",
            Operation::List => "list",
            Operation::Chart => "chart",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| WeatherError::InvalidOperation(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Min(f64),
    Max(f64),
    Avg(f64),
    List(Vec<f64>),
    Chart(ChartSeries),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Min(v) | Report::Max(v) | Report::Avg(v) => write!(f, "{:?}", v),
            Report::List(values) => write!(f, "{:?}", values),
            Report::Chart(series) => write!(
                f,
                "{} ({} points)",
                series.column(),
                series.points().len()
            ),
        }
    }
}

/// Plain sum over count, summed left to right.
fn average(numbers: &[f64]) -> f64 {
    numbers.iter().sum::<f64>() / numbers.len() as f64
}

/// Runs `operation` over the coerced numbers.
///
/// `min`, `max` and `avg` of an empty sequence have no value and yield
/// [`WeatherError::EmptySeries`].
pub fn summarize(
    operation: Operation,
    column: &str,
    numbers: Vec<f64>,
    dates: &[String],
) -> Result<Report, WeatherError> {
    match operation {
        Operation::List => Ok(Report::List(numbers)),
        Operation::Chart => Ok(Report::Chart(ChartSeries::new(column, dates, &numbers))),
        _ if numbers.is_empty() => Err(WeatherError::EmptySeries(operation)),
        Operation::Min => Ok(Report::Min(Data::new(numbers).min())),
        Operation::Max => Ok(Report::Max(Data::new(numbers).max())),
        Operation::Avg => Ok(Report::Avg(average(&numbers))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("2020-05-{:02}", 10 + i)).collect()
    }

    #[test]
    fn test_parse_operation() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        }
        let err = "median".parse::<Operation>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid operation: median");
        assert!("MIN".parse::<Operation>().is_err());
    }

    #[test]
    fn test_aggregates() {
        let numbers = vec![55.0, 61.5, 48.5];
        let d = dates(3);
        assert_eq!(
            summarize(Operation::Min, "c", numbers.clone(), &d).unwrap(),
            Report::Min(48.5)
        );
        assert_eq!(
            summarize(Operation::Max, "c", numbers.clone(), &d).unwrap(),
            Report::Max(61.5)
        );
        match summarize(Operation::Avg, "c", numbers, &d).unwrap() {
            Report::Avg(avg) => assert!((avg - 55.0).abs() < 1e-9),
            other => panic!("unexpected report {other:?}"),
        }
    }

    #[test]
    fn test_average_is_sum_over_count() {
        let numbers = vec![0.1, 0.2, 0.4];
        let report = summarize(Operation::Avg, "c", numbers, &dates(3)).unwrap();
        assert_eq!(report.to_string(), "0.23333333333333336");
    }

    #[test]
    fn test_empty_series() {
        for op in [Operation::Min, Operation::Max, Operation::Avg] {
            assert!(matches!(
                summarize(op, "c", vec![], &[]),
                Err(WeatherError::EmptySeries(o)) if o == op
            ));
        }
        assert_eq!(
            summarize(Operation::List, "c", vec![], &[]).unwrap(),
            Report::List(vec![])
        );
    }

    #[test]
    fn test_display_keeps_decimal_point() {
        assert_eq!(Report::Min(55.0).to_string(), "55.0");
        assert_eq!(Report::Avg(-0.25).to_string(), "-0.25");
        assert_eq!(Report::List(vec![55.0, 60.5]).to_string(), "[55.0, 60.5]");
    }

    #[test]
    fn test_chart_report() {
        let d = dates(2);
        let report = summarize(Operation::Chart, "DailyPrecipitation", vec![0.1, 0.0], &d).unwrap();
        assert_eq!(report.to_string(), "DailyPrecipitation (2 points)");
    }
}
