use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};
use weather::{Invocation, Report, WeatherError, render_chart, run};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Min, max, average, listing and charts for NOAA daily-summary weather exports.",
    long_about = None
)]
struct Args {
    /// CSV export with REPORT_TYPE, DATE and the analysis column.
    file: String,
    /// DailyAverageDryBulbTemperature, DailyAverageWindSpeed or DailyPrecipitation.
    column: String,
    /// min, max, avg, list or chart.
    operation: String,
}

fn execute(args: Args) -> Result<(), WeatherError> {
    let outcome = run(Invocation {
        file_path: args.file,
        column: args.column,
        operation: args.operation,
    })?;
    match &outcome.report {
        Report::Chart(series) => render_chart(series)?,
        report => println!("{report}"),
    }
    println!("{}", outcome.invocation);
    Ok(())
}

fn main() -> ExitCode {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_validation() => {
            println!("{e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            debug!(error = ?e, "run failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
