use std::process::ExitCode;

use log::{error, info};

use court_booker::booking::{HttpSurface, HumanPacing};
use court_booker::config::Config;
use court_booker::display::{format_run_report, write_report_to_file};
use court_booker::notify::send_pushover_message;
use court_booker::orchestrator::run_bookings;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Configuration error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut surface = HttpSurface::new();
    let mut pacing = HumanPacing;

    let report = match run_bookings(&config, &mut surface, &mut pacing) {
        Ok(report) => report,
        Err(err) => {
            error!("Booking run failed: {}", err);
            send_pushover_message(
                config.pushover.as_ref(),
                "Court Bookings - Error",
                &format!("Booking run failed with error:\n{}", err),
            );
            return ExitCode::FAILURE;
        }
    };

    let summary = format_run_report(&report);
    info!("Booking results:\n{}", summary);

    if let Some(ref path) = config.report_path {
        if let Err(err) = write_report_to_file(&report, path) {
            error!("Failed to write run report to {}: {}", path.display(), err);
        }
    }

    let title = if !report.newly_booked.is_empty() {
        "Court Bookings - Success!"
    } else if !report.failed.is_empty() {
        "Court Bookings - No Availability"
    } else {
        "Court Bookings - All Already Booked"
    };
    send_pushover_message(config.pushover.as_ref(), title, &summary);

    // Per-target failures do not fail the run; callers read the summary
    ExitCode::SUCCESS
}
