//! Binary entry point: parse options, start the file logger, open the session
//! store, and drive the Ratatui event loop until the user quits.
use clap::Parser;
use employee_records::cli::Cli;
use employee_records::logging::init_logging;
use employee_records::{open_session_store, run_app, seed_employees, App};
use log::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_path = init_logging(cli.log_level, cli.log_file.clone())?;
    info!("logging to {}", log_path.display());

    let conn = open_session_store()?;
    if !cli.no_seed {
        seed_employees(&conn)?;
    }

    let mut app = App::from_store(conn, cli.page_size)?;
    let result = run_app(&mut app);
    if let Err(err) = &result {
        log::error!("exiting with error: {err:#}");
    }
    result
}
