//! Interactive terminal front end.

use anyhow::Result;
use cursive::event::Event;
use solar_core::{CityTable, FormSession};
use tracing::info;

use crate::logging;
use crate::views::show_estimator_form;

/// Runs the estimator form until the user quits.
///
/// Console logging is paused while Cursive owns the terminal; the log file,
/// when configured, keeps receiving records.
pub fn run_interactive(cities: CityTable) -> Result<()> {
    info!(cities = cities.len(), "starting interactive form");
    logging::set_console_enabled(false)?;

    let mut siv = cursive::default();
    siv.set_user_data(FormSession::new(cities));
    siv.add_global_callback(Event::CtrlChar('q'), |s| s.quit());

    show_estimator_form(&mut siv);
    siv.run();

    logging::set_console_enabled(true)?;
    info!("interactive form closed");
    Ok(())
}
