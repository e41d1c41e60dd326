use anyhow::Result;

use feedtui::cli::Flags;
use feedtui::controllers::start_app;
use feedtui::models::Session;

fn main() -> Result<()> {
    let flags = Flags::from_args();

    let session = Session::load(flags.fixture.as_deref())?;
    start_app(session)?;

    Ok(())
}
