// Interactive symptom picker
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;
mod timestamps;

use anyhow::Result;
pub use app::App;
use terminal::TerminalManager;

use crate::session::Session;
use crate::storage::KeyValueStore;

/// Run the interactive TUI until the user quits
pub fn run_interactive<S: KeyValueStore>(session: Session<S>) -> Result<()> {
    let mut manager = TerminalManager::new()?;
    let mut app = App::new(session);

    let res = app.run(manager.terminal_mut());

    manager.restore()?;
    res
}
