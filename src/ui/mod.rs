pub mod confirm_overlay;
mod help;
mod list;

use crate::app::App;
use crate::storage::KeyValueStore;
use ratatui::Frame;

/// Top-level render dispatch.
pub fn render<S: KeyValueStore>(app: &App<S>, frame: &mut Frame) {
    list::render(app, frame);

    // The dialog sits above the list and blocks it
    if let Some(dialog) = &app.confirm {
        dialog.render(frame);
    }

    if app.show_help {
        help::render(frame);
    }
}
