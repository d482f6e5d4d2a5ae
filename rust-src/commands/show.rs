//! Show command - print the dashboard once.

use std::io::{self, IsTerminal};

use anyhow::Result;

use crate::dashboard::{DashboardView, RenderOptions};
use crate::data::STORE;
use crate::visualization::{render_text, TextStyle};


/// Run the show command.
pub fn run(options: RenderOptions, hide_atomicity: bool, no_color: bool) -> Result<()> {
    let style = if no_color || !io::stdout().is_terminal() {
        TextStyle::Plain
    } else {
        TextStyle::Color
    };

    let mut view = DashboardView::new(&STORE, options);
    if hide_atomicity {
        view.flip();
    }
    print!("{}", render_text(view.document(), style));

    Ok(())
}
