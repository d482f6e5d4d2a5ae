//! Contact command - the call-to-action link.

use anyhow::Result;

use crate::config::contact_href;
use crate::visualization::open_target;


/// Run the contact command.
pub fn run(should_open: bool) -> Result<()> {
    let href = contact_href();
    println!("{href}");

    if should_open {
        println!("Opening mail client...");
        open_target(&href)?;
    }

    Ok(())
}
