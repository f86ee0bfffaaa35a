//! Escape a CSS ID selector.

use anyhow::Result;
use clap::Args;

use crate::plugin::escape_selector;

#[derive(Args, Debug)]
pub struct EscapeCommand {
    /// Selector to escape, e.g. `#form:name`
    selector: String,
}

impl EscapeCommand {
    pub fn execute(self) -> Result<()> {
        println!("{}", escape_selector(&self.selector));
        Ok(())
    }
}
