//! The `oefenen levels` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use oefenen_core::cefr::CefrLevel;

pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Niveau", "Groep", "Omschrijving"]);

    for level in CefrLevel::ALL {
        table.add_row(vec![
            Cell::new(level),
            Cell::new(level.band()),
            Cell::new(level.descriptor()),
        ]);
    }

    println!("{table}");
    Ok(())
}
