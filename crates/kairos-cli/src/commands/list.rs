use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use crate::scenarios;

pub fn run() -> Result<(), String> {
    println!("  {}", "Scenarios".bold().underline());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Max duration", "Actions", "Description"]);
    for scenario in scenarios::all() {
        table.add_row(vec![
            scenario.name.to_string(),
            scenario.max_duration.to_string(),
            (scenario.catalog)().len().to_string(),
            scenario.description.to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}
