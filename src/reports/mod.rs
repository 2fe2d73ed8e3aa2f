use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use synapse::scorer::ScoreDetails;

fn penalty_cell(penalty: u64) -> Cell {
    let cell = Cell::new(penalty);
    if penalty > 0 {
        cell.fg(Color::Red)
    } else {
        cell.fg(Color::Green)
    }
}

/// One row per group with its repeat penalty.
pub fn print_pairing_table(title: &str, details: &ScoreDetails) {
    println!("\n{}", title);

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Members").add_attribute(Attribute::Bold),
        Cell::new("Repeat Penalty").add_attribute(Attribute::Bold),
        Cell::new("Seen In").add_attribute(Attribute::Bold),
    ]);

    for (i, g) in details.groups.iter().enumerate() {
        let seen_in = if g.matched_entries.is_empty() {
            "-".to_string()
        } else {
            g.matched_entries
                .iter()
                .map(|idx| format!("#{}", idx + 1))
                .collect::<Vec<_>>()
                .join(" ")
        };

        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(g.group.join("\n")),
            penalty_cell(g.penalty),
            Cell::new(seen_in),
        ]);
    }

    if let Some(col) = table.column_mut(2) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    println!("{}", table);
    println!(
        "Total repeat score: {} ({} of {} groups repeat history)",
        details.total,
        details.repeats().count(),
        details.groups.len()
    );
}
