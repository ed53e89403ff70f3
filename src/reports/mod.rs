use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use inverted_wordles::answers::{self, WordCount};
use inverted_wordles::layout::FitOutcome;

pub fn print_counts_table(counts: &[WordCount]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Answer").add_attribute(Attribute::Bold),
        Cell::new("Count").fg(Color::Cyan),
    ]);
    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for c in counts {
        table.add_row(vec![
            Cell::new(&c.word),
            Cell::new(c.count).fg(Color::Cyan),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(answers::total(counts)).add_attribute(Attribute::Bold),
    ]);
    println!("\n{}", table);
}

pub fn print_placement_table(outcome: &FitOutcome) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Word").add_attribute(Attribute::Bold),
        Cell::new("Size").fg(Color::Cyan),
        Cell::new("X"),
        Cell::new("Y"),
        Cell::new("Rot"),
    ]);
    for i in 1..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for w in &outcome.placed {
        table.add_row(vec![
            Cell::new(&w.text).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.1}", w.size)).fg(Color::Cyan),
            Cell::new(format!("{:.0}", w.x)),
            Cell::new(format!("{:.0}", w.y)),
            Cell::new(format!("{:.0}", w.rotate)),
        ]);
    }
    println!("\n{}", table);

    let status = if outcome.is_complete() {
        Cell::new("complete").fg(Color::Green)
    } else {
        Cell::new("partial").fg(Color::Red)
    };
    let mut summary = Table::new();
    summary.load_preset(ASCII_FULL);
    summary.add_row(vec![
        Cell::new("Placed"),
        Cell::new(format!("{}/{}", outcome.placed.len(), outcome.requested)),
        status,
    ]);
    summary.add_row(vec![
        Cell::new("Attempts"),
        Cell::new(outcome.attempts),
        Cell::new(format!("scale {:.4}", outcome.scale_used)),
    ]);
    println!("{}", summary);
}
