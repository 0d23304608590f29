/// Basic Table Example
///
/// This example demonstrates:
/// - Loading typed rows into a table
/// - Sorting by tapping headers
/// - Searching and stacking named filters
/// - Reading the row diffs a rendering layer would apply
/// - Fitting column widths to a frame
///
/// Run with `RUST_LOG=debug` to see the engine's own log output.

use gridstate::{CellValue, ColumnOrder, DataTable, RenderingHost, TableConfig, ViewUpdate};

struct ConsoleHost {
    frame_width: f32,
}

impl RenderingHost for ConsoleHost {
    fn frame_width(&self) -> f32 {
        self.frame_width
    }

    fn on_sort_changed(&mut self, order: Option<ColumnOrder>) {
        match order {
            Some(order) => println!("   [host] sort is now column {} {:?}", order.index, order.order),
            None => println!("   [host] sort cleared"),
        }
    }

    fn on_filter_changed(&mut self, search_text: &str, filters: &[String], visible_rows: usize) {
        println!(
            "   [host] search '{}', filters {:?}: {} row(s) visible",
            search_text, filters, visible_rows
        );
    }
}

fn print_rows(table: &DataTable) {
    for row in table.visible_rows() {
        println!("   {}", row.display_strings().join(" | "));
    }
}

fn print_diff(update: &ViewUpdate) {
    println!(
        "   diff: delete {:?}, insert {:?}",
        update.diff.deletions, update.diff.insertions
    );
}

fn main() {
    env_logger::init();

    println!("=== GridState Basic Table Example ===\n");

    // 1. Configure the table
    println!("1. Configuring table...");
    let config = TableConfig::default().with_searchable_columns(["Name", "City"]);
    let mut table = DataTable::with_host(config, Box::new(ConsoleHost { frame_width: 640.0 }));
    println!("   Searching columns {:?}\n", table.config().searchable_columns);

    // 2. Load rows
    println!("2. Loading rows...");
    let rows = vec![
        vec![CellValue::from("Alice"), CellValue::Int(30), CellValue::from("London")],
        vec![CellValue::from("Bob"), CellValue::Nil, CellValue::from("Paris")],
        vec![CellValue::from("Charlie"), CellValue::Int(25), CellValue::from("Amsterdam")],
        vec![CellValue::from("Diana"), CellValue::Int(35), CellValue::from("Oslo")],
    ];
    let headers = vec!["Name".to_string(), "Age".to_string(), "City".to_string()];
    let update = table.load(rows, headers).unwrap();
    println!("   Loaded {} rows", update.visible_rows.len());
    print_rows(&table);
    println!();

    // 3. Sort by age
    println!("3. Tapping the Age header...");
    table.on_header_tap(1).unwrap();
    print_rows(&table);
    println!("   Tapping again...");
    table.on_header_tap(1).unwrap();
    print_rows(&table);
    println!();

    // 4. Search
    println!("4. Searching for 'an'...");
    let update = table.set_search_text("an");
    print_rows(&table);
    print_diff(&update);
    println!();

    // 5. Stack a named filter
    println!("5. Adding filter 'o'...");
    let update = table.add_filter("o");
    print_rows(&table);
    print_diff(&update);
    println!();

    // 6. Clear everything
    println!("6. Clearing search, filters and sort...");
    table.set_search_text("");
    let update = table.clear_filters();
    print_diff(&update);
    table.clear_sort();
    print_rows(&table);
    println!();

    // 7. Column widths
    println!("7. Column widths for a 640pt frame:");
    for (header, width) in table.header_view_models().iter().zip(table.column_widths()) {
        println!("   {:<6} {:>6.1}", header.title(), width);
    }
    println!("   Content width: {:.1}", table.content_width());

    println!("\n=== Example Complete ===");
}
