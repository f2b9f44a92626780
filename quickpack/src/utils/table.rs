//! Table formatting utilities

use prettytable::{Cell, Row, Table};

/// Create a table with bold headers
pub fn create_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(*prettytable::format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(
        headers
            .iter()
            .map(|header| Cell::new(header).style_spec("b"))
            .collect(),
    ));
    table
}

/// Add a row of plain cells
pub fn add_table_row(table: &mut Table, cells: &[String]) {
    table.add_row(Row::new(cells.iter().map(|cell| Cell::new(cell)).collect()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_rows() {
        let mut table = create_table(&["Type", "Files"]);
        add_table_row(&mut table, &["vmt".to_string(), "3".to_string()]);
        add_table_row(&mut table, &["vtf".to_string(), "2".to_string()]);
        assert_eq!(table.len(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("vmt"));
        assert!(rendered.contains("Files"));
    }
}
