use serde::Serialize;

use crate::models::{CompanyTable, Record, Selection, TableKind};

/// A rendered company table: heading, caption and rows aligned to columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub kind: TableKind,
    pub heading: String,
    pub caption: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell text by row index and column name
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.columns.iter().position(|name| name == column)?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }
}

/// Union of the rows' columns, in the order first observed
pub fn ordered_columns(records: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for column in record.columns() {
            if !columns.iter().any(|seen| seen == column) {
                columns.push(column.to_string());
            }
        }
    }
    columns
}

/// `None` when nothing is selected or the table has no rows for the company
pub fn bind_table(selection: &Selection, table: &CompanyTable) -> Option<TableView> {
    let records = table.rows_for(selection.name()?)?;
    let columns = ordered_columns(records);

    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| record.get(column).map(ToString::to_string).unwrap_or_default())
                .collect()
        })
        .collect();

    Some(TableView {
        kind: table.kind,
        heading: table.kind.heading().to_string(),
        caption: table.kind.caption().to_string(),
        columns,
        rows,
    })
}
