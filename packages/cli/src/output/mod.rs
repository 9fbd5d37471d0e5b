use comfy_table::{presets::UTF8_BORDERS_ONLY, Cell, ContentArrangement, Row, Table};
use serde::Serialize;
use sqlmask_rs_sdk::{AnonymizeError, AnonymizeResponse, ColumnHashPair};

pub fn print_anonymize_table(response: &AnonymizeResponse) {
    if response.modified_sql().is_empty() {
        println!("(empty)");
        return;
    }
    println!("{}", response.modified_sql());

    let pairs = response.hashed_columns();
    if !pairs.is_empty() {
        println!();
        println!("{}", mappings_table(pairs));
    }
}

pub fn print_anonymize_json(response: &AnonymizeResponse) {
    println!("{}", to_json(response));
}

pub fn print_mappings_table(pairs: &[ColumnHashPair]) {
    println!("{}", mappings_table(pairs));
    println!("({} rows)", pairs.len());
}

pub fn print_mappings_json(pairs: &[ColumnHashPair]) {
    println!("{}", to_json(&pairs));
}

pub fn print_error_json(err: &AnonymizeError) {
    println!("{}", to_json(&err.to_body()));
}

fn mappings_table(pairs: &[ColumnHashPair]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(Row::from(vec![
            Cell::new("column_name"),
            Cell::new("column_hash"),
        ]));

    for pair in pairs {
        table.add_row(Row::from(vec![
            Cell::new(&pair.column_name),
            Cell::new(&pair.column_hash),
        ]));
    }
    table
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
