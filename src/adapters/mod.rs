// Adapters layer: turn raw inputs (number lists, recipe CSVs) into domain values.

pub mod numbers;
pub mod recipes;

pub use numbers::{number_map_from, parse_number, parse_number_list};
pub use recipes::{parse_recipes_csv, read_recipes_table};
