//! Rendering and export of projection records
//!
//! Nothing here feeds back into the engines; it only reads finished results.

pub mod csv_out;
pub mod json;
pub mod table;

pub use csv_out::{write_records, write_records_to_path};
pub use json::write_json;
pub use table::format_amount;
