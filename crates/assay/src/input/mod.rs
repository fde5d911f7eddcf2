//! Decoded row input and raw cell values.

mod table;
mod value;

pub use table::{Row, RowTable};
pub use value::Value;
