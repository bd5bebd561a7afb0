pub mod text_array;

pub use text_array::{format_array, parse_array, read_array, write_array};
