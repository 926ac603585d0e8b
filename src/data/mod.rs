pub mod color_table;
pub mod dataset;
pub mod loader;
