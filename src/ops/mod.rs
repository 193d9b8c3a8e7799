pub mod day_ops;
pub mod grid;
