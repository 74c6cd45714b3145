pub mod aggregator;
pub mod editor;
