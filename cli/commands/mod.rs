pub mod evaluate;
pub mod generate;
pub mod mass;
pub mod predict;
pub mod train;
