pub mod generate;
pub mod training_data;

pub use generate::{bit_count, from_bits, parity, to_bits};
pub use training_data::{TrainingData, TrainingExample};
