pub mod model_report;
pub mod prompt;

pub use model_report::{evaluate, evaluate_dir, BinaryData, EvaluationResult, ModelReport};
pub use prompt::run_prompt;
