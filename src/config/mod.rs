pub mod task_config;

pub use task_config::TaskConfig;
