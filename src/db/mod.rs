pub mod exams;
pub mod goals;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod queries;
pub mod state;
pub mod stats;
pub mod todos;
