pub mod add;
pub mod backup;
pub mod del;
pub mod goal;
pub mod log;
pub mod report;
pub mod stats;
pub mod timer;
