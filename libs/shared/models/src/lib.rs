pub mod error;
pub mod queue;
pub mod scheduling;
