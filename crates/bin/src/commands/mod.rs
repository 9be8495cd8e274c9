pub mod flat;
pub mod read;
pub mod write;
