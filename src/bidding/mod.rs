pub mod model;
pub mod submission;
