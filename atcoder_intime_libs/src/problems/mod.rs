pub mod core;
pub mod model;
