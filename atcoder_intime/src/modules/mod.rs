pub mod annotator;
pub mod handlers;
pub mod models;
pub mod render;
#[cfg(test)]
pub mod testing;
