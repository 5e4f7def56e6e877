//! Tessera library exports for testing

pub mod backend;
pub mod core;
pub mod render;
pub mod schema;

#[cfg(test)]
pub mod test_support;
