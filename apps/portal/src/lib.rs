// Library exports for testing
// The binary (main.rs) imports these as well

pub mod app;
pub mod cli;
pub mod console;
pub mod error;
pub mod logger;
pub mod state;

#[cfg(test)]
mod tests;
