pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod opener;

#[cfg(test)]
mod tests;
