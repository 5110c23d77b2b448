mod config;
mod reference;
