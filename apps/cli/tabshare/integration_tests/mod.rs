mod commands;
mod helpers;
mod message;
mod resolve;
