mod helpers;

mod cancellation;
mod create;
mod messages;
mod open_tabs;
mod resolve;
