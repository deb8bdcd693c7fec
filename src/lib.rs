pub mod backend;
pub mod configuration;
pub mod configuration_handler;
pub mod console;
pub mod error;
pub mod form_controller;
pub mod http;
pub mod reservation_store;
pub mod scheduler;
#[cfg(test)]
mod testutils;
pub mod types;
