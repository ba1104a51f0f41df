pub mod command;
pub mod input;
pub mod service;
