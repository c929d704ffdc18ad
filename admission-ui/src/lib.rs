pub mod commands;
pub mod logging;
pub mod settings;
pub mod terminal;
pub mod utils;
