pub mod config;
pub mod draw;
pub mod editor;
pub mod logging;
pub mod proc;
