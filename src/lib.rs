pub mod app;
pub mod carousel;
pub mod command;
pub mod config;
pub mod content;
pub mod error;
pub(crate) mod event;
pub mod input;
pub mod lazy;
pub mod logging;
pub mod page;
pub mod sync;
pub mod ui;
