pub mod commands;
pub mod constants;
pub mod context_menu;
pub mod dialogs;
pub mod document;
pub mod encoding;
pub mod error;
pub mod file_io;
pub mod find_dialog;
pub mod i18n;
pub mod line_column;
pub mod logging;
pub mod menu;
pub mod prompt;
pub mod recent_files;
pub mod search;
pub mod settings;
pub mod status_bar;
pub mod text_ops;
pub mod zoom;

#[cfg(windows)]
pub mod app;
#[cfg(windows)]
pub mod editor;
#[cfg(windows)]
pub mod window;
