#![cfg_attr(windows, windows_subsystem = "windows")]

use legacy_notepad::logging;

#[cfg(windows)]
fn main() {
    use legacy_notepad::file_io::path_from_arg;
    use legacy_notepad::settings::Settings;

    logging::init();

    let settings = Settings::load();
    let initial = std::env::args().nth(1).as_deref().and_then(path_from_arg);

    match legacy_notepad::window::run(settings, initial) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(error = %e, "failed to start");
            std::process::exit(1);
        }
    }
}

#[cfg(not(windows))]
fn main() {
    logging::init();
    tracing::error!("the editor window requires Windows");
    eprintln!("legacy-notepad runs on Windows only");
    std::process::exit(1);
}
