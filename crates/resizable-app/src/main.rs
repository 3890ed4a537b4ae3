//! Demo entry point (native).

#[cfg(feature = "native")]
fn main() {
    use std::path::PathBuf;

    use resizable_app::{App, AppConfig};

    env_logger::init();
    log::info!("Starting resizable view demo");

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => match AppConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("{err}");
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    if let Err(err) = App::run(config) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
