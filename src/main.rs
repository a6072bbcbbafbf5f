use log::{info, Level};

mod anchors;
mod app;
mod cards;
mod config;
mod contact;
mod dom;
mod error;
mod nav;
mod reveal;
mod storage;
mod theme;
mod timer;
mod video;
mod year;

#[cfg(test)]
mod testing;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting site scripts");
    app::run_when_ready();
}
