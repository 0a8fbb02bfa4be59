mod app;
mod flip;
mod render;
mod sprite;
mod ui;

fn main() {
    env_logger::init();
    log::info!("FlipToy starting up");

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
