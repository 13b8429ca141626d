use tracing::Level;

fn main() {
    // Fails only if a subscriber is already installed.
    let _ = dioxus::logger::init(Level::INFO);
    pm_web::install_fault_reporter();

    if let Err(e) = pm_web::run() {
        panic!("{e}");
    }
}
