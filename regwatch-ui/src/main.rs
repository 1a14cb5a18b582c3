mod app;
mod bridge;
mod components;

fn log_level() -> tracing::Level {
    if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    }
}

/// Routes `tracing` events and panics to the browser console.
fn init_logging() {
    console_error_panic_hook::set_once();
    let config = tracing_wasm::WASMLayerConfigBuilder::new()
        .set_max_level(log_level())
        .build();
    tracing_wasm::set_as_global_default_with_config(config);
}

fn main() {
    init_logging();
    leptos::mount_to_body(app::App);
}
