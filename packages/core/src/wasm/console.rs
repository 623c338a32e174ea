#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    // Паники попадают в консоль браузера вместо "unreachable executed"
    console_error_panic_hook::set_once();
    log("Storage Jar WASM initialized");
}

#[cfg(target_arch = "wasm32")]
pub fn log(message: &str) {
    web_sys::console::log_1(&message.into());
}

#[cfg(target_arch = "wasm32")]
pub fn error(message: &str) {
    web_sys::console::error_1(&message.into());
}
