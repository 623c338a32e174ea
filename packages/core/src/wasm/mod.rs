// WASM-специфичный код: JS API и консоль

pub mod bindings;
pub mod console;
