pub mod index;
pub mod traits;

// Store implementations
#[cfg(not(target_arch = "wasm32"))]
pub mod filesystem;
pub mod http;
pub mod memory;
