// Library API shared by the CLI and WASM builds
pub mod consistency;
pub mod crossword;
pub mod domains;
pub mod errors;
pub mod grid;
pub mod log;
pub mod solver;
pub mod variable;
pub mod word_list;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
