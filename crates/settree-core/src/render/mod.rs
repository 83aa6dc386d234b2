//! Consumers that turn settings branches into input text for external programs.

pub mod block;

pub use block::render_block_input;
