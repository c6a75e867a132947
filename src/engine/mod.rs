pub mod engine;
pub mod input;
pub mod render;
pub mod time;
pub mod window;
