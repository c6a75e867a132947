pub mod fps;
pub mod time;
