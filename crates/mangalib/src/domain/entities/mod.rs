pub mod chapter;
pub mod library;
pub mod manga;
