pub mod catalogue;
pub mod chapter;
pub mod library;
pub mod rapidapi;
pub mod translate;
