pub mod anilist;
pub mod jikan;
pub mod mangadex;
pub mod rapidapi;
pub mod translation;
