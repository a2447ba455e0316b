pub mod anilist;
pub mod jikan;
pub mod library;
pub mod mangadex;
pub mod rapidapi;
pub mod translation;

pub use mangalib_upstream::Error as UpstreamError;
