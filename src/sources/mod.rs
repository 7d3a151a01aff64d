//! Playlist source handling: source list, fetching, M3U parsing

pub mod fetch;
pub mod list;
pub mod m3u;

pub use fetch::{HttpPlaylistFetcher, PlaylistFetcher};
pub use list::load_source_list;
pub use m3u::parse_m3u;
