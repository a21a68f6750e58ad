pub mod catalog;
pub mod view;

pub use catalog::{Anime, Release};
pub use hoshimi_api::types::{
    AnimeDetails, AnimeId, AnimeInfo, Episode, Genre, GenreId, Mirror, VideoLinkSet,
};
pub use view::AnimeView;
