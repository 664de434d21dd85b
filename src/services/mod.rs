//! 服务模块

pub mod journal;
pub mod recommendation;

pub use journal::{JournalService, Pagination, create_journal_service};
pub use recommendation::{
    Gif, GifFinder, Recommendation, RecommendationService, SongMatch, SongMatcher, SongQuery,
};
