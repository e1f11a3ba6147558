pub mod providers;
pub mod ranker;
pub mod scorer;
pub mod session;

pub use providers::{RecommendationProvider, RemoteRecommender};
pub use scorer::Scorer;
pub use session::RecommendationSession;
