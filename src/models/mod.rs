mod categories;
mod movie;
mod recommendation;
mod remote;

pub use categories::{DayType, Mood, Weather};
pub use movie::MovieRecord;
pub use recommendation::{
    CategoryOptions, ConnectionStatus, RecommendationInput, RecommendationOutcome,
    RecommendationSource, ScoreBreakdown, ScoredEntry, ScoredResult, WeightVector,
};
pub use remote::{
    RemoteErrorBody, RemoteHealth, RemoteInputParameters, RemoteOptions,
    RemoteRankedRecommendation, RemoteRecommendation, RemoteRequest,
};
