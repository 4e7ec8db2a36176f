use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters describing a single news ingestion run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct IngestionSummary {
    /// Feeds fetched successfully
    pub feeds: usize,
    /// Feed items scanned for player names
    pub items: usize,
    /// (player, item) pairs matched
    pub matches: usize,
    pub inserted: usize,
    /// Matches skipped because the (player, headline) pair already exists
    pub skipped: usize,
    /// Matches whose write failed
    pub failed: usize,
}

/// Successful response of the news cron endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct CronSuccessDto {
    pub success: bool,
    pub result: IngestionSummary,
    pub timestamp: DateTime<Utc>,
}

/// Failed response of the news cron endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct CronFailureDto {
    pub success: bool,
    pub error: String,
}
