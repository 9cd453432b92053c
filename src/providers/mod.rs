mod steam;

use crate::core::models::ItemStats;
use anyhow::Result;
use async_trait::async_trait;

pub use steam::SteamWorkshopClient;

#[async_trait]
pub trait StatsProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// `Ok(None)` means the service answered but had no entry for `item_id`.
    async fn fetch_stats(&self, item_id: &str) -> Result<Option<ItemStats>>;
}
