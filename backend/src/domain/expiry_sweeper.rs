//! Background task that periodically deletes expired announcements.
//!
//! Listing announcements never deletes anything; cleanup happens only here and
//! through the on-demand sweep endpoint.

use chrono::Utc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::domain::announcement_service::AnnouncementService;

/// Spawn the sweeper. The first sweep runs immediately, then once per `period`.
/// A failed sweep is logged and retried on the next tick.
pub fn spawn_expiry_sweeper(service: AnnouncementService, period: Duration) -> JoinHandle<()> {
    info!("Starting announcement expiry sweeper every {:?}", period);

    tokio::spawn(async move {
        let mut timer = interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            timer.tick().await;

            match service.sweep_expired(Utc::now()).await {
                Ok(result) if result.deleted_count > 0 => {
                    info!("Expiry sweeper removed {} announcements", result.deleted_count);
                }
                Ok(_) => debug!("Expiry sweeper found nothing to remove"),
                Err(e) => warn!("Expiry sweep failed: {}", e),
            }
        }
    })
}
