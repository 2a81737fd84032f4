use async_trait::async_trait;
use tracing::info;

use crate::domain::change::ClassifiedListing;
use crate::shared::errors::NotifyError;
use super::{render_caption, Notifier};

/// Logs the message each listing would produce instead of sending it
#[derive(Debug, Default)]
pub struct DryRunNotifier;

#[async_trait]
impl Notifier for DryRunNotifier {
    fn name(&self) -> &str {
        "dry-run"
    }

    async fn notify(&self, item: &ClassifiedListing) -> Result<(), NotifyError> {
        info!("📝 [dry-run] {}\n{}", item.listing.id, render_caption(item));
        Ok(())
    }
}
