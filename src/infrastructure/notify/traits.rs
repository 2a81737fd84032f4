use async_trait::async_trait;
use crate::domain::change::ClassifiedListing;
use crate::shared::errors::NotifyError;

/// Outbound channel for new and repriced listings
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    /// Deliver one listing; `Ok` means the channel accepted it
    async fn notify(&self, item: &ClassifiedListing) -> Result<(), NotifyError>;
}
