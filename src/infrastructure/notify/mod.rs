pub mod dry_run;
pub mod telegram;
pub mod traits;

pub use dry_run::DryRunNotifier;
pub use telegram::{render_caption, TelegramNotifier};
pub use traits::Notifier;
