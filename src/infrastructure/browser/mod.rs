pub mod session;
pub mod traits;
pub mod webdriver_fetcher;

pub use session::SessionProvisioner;
pub use traits::{BrowserSession, PageSource};
pub use webdriver_fetcher::WebDriverFetcher;
