pub mod browser_setup;
pub mod cli;
pub mod driver;
pub mod harvest;
pub mod logging;

pub use browser_setup::{BrowserWrapper, launch_browser};
pub use driver::chrome::ChromePage;
pub use driver::{DriverError, ElementHandle, PageDriver};
pub use harvest::{HarvestError, ResultRecord, collect_results};
