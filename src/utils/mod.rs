pub mod constants;
pub mod dates;
pub mod logging;
pub mod progress;

pub use constants::*;
pub use dates::parse_date;
pub use logging::init_logging;
pub use progress::ProgressReporter;
