pub mod environment;
pub mod logging;

pub use environment::{get_catalog_path, get_data_dir};
pub use logging::init_logging;
