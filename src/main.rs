use anyhow::Result;
use symptom_insight::{cli, utils};

fn main() -> Result<()> {
    utils::init_logging();
    cli::run()
}
