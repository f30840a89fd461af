use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cfg = reactive_vacuum::config::Config::parse();
    reactive_vacuum::logging::init(cfg.log_file.as_deref())?;
    reactive_vacuum::app::run(cfg)
}
