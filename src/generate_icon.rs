use anyhow::Result;
use std::path::Path;
use taskapp_tools::icons;

fn main() -> Result<()> {
    icons::run_in_project(Path::new("."))?;
    Ok(())
}
