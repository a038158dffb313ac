use std::path::Path;
use taskapp_tools::ios_fix::{self, FixOptions};

fn main() {
    // Exit status stays 0 whatever happens; problems are printed instead
    ios_fix::run_in_project(Path::new("."), FixOptions::default());
}
