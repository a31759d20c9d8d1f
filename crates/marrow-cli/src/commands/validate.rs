//! Rig validation command

use anyhow::{bail, Result};
use marrow_rig::{check_rig, load_rig};

pub fn run(path: &str) -> Result<()> {
    let rig = load_rig(path)?;
    let report = check_rig(&rig);

    if report.is_clean() {
        println!("{}: {}", path, report.summary());
        return Ok(());
    }

    for issue in &report.issues {
        println!("  {issue}");
    }
    bail!("{}: {}", path, report.summary());
}
