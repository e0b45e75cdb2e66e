//! `sweep validate-duration` – check a duration setting.

use anyhow::Result;
use sweep_core::util::validate_duration;

pub fn run_validate_duration(value: &str, key: &str) -> Result<()> {
    let v = validate_duration(value, key);
    for w in &v.warnings {
        println!("warning: {}", w);
    }
    if !v.is_ok() {
        anyhow::bail!("{}", v.errors.join("; "));
    }
    println!("{:?} is a valid duration", value);
    Ok(())
}
