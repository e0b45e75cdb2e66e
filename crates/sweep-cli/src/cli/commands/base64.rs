//! `sweep base64` – encode a value unless it is already base64.

use sweep_core::util::base64_encode;

pub fn run_base64(input: &str) {
    println!("{}", base64_encode(input.as_bytes()));
}
