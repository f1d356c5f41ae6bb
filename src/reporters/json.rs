use crate::error::Result;
use crate::types::RawBug;
use std::io::Write;
use std::path::Path;

/// Outputs the bug set as JSON. Writes to a file if given, otherwise stdout.
pub fn report_json(bugs: &[RawBug], output_file: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(bugs)?;

    if let Some(path) = output_file {
        std::fs::write(path, &json)?;
        eprintln!("✓ JSON report written to {}", path.display());
    } else {
        std::io::stdout().write_all(json.as_bytes())?;
        println!();
    }

    Ok(())
}
