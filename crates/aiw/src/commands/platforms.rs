//! `aiw platforms`

use std::io::Write;

use aiw_adapters::supported_platforms;
use aiw_protocol::Platform;

/// Print every platform with its status
///
/// # Errors
///
/// Fails only if `out` cannot be written.
pub fn run<W: Write>(out: &mut W) -> std::io::Result<()> {
    let supported = supported_platforms();
    for platform in Platform::ALL {
        let status = if supported.contains(&platform) {
            "supported"
        } else {
            "planned"
        };
        writeln!(
            out,
            "{:<16}{:<16}{status}",
            platform.as_str(),
            platform.display_name()
        )?;
    }
    Ok(())
}
