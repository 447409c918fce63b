use std::io::Write;
use tempfile::NamedTempFile;

/// Write an HCL config to a temp file that lives as long as the handle.
pub fn write_config(hcl: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".hcl")
        .tempfile()
        .expect("failed to create temp config");
    file.write_all(hcl.as_bytes())
        .expect("failed to write temp config");
    file
}
