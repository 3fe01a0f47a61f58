//! File system utilities

use anyhow::{Context, Result};
use std::path::Path;

/// Writes `content` to `path` via a sibling temp file and a rename, creating
/// parent directories as needed. Readers never observe a half-written file.
pub fn write_atomically(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }

    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    std::fs::write(tmp_path, content)
        .with_context(|| format!("writing {}", tmp_path.display()))?;
    std::fs::rename(tmp_path, path)
        .with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}
