//! Configuration validation functionality.

use anyhow::Result;

use super::Config;

/// Reject settings that cannot work.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(ref dir) = config.storage_dir {
        if dir.trim().is_empty() {
            anyhow::bail!("storage_dir cannot be empty");
        }

        let expanded = crate::utils::expand_tilde(dir);
        if !expanded.is_absolute() {
            anyhow::bail!(
                "storage_dir must be an absolute path or start with '~/' (got '{}')",
                dir
            );
        }
    }

    Ok(())
}
