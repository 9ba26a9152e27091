//
//  stripe-kit
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Low-level file I/O for the configuration file.
//!
//! Write operations create missing parent directories. On Unix the file is
//! written owner-readable only, since it may hold a secret key.

use std::path::Path;

use anyhow::Result;

pub fn read_config_file(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    restrict_permissions(path)?;
    Ok(())
}

pub fn config_exists(path: &Path) -> bool {
    path.exists()
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use std::os::unix::fs::PermissionsExt;

    use super::*;

    #[test]
    fn test_written_file_is_owner_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("config.toml");

        write_config_file(&path, "api_key = \"sk_test_x\"\n").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(read_config_file(&path).unwrap(), "api_key = \"sk_test_x\"\n");
    }
}
