//! Atomic placement of encrypted blobs on disk.
//!
//! Encryption never touches the filesystem. Callers that persist an envelope
//! or an [`EncryptedFile`](crate::crypto::EncryptedFile) go through
//! [`write_atomic`] so a crash mid-write never leaves a half-written blob.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::Result;

/// Write `bytes` to `destination` via a sibling temp file and a rename.
///
/// The temp file lives in the destination's directory so the rename never
/// crosses filesystems.
pub fn write_atomic(destination: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(destination);

    let write_result = (|| -> io::Result<()> {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()
    })();

    if let Err(err) = write_result {
        let _ = fs::remove_file(&temp_path);
        return Err(err.into());
    }

    rename_with_fallback(&temp_path, destination)?;
    tracing::debug!(path = %destination.display(), bytes = bytes.len(), "wrote file");
    Ok(())
}

fn temp_path_for(destination: &Path) -> PathBuf {
    let name = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "vault".to_string());
    let temp_name = format!(".{}.{}.tmp", name, Uuid::new_v4().simple());
    match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(temp_name),
        _ => PathBuf::from(temp_name),
    }
}

/// Rename a file, removing the destination and retrying if the first attempt fails.
///
/// On some platforms `fs::rename` refuses to replace an existing file. If the
/// retry also fails the temp file is removed.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}
