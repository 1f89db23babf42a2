use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use vault_core::crypto::ensure_file_size;
use vault_core::fs::write_atomic;
use vault_core::{decrypt_file, encrypt_file, EncryptedFile, VaultError};

use crate::app::AppContext;
use crate::cli::{DecryptFileArgs, EncryptFileArgs};
use crate::errors::CliError;
use crate::helpers::guess_filetype;
use crate::output::Report;
use crate::ui::Spinner;

/// Suffix for encrypted file records written next to the source.
const RECORD_SUFFIX: &str = ".vault.json";

fn require_file(path: &Path) -> anyhow::Result<std::fs::Metadata> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(meta),
        _ => Err(CliError::not_found(
            format!("File not found: {}", path.display()),
            "Hint: Check the path and try again.",
        )
        .into()),
    }
}

fn check_size(size: usize, max: usize) -> anyhow::Result<()> {
    ensure_file_size(size, max).map_err(|err| match err {
        VaultError::FileTooLarge { .. } => CliError::invalid_input(err.to_string()).into(),
        other => other.into(),
    })
}

/// Read at most one byte past `max` and enforce the cap on what was read.
///
/// The metadata check can go stale if the file grows before it is read.
fn read_capped(path: &Path, max: usize) -> anyhow::Result<Vec<u8>> {
    let file = File::open(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let limit = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
    let mut contents = Vec::new();
    file.take(limit)
        .read_to_end(&mut contents)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    check_size(contents.len(), max)?;
    Ok(contents)
}

pub fn handle_encrypt_file(ctx: &AppContext, args: &EncryptFileArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let source = PathBuf::from(&args.path);
    let meta = require_file(&source)?;

    let max = ctx.config()?.max_file_size();
    check_size(usize::try_from(meta.len()).unwrap_or(usize::MAX), max)?;
    let contents = read_capped(&source, max)?;
    let filename = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());
    let filetype = args
        .filetype
        .clone()
        .unwrap_or_else(|| guess_filetype(&source).to_string());

    let password = ctx.password()?;
    let record = Spinner::run(&ui, "Encrypting file", || {
        encrypt_file(&contents, &filename, &filetype, &password)
    })?;

    let destination = match &args.out {
        Some(out) => PathBuf::from(out),
        None => PathBuf::from(format!("{}{}", source.display(), RECORD_SUFFIX)),
    };
    write_atomic(&destination, &record.to_json()?)?;

    let out = destination.display().to_string();
    Report::new(
        "File encrypted",
        serde_json::json!({
            "path": out,
            "filename": record.filename,
            "filetype": record.filetype,
            "bytes": contents.len(),
        }),
    )
    .item("Output", out.clone())
    .item("Filename", record.filename.clone())
    .item("Filetype", record.filetype.clone())
    .item("Bytes", contents.len().to_string())
    .primary(out)
    .emit(&ui, ctx.quiet())
}

pub fn handle_decrypt_file(ctx: &AppContext, args: &DecryptFileArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let source = PathBuf::from(&args.path);
    require_file(&source)?;

    let raw = std::fs::read(&source)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", source.display(), e))?;
    let record = EncryptedFile::from_json(&raw).map_err(|e| {
        CliError::invalid_input(format!(
            "{} is not an encrypted file record: {}",
            source.display(),
            e
        ))
    })?;

    let password = ctx.password()?;
    let contents = Spinner::run(&ui, "Decrypting file", || decrypt_file(&record, &password))
        .ok_or_else(|| {
            CliError::auth_failed_with_hint(
                "Could not unlock file",
                "Hint: Check the master password.",
            )
        })?;

    let destination = match &args.out {
        Some(out) => PathBuf::from(out),
        None => default_output_path(&source, &record.filename),
    };
    write_atomic(&destination, &contents)?;

    let out = destination.display().to_string();
    Report::new(
        "File decrypted",
        serde_json::json!({
            "path": out,
            "filename": record.filename,
            "filetype": record.filetype,
            "bytes": contents.len(),
        }),
    )
    .item("Output", out.clone())
    .item("Filetype", record.filetype.clone())
    .item("Bytes", contents.len().to_string())
    .primary(out)
    .emit(&ui, ctx.quiet())
}

/// The recorded filename, reduced to its last component, next to the record.
fn default_output_path(record_path: &Path, filename: &str) -> PathBuf {
    let name = Path::new(filename)
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "decrypted".into());
    match record_path.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}
