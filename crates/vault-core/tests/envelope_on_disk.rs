use std::fs;

use tempfile::tempdir;
use vault_core::crypto::{decrypt_file, decrypt_text, encrypt_file, encrypt_text, EncryptedFile};
use vault_core::fs::write_atomic;

#[test]
fn test_text_envelope_survives_disk() {
    let dir = tempdir().expect("tempdir should be available");
    let path = dir.path().join("note.env");
    let password = "Disk-Password-123!";

    let envelope = encrypt_text("card pin 4321", password).expect("encryption should succeed");
    write_atomic(&path, envelope.as_bytes()).expect("write should succeed");

    let on_disk = fs::read_to_string(&path).expect("read should succeed");
    assert!(!on_disk.contains("4321"));
    assert_eq!(
        decrypt_text(&on_disk, password).as_deref(),
        Some("card pin 4321")
    );
}

#[test]
fn test_encrypted_file_record_survives_disk() {
    let dir = tempdir().expect("tempdir should be available");
    let path = dir.path().join("scan.json");
    let password = "Disk-Password-123!";
    let contents: Vec<u8> = (0..2048u32).map(|i| (i * 31 % 251) as u8).collect();

    let encrypted = encrypt_file(&contents, "scan.png", "image/png", password)
        .expect("encryption should succeed");
    let json = serde_json::to_vec(&encrypted).expect("serialize should succeed");
    write_atomic(&path, &json).expect("write should succeed");

    let loaded: EncryptedFile =
        serde_json::from_slice(&fs::read(&path).expect("read should succeed"))
            .expect("deserialize should succeed");
    assert_eq!(loaded.filename, "scan.png");
    assert_eq!(decrypt_file(&loaded, password), Some(contents));
    assert_eq!(decrypt_file(&loaded, "Other-Password-123!"), None);
}

#[test]
fn test_corrupted_file_on_disk_fails_closed() {
    let dir = tempdir().expect("tempdir should be available");
    let path = dir.path().join("note.env");
    let password = "Disk-Password-123!";

    let envelope = encrypt_text("secret", password).expect("encryption should succeed");
    let mut bytes = envelope.into_bytes();
    let last = bytes.len() - 2;
    bytes[last] = if bytes[last] == b'A' { b'B' } else { b'A' };
    write_atomic(&path, &bytes).expect("write should succeed");

    let on_disk = fs::read_to_string(&path).expect("read should succeed");
    assert_eq!(decrypt_text(&on_disk, password), None);
}
