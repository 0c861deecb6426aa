// tests/vault_workflow_tests.rs
//! Controller-level behaviour: Secret Mode saves, unlock gating, reloads

mod common;
mod support;

use shadow_vault::consts::ENCRYPTED_PLACEHOLDER;
use shadow_vault::core::{decrypt, encrypt};
use shadow_vault::{
    CipherBlob, CoreError, DecryptOutcome, MemoryNoteStore, NewNote, NoteOptions, NoteStore,
    OpenOutcome, SaveOutcome, UnlockPrompt, VaultAwareNoteController,
};
use support::{key_for, memory_vault, reload, TempNotesDb, TEST_USER};

fn saved<S: NoteStore>(
    vault: &mut VaultAwareNoteController<S>,
    content: &str,
    secret: bool,
) -> String {
    match vault.create(content, secret, NoteOptions::default()).unwrap() {
        SaveOutcome::Saved(note) => note.id,
        other => panic!("expected Saved, got {other:?}"),
    }
}

#[test]
fn test_buy_milk_end_to_end_over_sqlite() {
    common::setup();
    let db = TempNotesDb::new();

    // Session 1: unlock (first use), save a secret note
    let mut vault = reload(db.open());
    assert_eq!(vault.unlock_prompt(), UnlockPrompt::Setup);
    vault.unlock("p@ss1").unwrap();
    let id = saved(&mut vault, "buy milk", true);

    let local = vault.note(&id).unwrap();
    assert_eq!(local.content, "buy milk");
    assert!(local.decrypted);

    let persisted = vault.store().list(TEST_USER).unwrap();
    assert_eq!(persisted.len(), 1);
    assert!(persisted[0].is_encrypted);
    assert_ne!(persisted[0].content, "buy milk");
    let blob = CipherBlob::from_stored(persisted[0].content.clone());
    assert_eq!(
        decrypt(&blob, &key_for("p@ss1")),
        DecryptOutcome::Plaintext("buy milk".into())
    );
    drop(vault);

    // Session 2: reload → Locked, note shows the placeholder
    let mut vault = reload(db.open());
    assert!(!vault.is_unlocked());
    assert_eq!(vault.unlock_prompt(), UnlockPrompt::Unlock);
    let note = vault.note(&id).unwrap();
    assert!(note.is_locked());
    assert_eq!(note.display_content(), ENCRYPTED_PLACEHOLDER);
    assert_ne!(note.display_content(), "buy milk");
    assert_ne!(note.display_content(), note.content);

    // Wrong password: rejected, note still locked
    assert!(matches!(
        vault.unlock("wrongpass"),
        Err(CoreError::IncorrectPassword)
    ));
    assert!(!vault.is_unlocked());
    assert_eq!(vault.note(&id).unwrap().display_content(), ENCRYPTED_PLACEHOLDER);

    // Right password: content comes back
    let unlocked = vault.unlock("p@ss1").unwrap();
    assert_eq!(unlocked.decrypted, 1);
    let note = vault.note(&id).unwrap();
    assert_eq!(note.content, "buy milk");
    assert!(note.decrypted);
}

#[test]
fn test_secret_save_while_locked_persists_nothing() {
    let mut vault = memory_vault();

    let outcome = vault
        .create("buy milk", true, NoteOptions::default())
        .unwrap();

    assert_eq!(outcome, SaveOutcome::UnlockRequired);
    assert!(vault.has_pending());
    assert!(vault.store().is_empty());
    assert!(vault.notes().is_empty());
}

#[test]
fn test_pending_create_is_replayed_after_unlock() {
    let mut vault = memory_vault();
    vault
        .create("buy milk", true, NoteOptions::default())
        .unwrap();

    let unlocked = vault.unlock("p@ss1").unwrap();

    let Some(SaveOutcome::Saved(note)) = unlocked.resumed else {
        panic!("pending save was not replayed");
    };
    assert!(!vault.has_pending());
    assert_eq!(note.content, "buy milk");

    let stored = vault.store().get(&note.id).unwrap();
    assert!(stored.is_encrypted);
    assert_ne!(stored.content, "buy milk");
}

#[test]
fn test_pending_save_survives_wrong_password_then_cancel() {
    let mut vault = memory_vault();
    vault.unlock("p@ss1").unwrap();
    saved(&mut vault, "existing secret", true);
    let store = vault.into_store();

    let mut vault = reload(store);
    vault
        .create("second secret", true, NoteOptions::default())
        .unwrap();

    assert!(matches!(
        vault.unlock("wrongpass"),
        Err(CoreError::IncorrectPassword)
    ));
    assert!(vault.has_pending());

    assert!(vault.cancel_pending());
    assert!(!vault.has_pending());
    let unlocked = vault.unlock("p@ss1").unwrap();
    assert_eq!(unlocked.resumed, None);
    assert_eq!(vault.store().len(), 1);
}

#[test]
fn test_pending_update_is_replayed_after_unlock() {
    let mut vault = memory_vault();
    let id = saved(&mut vault, "plain first", false);

    let outcome = vault
        .update(&id, "now secret", true, NoteOptions::default())
        .unwrap();
    assert_eq!(outcome, SaveOutcome::UnlockRequired);
    assert_eq!(vault.store().get(&id).unwrap().content, "plain first");

    let unlocked = vault.unlock("p@ss1").unwrap();
    assert!(matches!(unlocked.resumed, Some(SaveOutcome::Saved(_))));

    let stored = vault.store().get(&id).unwrap();
    assert!(stored.is_encrypted);
    assert_eq!(
        decrypt(
            &CipherBlob::from_stored(stored.content.clone()),
            &key_for("p@ss1")
        ),
        DecryptOutcome::Plaintext("now secret".into())
    );
    assert_eq!(vault.note(&id).unwrap().content, "now secret");
}

#[test]
fn test_public_save_never_touches_the_vault() {
    let mut vault = memory_vault();
    let id = saved(&mut vault, "public note", false);

    let stored = vault.store().get(&id).unwrap();
    assert!(!stored.is_encrypted);
    assert_eq!(stored.content, "public note");
    assert!(!vault.note(&id).unwrap().decrypted);
    assert!(!vault.is_unlocked());
}

#[test]
fn test_update_follows_toggle_in_both_directions() {
    let mut vault = memory_vault();
    vault.unlock("p@ss1").unwrap();
    let id = saved(&mut vault, "draft", false);

    vault
        .update(&id, "made secret", true, NoteOptions::default())
        .unwrap();
    assert!(vault.store().get(&id).unwrap().is_encrypted);
    assert_ne!(vault.store().get(&id).unwrap().content, "made secret");

    vault
        .update(&id, "made public", false, NoteOptions::default())
        .unwrap();
    let stored = vault.store().get(&id).unwrap();
    assert!(!stored.is_encrypted);
    assert_eq!(stored.content, "made public");
    assert!(!vault.note(&id).unwrap().decrypted);
}

#[test]
fn test_open_for_edit_blocks_locked_notes() {
    let mut vault = memory_vault();
    vault.unlock("p@ss1").unwrap();
    let secret_id = saved(&mut vault, "hidden", true);
    let public_id = saved(&mut vault, "visible", false);

    assert_eq!(
        vault.open_for_edit(&secret_id).unwrap(),
        OpenOutcome::Editable {
            content: "hidden".into(),
            secret: true
        }
    );

    let mut vault = reload(vault.into_store());
    assert_eq!(
        vault.open_for_edit(&secret_id).unwrap(),
        OpenOutcome::UnlockRequired
    );
    assert_eq!(
        vault.open_for_edit(&public_id).unwrap(),
        OpenOutcome::Editable {
            content: "visible".into(),
            secret: false
        }
    );
    assert!(matches!(
        vault.open_for_edit("missing"),
        Err(CoreError::NoteNotFound(_))
    ));

    vault.unlock("p@ss1").unwrap();
    assert!(matches!(
        vault.open_for_edit(&secret_id).unwrap(),
        OpenOutcome::Editable { secret: true, .. }
    ));
}

#[test]
fn test_refresh_auto_decrypts_when_unlocked() {
    let mut vault = memory_vault();
    vault.unlock("p@ss1").unwrap();
    let id = saved(&mut vault, "auto", true);

    vault.refresh().unwrap();

    let note = vault.note(&id).unwrap();
    assert!(note.decrypted);
    assert_eq!(note.content, "auto");
}

#[test]
fn test_lock_drops_plaintext_from_memory() {
    let mut vault = memory_vault();
    vault.unlock("p@ss1").unwrap();
    let id = saved(&mut vault, "forget me", true);

    vault.lock().unwrap();

    assert!(!vault.is_unlocked());
    let note = vault.note(&id).unwrap();
    assert!(note.is_locked());
    assert_ne!(note.content, "forget me");
}

#[test]
fn test_logout_clears_all_client_state() {
    let mut vault = memory_vault();
    vault
        .create("parked", true, NoteOptions::default())
        .unwrap();
    saved(&mut vault, "public", false);

    vault.logout();

    assert!(!vault.is_unlocked());
    assert!(!vault.has_pending());
    assert!(vault.notes().is_empty());
    assert_eq!(vault.store().len(), 1);
}

#[test]
fn test_blank_content_is_ignored() {
    let mut vault = memory_vault();
    assert_eq!(
        vault.create("   \n", true, NoteOptions::default()).unwrap(),
        SaveOutcome::Empty
    );
    assert!(!vault.has_pending());
    assert!(vault.store().is_empty());
}

#[test]
fn test_delete_removes_note_locally_and_in_store() {
    let mut vault = memory_vault();
    let id = saved(&mut vault, "temporary", false);

    vault.delete(&id).unwrap();

    assert!(vault.note(&id).is_none());
    assert!(vault.store().get(&id).is_none());
}

fn seed_encrypted(store: &mut MemoryNoteStore, content: String) -> String {
    store
        .create(&NewNote {
            content,
            priority: None,
            user_id: TEST_USER.into(),
            workspace: None,
            is_encrypted: true,
        })
        .unwrap()
        .id
}

const CORRUPT_BLOB: &str = "bm90IGEgcmVhbCBjaXBoZXJ0ZXh0IGF0IGFsbA==";

#[test]
fn test_corrupted_note_stays_locked_after_unlock() {
    let mut store = MemoryNoteStore::new();
    let bad_id = seed_encrypted(&mut store, CORRUPT_BLOB.into());
    // Newest note is listed first and used for verification
    let good = encrypt("fine", &key_for("p@ss1")).unwrap();
    let good_id = seed_encrypted(&mut store, good.into_string());

    let mut vault = reload(store);
    let unlocked = vault.unlock("p@ss1").unwrap();

    assert_eq!(unlocked.decrypted, 1);
    assert_eq!(vault.note(&good_id).unwrap().content, "fine");
    let bad = vault.note(&bad_id).unwrap();
    assert!(bad.is_locked());
    assert_eq!(bad.content, CORRUPT_BLOB);
    assert_eq!(bad.display_content(), ENCRYPTED_PLACEHOLDER);
}

#[test]
fn test_corrupted_verification_note_rejects_every_password() {
    let mut store = MemoryNoteStore::new();
    let good = encrypt("fine", &key_for("p@ss1")).unwrap();
    seed_encrypted(&mut store, good.into_string());
    seed_encrypted(&mut store, CORRUPT_BLOB.into());

    let mut vault = reload(store);

    assert!(matches!(
        vault.unlock("p@ss1"),
        Err(CoreError::IncorrectPassword)
    ));
    assert!(!vault.is_unlocked());
}

#[test]
fn test_unlock_while_unlocked_keeps_the_vault_key() {
    let mut vault = memory_vault();
    vault.unlock("p@ss1").unwrap();
    saved(&mut vault, "buy milk", true);

    // Every loaded note is decrypted, so there is no blob left to check
    assert!(vault.notes().iter().all(|n| n.cipher_blob().is_none()));
    assert!(matches!(
        vault.unlock("wrongpass"),
        Err(CoreError::IncorrectPassword)
    ));
    assert!(vault.is_unlocked());

    let unlocked = vault.unlock("p@ss1").unwrap();
    assert_eq!(unlocked.decrypted, 0);
    saved(&mut vault, "buy eggs", true);

    let mut vault = reload(vault.into_store());
    assert!(matches!(
        vault.unlock("wrongpass"),
        Err(CoreError::IncorrectPassword)
    ));
    let unlocked = vault.unlock("p@ss1").unwrap();
    assert_eq!(unlocked.decrypted, 2);
    assert!(vault.notes().iter().all(|n| n.decrypted));
}
