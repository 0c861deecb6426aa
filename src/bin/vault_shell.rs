// src/bin/vault_shell.rs
//! Shadow Vault shell — secret notes over the local notes database

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use rpassword::prompt_password;
use shadow_vault::{
    CoreError, KeyDeriver, NoteOptions, OpenOutcome, SaveOutcome, SqliteNoteStore, UnlockPrompt,
    VaultAwareNoteController, VaultSession,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

type Shell = VaultAwareNoteController<SqliteNoteStore>;

const HELP: &str = "\
commands:
  list                     show notes
  new [-s] <text>          add a note (-s = Secret Mode)
  edit <id> [-s] <text>    replace a note's content
  open <id>                show a note for editing
  delete <id>              delete a note
  unlock | lock            open / close the vault
  cancel                   drop a save waiting for unlock
  salt                     show the vault salt
  help | quit";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = shadow_vault::load_config();
    let store = SqliteNoteStore::open(&config.store.notes_db)
        .with_context(|| format!("Failed to open notes database {}", config.store.notes_db))?;

    let user_id = std::env::var("SHADOW_USER").unwrap_or_else(|_| "local".to_string());
    let profile = store.ensure_profile(&user_id)?;
    info!(user_id = %profile.user_id, db = %config.store.notes_db, "Shadow Vault");

    let session = VaultSession::new(KeyDeriver::from_config(config));
    let mut shell = VaultAwareNoteController::new(store, session, profile);
    shell.refresh()?;
    print_notes(&shell);
    println!("{HELP}\n");

    let stdin = io::stdin();
    loop {
        print!("{} ", if shell.is_unlocked() { "🔓>" } else { "🔒>" });
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "list" => {
                shell.refresh()?;
                print_notes(&shell);
            }
            "new" => {
                let (secret, text) = secret_flag(rest);
                let outcome = shell.create(text, secret, NoteOptions::default())?;
                report_save(&mut shell, outcome)?;
            }
            "edit" => {
                let Some((id, rest)) = rest.split_once(' ') else {
                    println!("usage: edit <id> [-s] <text>");
                    continue;
                };
                let (secret, text) = secret_flag(rest);
                match shell.update(id, text, secret, NoteOptions::default()) {
                    Ok(outcome) => report_save(&mut shell, outcome)?,
                    Err(CoreError::NoteNotFound(id)) => println!("no note {id}"),
                    Err(err) => return Err(err.into()),
                }
            }
            "open" => match shell.open_for_edit(rest) {
                Ok(OpenOutcome::Editable { content, secret }) => {
                    println!("[{}] {content}", if secret { "Secret" } else { "Public" });
                }
                Ok(OpenOutcome::UnlockRequired) => {
                    if prompt_unlock(&mut shell)? {
                        if let Ok(OpenOutcome::Editable { content, secret }) =
                            shell.open_for_edit(rest)
                        {
                            println!("[{}] {content}", if secret { "Secret" } else { "Public" });
                        }
                    }
                }
                Err(CoreError::NoteNotFound(id)) => println!("no note {id}"),
                Err(err) => return Err(err.into()),
            },
            "delete" => {
                shell.delete(rest)?;
                println!("  → deleted");
            }
            "unlock" => {
                prompt_unlock(&mut shell)?;
            }
            "lock" => {
                shell.lock()?;
                println!("  → vault locked");
            }
            "cancel" => {
                if shell.cancel_pending() {
                    println!("  → pending save dropped");
                }
            }
            "salt" => match shell.profile().vault_salt.as_deref() {
                Some(salt) => println!("vault salt: {salt}"),
                None => println!("no vault salt"),
            },
            other => println!("unknown command {other:?} (try help)"),
        }
    }

    Ok(())
}

fn secret_flag(rest: &str) -> (bool, &str) {
    match rest.strip_prefix("-s") {
        Some(text) if text.is_empty() || text.starts_with(' ') => (true, text.trim_start()),
        _ => (false, rest),
    }
}

fn print_notes(shell: &Shell) {
    if shell.notes().is_empty() {
        println!("(no notes)");
        return;
    }
    for note in shell.notes() {
        let marker = match (note.is_encrypted, note.decrypted) {
            (true, true) => "🔓",
            (true, false) => "🔒",
            _ => "  ",
        };
        println!("{marker} {}  {}", note.id, note.display_content());
    }
}

fn report_save(shell: &mut Shell, outcome: SaveOutcome) -> Result<()> {
    match outcome {
        SaveOutcome::Saved(note) => println!("  → saved {}", note.id),
        SaveOutcome::Empty => println!("  → nothing to save"),
        SaveOutcome::UnlockRequired => {
            println!("Secret Mode needs an unlocked vault.");
            prompt_unlock(shell)?;
        }
    }
    Ok(())
}

/// Ask for the vault password once; `Ok(false)` when rejected
fn prompt_unlock(shell: &mut Shell) -> Result<bool> {
    let prompt = match shell.unlock_prompt() {
        UnlockPrompt::Unlock => "Vault password: ",
        UnlockPrompt::Setup => {
            println!("Create a vault password. Do not lose it; there is no recovery.");
            "New vault password: "
        }
    };
    let password = prompt_password(prompt)?;

    match shell.unlock(password.trim_end()) {
        Ok(unlocked) => {
            println!("  → unlocked, {} note(s) decrypted", unlocked.decrypted);
            if let Some(SaveOutcome::Saved(note)) = unlocked.resumed {
                println!("  → pending save stored as {}", note.id);
            }
            Ok(true)
        }
        Err(CoreError::IncorrectPassword) => {
            warn!("unlock rejected");
            println!("Incorrect Password. Please try again.");
            if shell.has_pending() {
                println!("(pending save kept; `unlock` to retry or `cancel` to drop it)");
            }
            Ok(false)
        }
        Err(CoreError::EmptyPassword) => {
            println!("Password must not be empty.");
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}
