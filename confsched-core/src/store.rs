//! Conference data store.
//!
//! All records live in one snapshot that is rewritten as `store.json` in the
//! data directory after every change. A store opened with `in_memory` never
//! touches the filesystem.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::STORE_FILE_NAME;
use crate::email_list::{EmailEntry, NewEmail};
use crate::error::{ConfError, ConfResult};
use crate::event::{Comment, Event, EventDetails, EventDraft, EventFile};
use crate::schedule::{ConferenceSettings, SettingsUpdate};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    events: Vec<Event>,
    #[serde(default)]
    comments: Vec<Comment>,
    #[serde(default)]
    files: Vec<EventFile>,
    #[serde(default)]
    settings: Option<ConferenceSettings>,
    #[serde(default)]
    emails: Vec<EmailEntry>,
}

impl Snapshot {
    fn event(&self, id: &str) -> ConfResult<&Event> {
        self.events
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| ConfError::EventNotFound(id.to_string()))
    }

    /// Comments for an event, newest first
    fn comments_for(&self, event_id: &str) -> Vec<Comment> {
        self.comments
            .iter()
            .rev()
            .filter(|c| c.event_id == event_id)
            .cloned()
            .collect()
    }

    fn files_for(&self, event_id: &str) -> Vec<EventFile> {
        self.files
            .iter()
            .filter(|f| f.event_id == event_id)
            .cloned()
            .collect()
    }

    fn details(&self, event: &Event) -> EventDetails {
        EventDetails {
            event: event.clone(),
            comments: self.comments_for(&event.id),
            files: self.files_for(&event.id),
        }
    }
}

/// A comment as submitted by a client
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub event_id: String,
    #[serde(default)]
    pub author_name: String,
    pub content: String,
}

/// File metadata as submitted by a client
#[derive(Debug, Clone, Deserialize)]
pub struct NewFile {
    pub filename: String,
    pub path: String,
}

pub struct Store {
    path: Option<PathBuf>,
    snapshot: RwLock<Snapshot>,
}

impl Store {
    /// Open (or create) the store inside `data_dir`.
    pub fn open(data_dir: &Path) -> ConfResult<Self> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join(STORE_FILE_NAME);

        let snapshot = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Snapshot::default()
        };

        tracing::info!(
            path = %path.display(),
            events = snapshot.events.len(),
            "Opened conference store"
        );

        Ok(Store {
            path: Some(path),
            snapshot: RwLock::new(snapshot),
        })
    }

    pub fn in_memory() -> Self {
        Store {
            path: None,
            snapshot: RwLock::new(Snapshot::default()),
        }
    }

    fn read(&self) -> ConfResult<RwLockReadGuard<'_, Snapshot>> {
        self.snapshot
            .read()
            .map_err(|_| ConfError::Storage("store lock poisoned".into()))
    }

    fn write(&self) -> ConfResult<RwLockWriteGuard<'_, Snapshot>> {
        self.snapshot
            .write()
            .map_err(|_| ConfError::Storage("store lock poisoned".into()))
    }

    /// Run `f` against a copy of the snapshot; the copy replaces the live
    /// snapshot only once it has been persisted.
    fn mutate<T>(&self, f: impl FnOnce(&mut Snapshot) -> ConfResult<T>) -> ConfResult<T> {
        let mut live = self.write()?;
        let mut next = live.clone();
        let value = f(&mut next)?;
        self.persist(&next)?;
        *live = next;
        Ok(value)
    }

    fn persist(&self, snapshot: &Snapshot) -> ConfResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let content = serde_json::to_string_pretty(snapshot)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    // Events

    /// All events with comments and files, by start time ascending
    pub fn list_events(&self) -> ConfResult<Vec<EventDetails>> {
        let snapshot = self.read()?;
        let mut events: Vec<EventDetails> =
            snapshot.events.iter().map(|e| snapshot.details(e)).collect();
        events.sort_by(|a, b| a.event.start_time.cmp(&b.event.start_time));
        Ok(events)
    }

    pub fn get_event(&self, id: &str) -> ConfResult<EventDetails> {
        let snapshot = self.read()?;
        let event = snapshot.event(id)?;
        Ok(snapshot.details(event))
    }

    pub fn create_event(&self, draft: EventDraft) -> ConfResult<EventDetails> {
        validate_draft(&draft)?;
        self.mutate(|snapshot| {
            let event = Event::new(draft);
            snapshot.events.push(event.clone());
            Ok(EventDetails {
                event,
                comments: Vec::new(),
                files: Vec::new(),
            })
        })
    }

    pub fn update_event(&self, id: &str, draft: EventDraft) -> ConfResult<EventDetails> {
        validate_draft(&draft)?;
        self.mutate(|snapshot| {
            let event = snapshot
                .events
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or_else(|| ConfError::EventNotFound(id.to_string()))?;
            event.apply(draft);
            let event = event.clone();
            Ok(snapshot.details(&event))
        })
    }

    /// Delete an event together with its comments and files
    pub fn delete_event(&self, id: &str) -> ConfResult<()> {
        self.mutate(|snapshot| {
            snapshot.event(id)?;
            snapshot.events.retain(|e| e.id != id);
            snapshot.comments.retain(|c| c.event_id != id);
            snapshot.files.retain(|f| f.event_id != id);
            Ok(())
        })
    }

    // Comments

    pub fn add_comment(&self, new: NewComment) -> ConfResult<Comment> {
        if new.content.trim().is_empty() {
            return Err(ConfError::Validation("Comment content is required".into()));
        }
        self.mutate(|snapshot| {
            snapshot.event(&new.event_id)?;
            let comment = Comment {
                id: uuid::Uuid::new_v4().to_string(),
                event_id: new.event_id,
                author_name: new.author_name,
                content: new.content,
                created_at: Utc::now(),
            };
            snapshot.comments.push(comment.clone());
            Ok(comment)
        })
    }

    /// Comments for an event, newest first. Unknown events have none.
    pub fn comments_for(&self, event_id: &str) -> ConfResult<Vec<Comment>> {
        Ok(self.read()?.comments_for(event_id))
    }

    // Files

    pub fn attach_file(&self, event_id: &str, new: NewFile) -> ConfResult<EventFile> {
        if new.filename.trim().is_empty() || new.path.trim().is_empty() {
            return Err(ConfError::Validation("Filename and path are required".into()));
        }
        self.mutate(|snapshot| {
            snapshot.event(event_id)?;
            let file = EventFile {
                id: uuid::Uuid::new_v4().to_string(),
                event_id: event_id.to_string(),
                filename: new.filename,
                path: new.path,
                created_at: Utc::now(),
            };
            snapshot.files.push(file.clone());
            Ok(file)
        })
    }

    pub fn delete_file(&self, id: &str) -> ConfResult<()> {
        self.mutate(|snapshot| {
            let before = snapshot.files.len();
            snapshot.files.retain(|f| f.id != id);
            if snapshot.files.len() == before {
                return Err(ConfError::FileNotFound(id.to_string()));
            }
            Ok(())
        })
    }

    // Settings

    /// Current settings, saving the defaults on first access
    pub fn settings(&self) -> ConfResult<ConferenceSettings> {
        if let Some(settings) = self.read()?.settings.clone() {
            return Ok(settings);
        }
        self.mutate(|snapshot| {
            Ok(snapshot
                .settings
                .get_or_insert_with(ConferenceSettings::default)
                .clone())
        })
    }

    /// Insert or replace the settings. Address and notes are kept when omitted.
    pub fn update_settings(&self, update: SettingsUpdate) -> ConfResult<ConferenceSettings> {
        update.validate()?;
        self.mutate(|snapshot| {
            let settings = snapshot
                .settings
                .get_or_insert_with(ConferenceSettings::default);
            settings.start_date = update.start_date;
            settings.end_date = update.end_date;
            if let Some(address) = update.address {
                settings.address = address;
            }
            if let Some(notes) = update.notes {
                settings.notes = notes;
            }
            settings.updated_at = Utc::now();
            Ok(settings.clone())
        })
    }

    // Email list

    /// Email list, newest first
    pub fn list_emails(&self) -> ConfResult<Vec<EmailEntry>> {
        Ok(self.read()?.emails.iter().rev().cloned().collect())
    }

    pub fn add_email(&self, new: NewEmail) -> ConfResult<EmailEntry> {
        new.validate()?;
        self.mutate(|snapshot| {
            let entry = new.into_entry();
            if snapshot
                .emails
                .iter()
                .any(|e| e.email.eq_ignore_ascii_case(&entry.email))
            {
                tracing::debug!(email = %entry.email, "Duplicate email rejected");
                return Err(ConfError::DuplicateEmail);
            }
            snapshot.emails.push(entry.clone());
            Ok(entry)
        })
    }

    pub fn delete_email(&self, id: &str) -> ConfResult<()> {
        self.mutate(|snapshot| {
            let before = snapshot.emails.len();
            snapshot.emails.retain(|e| e.id != id);
            if snapshot.emails.len() == before {
                return Err(ConfError::EmailNotFound(id.to_string()));
            }
            Ok(())
        })
    }
}

fn validate_draft(draft: &EventDraft) -> ConfResult<()> {
    if draft.title.trim().is_empty() {
        return Err(ConfError::Validation("Event title is required".into()));
    }
    Ok(())
}
