//! Process-local, non-persistent storage connector.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use crate::{HenotaceError, Result};

use super::{Chat, StorageConnector, TutorRecord};

#[derive(Default)]
struct StudentEntry {
    tutors: Vec<TutorRecord>,
    chats: HashMap<String, Vec<Chat>>,
}

/// Keeps everything in memory for the lifetime of the process.
///
/// Meant for tests, demos and single-process use; nothing is written
/// anywhere and all data is lost on drop.
#[derive(Default)]
pub struct InMemoryConnector {
    students: Mutex<BTreeMap<String, StudentEntry>>,
}

impl InMemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, StudentEntry>>> {
        self.students
            .lock()
            .map_err(|_| HenotaceError::Storage("in-memory store lock poisoned".into()))
    }
}

fn unknown_tutor(student_id: &str, tutor_id: &str) -> HenotaceError {
    HenotaceError::Storage(format!(
        "no tutor {tutor_id:?} for student {student_id:?}"
    ))
}

impl StorageConnector for InMemoryConnector {
    fn list_students(&self) -> Result<Vec<String>> {
        let students = self.lock()?;
        Ok(students
            .iter()
            .filter(|(_, entry)| !entry.tutors.is_empty())
            .map(|(id, _)| id.clone())
            .collect())
    }

    fn upsert_tutor(&self, student_id: &str, tutor: TutorRecord) -> Result<()> {
        let mut students = self.lock()?;
        let entry = students.entry(student_id.to_string()).or_default();
        entry.chats.entry(tutor.id.clone()).or_default();
        match entry.tutors.iter_mut().find(|t| t.id == tutor.id) {
            Some(existing) => *existing = tutor,
            None => entry.tutors.push(tutor),
        }
        Ok(())
    }

    fn list_tutors(&self, student_id: &str) -> Result<Vec<TutorRecord>> {
        let students = self.lock()?;
        Ok(students
            .get(student_id)
            .map(|entry| entry.tutors.clone())
            .unwrap_or_default())
    }

    fn delete_tutor(&self, student_id: &str, tutor_id: &str) -> Result<()> {
        let mut students = self.lock()?;
        let now_empty = match students.get_mut(student_id) {
            Some(entry) => {
                entry.tutors.retain(|t| t.id != tutor_id);
                entry.chats.remove(tutor_id);
                entry.tutors.is_empty()
            }
            None => false,
        };
        if now_empty {
            students.remove(student_id);
        }
        Ok(())
    }

    fn list_chats(&self, student_id: &str, tutor_id: &str) -> Result<Vec<Chat>> {
        let students = self.lock()?;
        Ok(students
            .get(student_id)
            .and_then(|entry| entry.chats.get(tutor_id))
            .cloned()
            .unwrap_or_default())
    }

    fn append_chat(&self, student_id: &str, tutor_id: &str, chat: Chat) -> Result<()> {
        let mut students = self.lock()?;
        let log = students
            .get_mut(student_id)
            .and_then(|entry| entry.chats.get_mut(tutor_id))
            .ok_or_else(|| unknown_tutor(student_id, tutor_id))?;
        log.push(chat);
        Ok(())
    }

    fn append_chats(&self, student_id: &str, tutor_id: &str, chats: Vec<Chat>) -> Result<()> {
        let mut students = self.lock()?;
        let log = students
            .get_mut(student_id)
            .and_then(|entry| entry.chats.get_mut(tutor_id))
            .ok_or_else(|| unknown_tutor(student_id, tutor_id))?;
        log.extend(chats);
        Ok(())
    }

    fn replace_chats(&self, student_id: &str, tutor_id: &str, chats: Vec<Chat>) -> Result<()> {
        let mut students = self.lock()?;
        let log = students
            .get_mut(student_id)
            .and_then(|entry| entry.chats.get_mut(tutor_id))
            .ok_or_else(|| unknown_tutor(student_id, tutor_id))?;
        *log = chats;
        Ok(())
    }
}
