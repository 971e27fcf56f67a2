use std::{
    collections::HashMap,
    fmt::Display,
    sync::{Arc, RwLock},
};

use sha1::{Digest, Sha1};

use crate::{entry::Entry, Result, ShelfError};

/// Opaque identifier of the session an entry list belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short SHA-1 prefix of the id, safe to put in logs.
    pub fn fingerprint(&self) -> String {
        let digest = Sha1::digest(self.0.as_bytes());

        digest[..4].iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where entry lists live between requests.
///
/// An unknown session loads as an empty list. `save` replaces the whole list.
pub trait EntryStore {
    fn load(&self, session: &SessionId) -> Result<Vec<Entry>>;
    fn save(&self, session: &SessionId, entries: Vec<Entry>) -> Result<()>;

    /// Runs `f` on the session's list and saves the result only if `f`
    /// succeeds. No other update of the same session may interleave.
    fn update<F>(&self, session: &SessionId, f: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<Entry>) -> Result<()>;
}

impl<S: EntryStore + ?Sized> EntryStore for Arc<S> {
    fn load(&self, session: &SessionId) -> Result<Vec<Entry>> {
        (**self).load(session)
    }

    fn save(&self, session: &SessionId, entries: Vec<Entry>) -> Result<()> {
        (**self).save(session, entries)
    }

    fn update<F>(&self, session: &SessionId, f: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<Entry>) -> Result<()>,
    {
        (**self).update(session, f)
    }
}

/// Keeps every session in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: RwLock<HashMap<SessionId, Vec<Entry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions that have saved at least once.
    pub fn session_count(&self) -> Result<usize> {
        let sessions = self
            .sessions
            .read()
            .map_err(|e| ShelfError::Store(e.to_string()))?;

        Ok(sessions.len())
    }
}

impl EntryStore for MemoryStore {
    fn load(&self, session: &SessionId) -> Result<Vec<Entry>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|e| ShelfError::Store(e.to_string()))?;

        Ok(sessions.get(session).cloned().unwrap_or_default())
    }

    fn save(&self, session: &SessionId, entries: Vec<Entry>) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| ShelfError::Store(e.to_string()))?;

        sessions.insert(session.clone(), entries);

        Ok(())
    }

    fn update<F>(&self, session: &SessionId, f: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<Entry>) -> Result<()>,
    {
        // The write guard spans load, apply and save
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| ShelfError::Store(e.to_string()))?;

        let mut entries = sessions.get(session).cloned().unwrap_or_default();
        f(&mut entries)?;
        sessions.insert(session.clone(), entries);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, Barrier},
        thread,
    };

    use pretty_assertions::assert_eq;

    use super::{EntryStore, MemoryStore, SessionId};
    use crate::{entry::Entry, ShelfError};

    #[test]
    fn unknown_session_is_empty() {
        let store = MemoryStore::new();

        assert!(store.load(&"nobody".into()).unwrap().is_empty());
        assert_eq!(0, store.session_count().unwrap());
    }

    #[test]
    fn sessions_are_isolated() {
        let store = MemoryStore::new();
        let alice = SessionId::new("alice");
        let bob = SessionId::new("bob");

        store
            .save(&alice, vec![Entry::new("GitHub", "JBSWY3DP")])
            .unwrap();

        assert_eq!(vec![Entry::new("GitHub", "JBSWY3DP")], store.load(&alice).unwrap());
        assert!(store.load(&bob).unwrap().is_empty());
        assert_eq!(1, store.session_count().unwrap());
    }

    #[test]
    fn save_replaces() {
        let store = MemoryStore::new();
        let session = SessionId::new("s");

        store.save(&session, vec![Entry::new("a", "AA")]).unwrap();
        store.save(&session, vec![Entry::new("b", "BB")]).unwrap();

        assert_eq!(vec![Entry::new("b", "BB")], store.load(&session).unwrap());
    }

    #[test]
    fn shared_between_threads() {
        let store = Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let session = SessionId::new(format!("session-{i}"));
                    store
                        .save(&session, vec![Entry::new(format!("entry-{i}"), "JBSWY3DP")])
                        .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(4, store.session_count().unwrap());
        assert_eq!(
            vec![Entry::new("entry-2", "JBSWY3DP")],
            store.load(&SessionId::new("session-2")).unwrap()
        );
    }

    #[test]
    fn failed_update_saves_nothing() {
        let store = MemoryStore::new();
        let session = SessionId::new("s");
        store.save(&session, vec![Entry::new("a", "AA")]).unwrap();

        let result = store.update(&session, |entries| {
            entries.clear();
            Err(ShelfError::EmptyField("name"))
        });

        assert!(matches!(result, Err(ShelfError::EmptyField("name"))));
        assert_eq!(vec![Entry::new("a", "AA")], store.load(&session).unwrap());
    }

    #[test]
    fn concurrent_updates_keep_every_entry() {
        let store = Arc::new(MemoryStore::new());
        let barrier = Arc::new(Barrier::new(8));
        let session = SessionId::new("shared");

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                let session = session.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for j in 0..50 {
                        store
                            .update(&session, |entries| {
                                entries.push(Entry::new(format!("{i}-{j}"), "JBSWY3DP"));
                                Ok(())
                            })
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(400, store.load(&session).unwrap().len());
    }

    #[test]
    fn fingerprint_hides_the_id() {
        let session = SessionId::new("cookie-value-1234");
        let fingerprint = session.fingerprint();

        assert_eq!(8, fingerprint.len());
        assert!(fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!fingerprint.contains("cookie"));
        assert_eq!(fingerprint, SessionId::new("cookie-value-1234").fingerprint());
        assert_ne!(fingerprint, SessionId::new("cookie-value-1235").fingerprint());
    }
}
