use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    action::Action,
    base32,
    config::Config,
    entry::{self, Entry},
    store::{EntryStore, SessionId},
    totp::{self, Totp},
    Result,
};

/// One displayed entry with its current code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeRow {
    /// Position in the session's list, as taken by delete and move
    pub index: usize,
    pub name: String,
    pub code: String,
}

/// Everything needed to render a session's codes at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    /// Shared by all rows, they all roll over together
    pub seconds_remaining: u64,
    pub time_step: u64,
    pub rows: Vec<CodeRow>,
}

/// Applies actions to, and renders codes for, the lists held in an injected store.
#[derive(Debug)]
pub struct Manager<S> {
    store: S,
    config: Config,
}

impl<S: EntryStore> Manager<S> {
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Applies `action` to the session's list and saves the result.
    ///
    /// A failed action saves nothing.
    pub fn handle(&self, session: &SessionId, action: Action) -> Result<()> {
        let action_name = action.name();
        let fingerprint = session.fingerprint();
        let mut count = 0;

        let result = self.store.update(session, |entries| {
            action.apply(entries)?;
            count = entries.len();
            Ok(())
        });

        match &result {
            Ok(()) => debug!("Session {fingerprint}: {action_name} applied, {count} entries"),
            Err(e) => warn!("Session {fingerprint}: {action_name} rejected: {e}"),
        }

        result
    }

    pub fn entries(&self, session: &SessionId) -> Result<Vec<Entry>> {
        self.store.load(session)
    }

    /// The session's list as a downloadable JSON document.
    pub fn export(&self, session: &SessionId) -> Result<String> {
        let entries = self.store.load(session)?;
        info!(
            "Session {}: exporting {} entries",
            session.fingerprint(),
            entries.len()
        );

        entry::export_json(&entries)
    }

    /// Generates the current code of every entry in the session.
    ///
    /// All rows are computed for the same instant, `at_time` or the system
    /// clock when `None`.
    pub fn dashboard(&self, session: &SessionId, at_time: Option<u64>) -> Result<Dashboard> {
        let now = match at_time {
            Some(t) => t,
            None => totp::unix_time()?,
        };
        let entries = self.store.load(session)?;
        let fingerprint = session.fingerprint();

        let mut rows = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let ignored = base32::ignored_chars(&entry.secret);
            if ignored > 0 {
                warn!(
                    "Session {fingerprint}: secret of {:?} has {ignored} non-Base32 characters, skipping them",
                    entry.name
                );
            }

            let mut generator = Totp::new(entry.secret);
            generator
                .with_period(self.config.time_step)
                .with_digits(self.config.digits);

            rows.push(CodeRow {
                index,
                name: entry.name,
                code: generator.generate(now)?.to_string(),
            });
        }

        Ok(Dashboard {
            seconds_remaining: totp::seconds_remaining(now, self.config.time_step)?,
            time_step: self.config.time_step,
            rows,
        })
    }
}
