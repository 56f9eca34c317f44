//! Systemd journal backend speaking the native datagram protocol.
//!
//! Checking whether the journal is still reachable costs a `stat` per call,
//! so enablement goes through a [`LevelCache`].

use super::{Backend, BackendFactory, CauseChain, LevelCache};
use crate::config::Config;
use crate::level::Level;
use std::error::Error as StdError;
use std::os::unix::net::UnixDatagram;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Syslog priority per level rank; `Off` has none.
const PRIORITIES: [Option<u8>; Level::COUNT] = [
    Some(7), // trace -> debug
    Some(7), // debug
    Some(6), // info
    Some(4), // warning
    Some(3), // error
    Some(2), // fatal -> crit
    None,
];

/// Shared connection to the journal socket.
#[derive(Debug, Clone)]
pub struct JournalFactory {
    socket: Arc<UnixDatagram>,
    socket_path: PathBuf,
    identifier: Arc<str>,
    threshold: Level,
    refresh_every: u32,
}

impl JournalFactory {
    /// Connects to the configured socket; fails when no journal is listening.
    ///
    /// # Errors
    /// [`crate::Error::Unavailable`] when the socket is missing, I/O errors from connecting.
    pub fn from_config(config: &Config) -> Result<Self, crate::Error> {
        Self::connect(
            Path::new(&config.journal.socket),
            &config.journal.identifier,
            config.parse_journal_level(),
            config.journal.refresh_every,
        )
    }

    /// # Errors
    /// [`crate::Error::Unavailable`] when the socket is missing, I/O errors from connecting.
    pub fn connect(
        socket_path: &Path,
        identifier: &str,
        threshold: Level,
        refresh_every: u32,
    ) -> Result<Self, crate::Error> {
        if !socket_path.exists() {
            return Err(crate::Error::Unavailable(format!(
                "no journal socket at {}",
                socket_path.display()
            )));
        }
        let socket = UnixDatagram::unbound()?;
        socket.connect(socket_path)?;
        Ok(Self {
            socket: Arc::new(socket),
            socket_path: socket_path.to_path_buf(),
            identifier: Arc::from(identifier),
            threshold,
            refresh_every,
        })
    }
}

impl BackendFactory for JournalFactory {
    fn create_backend(&self, identity: &str) -> Result<Arc<dyn Backend>, crate::Error> {
        let socket_path = self.socket_path.clone();
        let threshold = self.threshold;
        let levels = LevelCache::new(self.refresh_every, |level| {
            journal_allows(threshold, &socket_path, level)
        });
        Ok(Arc::new(JournalBackend {
            socket: Arc::clone(&self.socket),
            socket_path,
            identifier: Arc::clone(&self.identifier),
            logger: identity.to_string(),
            threshold,
            levels,
        }))
    }
}

fn journal_allows(threshold: Level, socket_path: &Path, level: Level) -> bool {
    threshold.is_enabled(level) && socket_path.exists()
}

/// One logger's entries in the journal.
#[derive(Debug)]
pub struct JournalBackend {
    socket: Arc<UnixDatagram>,
    socket_path: PathBuf,
    identifier: Arc<str>,
    logger: String,
    threshold: Level,
    levels: LevelCache,
}

impl JournalBackend {
    fn send(&self, level: Level, msg: &str) {
        let Some(priority) = PRIORITIES[level.rank()] else {
            return;
        };
        let mut datagram = Vec::with_capacity(msg.len() + 96);
        append_field(&mut datagram, "PRIORITY", &priority.to_string());
        append_field(&mut datagram, "SYSLOG_IDENTIFIER", &self.identifier);
        append_field(&mut datagram, "RELAYLOG_LOGGER", &self.logger);
        append_field(&mut datagram, "MESSAGE", msg);
        let _ = self.socket.send(&datagram);
    }
}

/// Encodes one field; values containing newlines use the length-prefixed form.
fn append_field(out: &mut Vec<u8>, key: &str, value: &str) {
    out.extend_from_slice(key.as_bytes());
    if value.contains('\n') {
        out.push(b'\n');
        out.extend_from_slice(&(value.len() as u64).to_le_bytes());
        out.extend_from_slice(value.as_bytes());
    } else {
        out.push(b'=');
        out.extend_from_slice(value.as_bytes());
    }
    out.push(b'\n');
}

impl Backend for JournalBackend {
    fn is_level_enabled(&self, level: Level) -> bool {
        self.levels.is_enabled(level, |level| {
            journal_allows(self.threshold, &self.socket_path, level)
        })
    }

    fn write(&self, level: Level, msg: &str) {
        self.send(level, msg);
    }

    fn write_with_cause(&self, level: Level, msg: &str, cause: &dyn StdError) {
        self.send(level, &format!("{msg}\n{}", CauseChain(cause)));
    }
}
