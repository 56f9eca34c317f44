#![allow(dead_code)]

use relaylog::{Backend, BackendFactory, Error, Level};
use std::error::Error as StdError;
use std::sync::{Arc, Mutex};

/// Records every write, with any cause rendered as `msg | cause`.
#[derive(Debug)]
pub struct Capture {
    threshold: Level,
    lines: Mutex<Vec<(Level, String)>>,
}

impl Capture {
    pub fn new(threshold: Level) -> Arc<Self> {
        Arc::new(Self {
            threshold,
            lines: Mutex::new(Vec::new()),
        })
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lines().into_iter().map(|(_, msg)| msg).collect()
    }
}

impl Backend for Capture {
    fn is_level_enabled(&self, level: Level) -> bool {
        self.threshold.is_enabled(level)
    }

    fn write(&self, level: Level, msg: &str) {
        self.lines.lock().unwrap().push((level, msg.to_string()));
    }

    fn write_with_cause(&self, level: Level, msg: &str, cause: &dyn StdError) {
        self.lines
            .lock()
            .unwrap()
            .push((level, format!("{msg} | {cause}")));
    }
}

/// Factory handing out one shared capture backend.
pub fn capture_factory(capture: &Arc<Capture>) -> Arc<dyn BackendFactory> {
    let capture = Arc::clone(capture);
    Arc::new(move |_identity: &str| -> Result<Arc<dyn Backend>, Error> {
        Ok(Arc::clone(&capture) as Arc<dyn Backend>)
    })
}
