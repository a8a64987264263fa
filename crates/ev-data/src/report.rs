//! Per-load counts handed back to the caller for display.

use std::fmt;

/// What a lenient loader accepted and dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadReport {
    /// Records (paths, rows, files) accepted.
    pub loaded:  usize,
    /// Records dropped for being malformed.
    pub skipped: usize,
    /// Whole inputs that could not be read, with the reason.
    pub failed:  Vec<(String, String)>,
}

impl LoadReport {
    pub fn fail(&mut self, what: impl Into<String>, why: impl fmt::Display) {
        self.failed.push((what.into(), why.to_string()));
    }

    pub fn merge(&mut self, other: LoadReport) {
        self.loaded  += other.loaded;
        self.skipped += other.skipped;
        self.failed.extend(other.failed);
    }

    pub fn is_clean(&self) -> bool {
        self.skipped == 0 && self.failed.is_empty()
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} loaded, {} skipped", self.loaded, self.skipped)?;
        if !self.failed.is_empty() {
            write!(f, ", {} failed", self.failed.len())?;
        }
        Ok(())
    }
}
