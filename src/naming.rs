//! Collision-safe file naming for download destinations.
//!
//! Given a target directory and a desired file name, [`resolve`] decides the
//! final on-disk name. When the desired name is free it is returned
//! unchanged; otherwise a strategy-specific suffix is inserted between the
//! base name and the extension.

use std::path::Path;

use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Length of the suffix token generated by [`NamingStrategy::Random`].
const RANDOM_TOKEN_LEN: usize = 6;

/// Policy for renaming a file when the desired destination name is taken.
///
/// `Counter` probes the directory until it finds a free name, so the name it
/// returns is guaranteed free at resolution time. `Timestamp` and `Random`
/// generate a single candidate without re-checking it, accepting a
/// low-probability race window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingStrategy {
    /// `base-<epoch millis>ext`, single attempt.
    #[default]
    Timestamp,
    /// `base-(1)ext`, `base-(2)ext`, ... first free name wins.
    Counter,
    /// `base-<6 alphanumeric chars>ext`, single attempt.
    Random,
}

impl NamingStrategy {
    /// Parses a configuration string, falling back to `Timestamp` for
    /// anything unrecognized.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "timestamp" => Self::Timestamp,
            "counter" => Self::Counter,
            "random" => Self::Random,
            other => {
                warn!(strategy = %other, "unknown naming strategy, using timestamp");
                Self::Timestamp
            }
        }
    }
}

/// Resolves the final file name for `desired` under `directory`.
///
/// Returns `desired` unchanged when no file of that name exists. Otherwise
/// the name is split at the last `.` (the extension keeps its dot; a name
/// without a dot has an empty extension) and a suffixed candidate is built
/// per `strategy`.
///
/// The only side effect is the existence check against the filesystem; the
/// function never creates anything.
#[must_use]
pub fn resolve(directory: &Path, desired: &str, strategy: NamingStrategy) -> String {
    if !directory.join(desired).exists() {
        return desired.to_string();
    }

    let (base, ext) = split_name(desired);
    let resolved = match strategy {
        NamingStrategy::Timestamp => format!("{base}-{}{ext}", epoch_millis()),
        NamingStrategy::Counter => next_free_counter_name(directory, base, ext),
        NamingStrategy::Random => format!("{base}-{}{ext}", random_token()),
    };
    debug!(desired = %desired, resolved = %resolved, ?strategy, "renamed colliding file");
    resolved
}

/// Splits a file name into base and extension at the last dot.
///
/// The extension includes its leading dot; a name without a dot yields an
/// empty extension.
fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(pos) => (&name[..pos], &name[pos..]),
        None => (name, ""),
    }
}

/// Probes `base-(1)ext`, `base-(2)ext`, ... returning the lowest-numbered
/// name not present in the directory.
fn next_free_counter_name(directory: &Path, base: &str, ext: &str) -> String {
    let mut n: u64 = 1;
    loop {
        let candidate = format!("{base}-({n}){ext}");
        if !directory.join(&candidate).exists() {
            return candidate;
        }
        n += 1;
    }
}

fn epoch_millis() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

fn random_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_TOKEN_LEN)
        .map(char::from)
        .collect()
}
