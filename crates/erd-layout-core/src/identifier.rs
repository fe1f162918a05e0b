//! Node keys backed by a global string interner.
//!
//! Diagram nodes are looked up by key many times during one layout pass
//! (classification, index building, position writes). [`Id`] makes those
//! keys `Copy` and cheap to hash while still displaying as the original
//! string.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        // The interner is append-only, a panic mid-insert cannot leave it inconsistent.
        .unwrap_or_else(PoisonError::into_inner)
}

/// Interned key identifying a node of a diagram.
///
/// # Examples
///
/// ```
/// use erd_layout_core::identifier::Id;
///
/// let user = Id::new("user");
/// let same = Id::new("user");
/// assert_eq!(user, same);
/// assert_eq!(user, "user");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its key.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Runs `f` with the string this key was created from.
    fn with_str<R>(self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        let value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        f(value)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_str(|value| f.write_str(value))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.with_str(|value| value == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.with_str(|value| serializer.serialize_str(value))
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}
