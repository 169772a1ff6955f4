//! Mechanic roster.
//!
//! Ordered list of active mechanic ids, supplied by the caller. Order
//! matters: slot suggestions try mechanics front to back.

use serde::{Deserialize, Serialize};

/// Active mechanics, in preference order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    users: Vec<String>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a mechanic. Duplicates are ignored.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        let user = user.into();
        if !self.contains(&user) {
            self.users.push(user);
        }
        self
    }

    /// Whether the mechanic is on the roster.
    pub fn contains(&self, user: &str) -> bool {
        self.users.iter().any(|u| u == user)
    }

    /// Mechanics in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.users.iter().map(String::as_str)
    }

    /// Number of mechanics.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Roster {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |roster, user| roster.with_user(user))
    }
}
