//! Admin capability check against an injected email allow-list.
//!
//! The check fails closed: anything short of a fully loaded session with a
//! verified primary email on the list is `false`.

use std::collections::HashSet;

use crate::session::SessionSnapshot;

/// Case-insensitive set of admin email addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminAllowList {
    emails: HashSet<String>,
}

impl AdminAllowList {
    #[must_use]
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        list.extend(emails);
        list
    }

    /// Parse a comma-separated list such as the `ADMIN_EMAILS` variable.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    /// Add entries. Blank entries are ignored.
    pub fn extend<I, S>(&mut self, emails: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for email in emails {
            let email = normalize(email.as_ref());
            if !email.is_empty() {
                self.emails.insert(email);
            }
        }
    }

    /// Returns `true` if the entry was present.
    pub fn remove(&mut self, email: &str) -> bool {
        self.emails.remove(&normalize(email))
    }

    #[must_use]
    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(&normalize(email))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.emails.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Whether the current principal holds the admin capability.
#[must_use]
pub fn is_admin(snapshot: &SessionSnapshot, allow_list: &AdminAllowList) -> bool {
    if snapshot.loading || snapshot.profile.as_profile().is_none() {
        return false;
    }
    snapshot
        .identity
        .as_ref()
        .and_then(|identity| identity.verified_email())
        .is_some_and(|email| allow_list.contains(email))
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
