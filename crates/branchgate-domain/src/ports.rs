//! Lookups the hosting platform provides to the gates.
//!
//! Both calls are synchronous; latency bounds are the platform's concern.

use crate::model::{Reference, Repository, User};
use serde::{Deserialize, Serialize};

pub trait UserDirectory {
    /// Resolve a login name. `None` means the user does not exist.
    fn lookup_user(&self, name: &str) -> Option<User>;
}

pub trait RefResolver {
    /// Resolve a reference name (short or fully qualified) in `repository`.
    fn resolve_ref(&self, repository: &Repository, name: &str) -> Option<Reference>;
}

/// Borrowed pair of lookups handed to every gate.
#[derive(Clone, Copy)]
pub struct Lookups<'a> {
    pub users: &'a dyn UserDirectory,
    pub refs: &'a dyn RefResolver,
}

impl<'a> Lookups<'a> {
    pub fn new(users: &'a dyn UserDirectory, refs: &'a dyn RefResolver) -> Self {
        Self { users, refs }
    }
}

/// References of one repository.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRefs {
    pub repository: Repository,
    #[serde(default)]
    pub refs: Vec<Reference>,
}

/// Snapshot of the platform's user directory and reference namespace.
///
/// Implements both lookup ports; the CLI loads it from JSON and tests build it in code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryDirectory {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub repositories: Vec<RepositoryRefs>,
}

impl InMemoryDirectory {
    pub fn with_user(mut self, name: &str, display_name: &str) -> Self {
        self.users.push(User::new(name, display_name));
        self
    }

    pub fn with_ref(mut self, repository: &Repository, reference: Reference) -> Self {
        match self
            .repositories
            .iter_mut()
            .find(|r| &r.repository == repository)
        {
            Some(entry) => entry.refs.push(reference),
            None => self.repositories.push(RepositoryRefs {
                repository: repository.clone(),
                refs: vec![reference],
            }),
        }
        self
    }

    pub fn lookups(&self) -> Lookups<'_> {
        Lookups::new(self, self)
    }
}

impl UserDirectory for InMemoryDirectory {
    fn lookup_user(&self, name: &str) -> Option<User> {
        self.users.iter().find(|u| u.name.as_str() == name).cloned()
    }
}

impl RefResolver for InMemoryDirectory {
    fn resolve_ref(&self, repository: &Repository, name: &str) -> Option<Reference> {
        self.repositories
            .iter()
            .filter(|r| &r.repository == repository)
            .flat_map(|r| r.refs.iter())
            .find(|reference| reference.id == name || reference.display_id == name)
            .cloned()
    }
}
