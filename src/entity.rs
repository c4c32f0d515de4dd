//! Base entity record for domain entities with identity and versioning.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Common properties every domain entity carries.
///
/// Domain types embed this record and expose it through [`Entity`]:
///
/// ```ignore
/// struct User {
///     base: EntityProps<String>,
///     email: String,
/// }
///
/// impl Entity for User {
///     type Id = String;
///     fn props(&self) -> &EntityProps<String> { &self.base }
///     fn props_mut(&mut self) -> &mut EntityProps<String> { &mut self.base }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityProps<Id> {
    id: Id,
    version: u64,
    created_at: SystemTime,
    updated_at: SystemTime,
    deleted_at: Option<SystemTime>,
}

impl<Id> EntityProps<Id> {
    /// Create props for a fresh entity: version 1, stamped now, not deleted.
    pub fn new(id: Id) -> Self {
        let now = SystemTime::now();
        EntityProps {
            id,
            version: 1,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Bump the version and touch `updated_at`.
    pub fn increment_version(&mut self) {
        self.version += 1;
        self.updated_at = SystemTime::now();
    }

    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    pub fn updated_at(&self) -> SystemTime {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<SystemTime> {
        self.deleted_at
    }

    /// Soft-delete: record the deletion time.
    pub fn mark_deleted(&mut self) {
        self.deleted_at = Some(SystemTime::now());
    }

    /// Undo a soft delete.
    pub fn restore(&mut self) {
        self.deleted_at = None;
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Trait for domain entities built on [`EntityProps`].
pub trait Entity {
    type Id;

    fn props(&self) -> &EntityProps<Self::Id>;
    fn props_mut(&mut self) -> &mut EntityProps<Self::Id>;

    fn id(&self) -> &Self::Id {
        self.props().id()
    }

    fn version(&self) -> u64 {
        self.props().version()
    }

    fn is_deleted(&self) -> bool {
        self.props().is_deleted()
    }
}
