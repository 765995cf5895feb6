//! User-scoped saved locations and searches.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::MeetError;
use crate::geo::Coordinate;
use crate::traits::{Identity, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLocation {
    pub id: u64,
    pub label: String,
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSearch {
    pub id: u64,
    pub from: Coordinate,
    pub to: Coordinate,
    pub midpoint: Option<Coordinate>,
}

/// CRUD over records owned by one user.
///
/// Ids are unique per store. Operations never touch another user's records.
pub trait PersistenceService: Send + Sync {
    fn save_location(
        &self,
        user: &UserId,
        label: &str,
        coordinate: Coordinate,
    ) -> Result<SavedLocation, MeetError>;
    fn locations(&self, user: &UserId) -> Result<Vec<SavedLocation>, MeetError>;
    fn rename_location(&self, user: &UserId, id: u64, label: &str) -> Result<bool, MeetError>;
    fn delete_location(&self, user: &UserId, id: u64) -> Result<bool, MeetError>;

    fn save_search(
        &self,
        user: &UserId,
        from: Coordinate,
        to: Coordinate,
        midpoint: Option<Coordinate>,
    ) -> Result<SavedSearch, MeetError>;
    fn searches(&self, user: &UserId) -> Result<Vec<SavedSearch>, MeetError>;
    fn delete_search(&self, user: &UserId, id: u64) -> Result<bool, MeetError>;
}

/// The user behind `identity`, or `Unauthenticated`.
pub fn require_user(identity: &Identity) -> Result<&UserId, MeetError> {
    identity.user_id().ok_or(MeetError::Unauthenticated)
}

#[derive(Debug, Default)]
struct Records {
    next_id: u64,
    locations: HashMap<UserId, Vec<SavedLocation>>,
    searches: HashMap<UserId, Vec<SavedSearch>>,
}

impl Records {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Process-local store, mainly for tests and single-instance deployments.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Mutex<Records>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_records<T>(&self, f: impl FnOnce(&mut Records) -> T) -> Result<T, MeetError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| MeetError::Storage("record lock poisoned".to_string()))?;
        Ok(f(&mut *records))
    }
}

impl PersistenceService for InMemoryStore {
    fn save_location(
        &self,
        user: &UserId,
        label: &str,
        coordinate: Coordinate,
    ) -> Result<SavedLocation, MeetError> {
        self.with_records(|records| {
            let location = SavedLocation {
                id: records.allocate_id(),
                label: label.to_string(),
                coordinate,
            };
            records
                .locations
                .entry(user.clone())
                .or_default()
                .push(location.clone());
            location
        })
    }

    fn locations(&self, user: &UserId) -> Result<Vec<SavedLocation>, MeetError> {
        self.with_records(|records| records.locations.get(user).cloned().unwrap_or_default())
    }

    fn rename_location(&self, user: &UserId, id: u64, label: &str) -> Result<bool, MeetError> {
        self.with_records(|records| {
            let found = records
                .locations
                .get_mut(user)
                .and_then(|owned| owned.iter_mut().find(|location| location.id == id));
            match found {
                Some(location) => {
                    location.label = label.to_string();
                    true
                }
                None => false,
            }
        })
    }

    fn delete_location(&self, user: &UserId, id: u64) -> Result<bool, MeetError> {
        self.with_records(|records| {
            remove_owned(records.locations.get_mut(user), |l: &SavedLocation| l.id == id)
        })
    }

    fn save_search(
        &self,
        user: &UserId,
        from: Coordinate,
        to: Coordinate,
        midpoint: Option<Coordinate>,
    ) -> Result<SavedSearch, MeetError> {
        self.with_records(|records| {
            let search = SavedSearch {
                id: records.allocate_id(),
                from,
                to,
                midpoint,
            };
            records
                .searches
                .entry(user.clone())
                .or_default()
                .push(search.clone());
            search
        })
    }

    fn searches(&self, user: &UserId) -> Result<Vec<SavedSearch>, MeetError> {
        self.with_records(|records| records.searches.get(user).cloned().unwrap_or_default())
    }

    fn delete_search(&self, user: &UserId, id: u64) -> Result<bool, MeetError> {
        self.with_records(|records| {
            remove_owned(records.searches.get_mut(user), |s: &SavedSearch| s.id == id)
        })
    }
}

fn remove_owned<T>(owned: Option<&mut Vec<T>>, matches: impl Fn(&T) -> bool) -> bool {
    let Some(owned) = owned else {
        return false;
    };
    let before = owned.len();
    owned.retain(|record| !matches(record));
    owned.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_user() {
        let alice = UserId::new("alice");
        assert_eq!(
            require_user(&Identity::Authenticated(alice.clone())).unwrap(),
            &alice
        );
        assert!(matches!(
            require_user(&Identity::Unauthenticated),
            Err(MeetError::Unauthenticated)
        ));
    }

    #[test]
    fn test_ids_are_unique_across_record_kinds() {
        let store = InMemoryStore::new();
        let user = UserId::new("u");
        let p = Coordinate::new(1.0, 1.0).unwrap();
        let location = store.save_location(&user, "home", p).unwrap();
        let search = store.save_search(&user, p, p, None).unwrap();
        assert_ne!(location.id, search.id);
    }

    #[test]
    fn test_rename_location() {
        let store = InMemoryStore::new();
        let user = UserId::new("u");
        let saved = store
            .save_location(&user, "home", Coordinate::new(1.0, 1.0).unwrap())
            .unwrap();
        assert!(store.rename_location(&user, saved.id, "flat").unwrap());
        assert_eq!(store.locations(&user).unwrap()[0].label, "flat");
        assert!(!store.rename_location(&user, saved.id + 100, "x").unwrap());
    }
}
