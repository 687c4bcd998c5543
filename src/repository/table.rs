//! In-memory table operations and implementations.
//!
//! Every table keeps its rows behind one [`RwLock`]. Secondary indexes live
//! under the same lock as the rows they point into, so a lookup followed by
//! a write is a single critical section.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

use uuid::Uuid;

use crate::model::AttorneyModel;
use crate::model::ConsultationModel;
use crate::model::ContactModel;
use crate::model::EventModel;
use crate::model::NewsItemModel;
use crate::model::NewsletterModel;
use crate::model::OfficeModel;
use crate::model::PracticeAreaModel;
use crate::model::Record;
use crate::model::SubscriptionModel;
use crate::repository::error::DatabaseError;

/// Base trait for table operations.
#[async_trait::async_trait]
pub trait TableBase {
    /// Table name used in logs and errors.
    fn name(&self) -> &'static str;
    /// Number of rows currently stored.
    async fn count(&self) -> Result<usize, DatabaseError>;
}

/// Trait for tables with read and insert operations.
#[async_trait::async_trait]
pub trait Table<T, ID>: TableBase {
    /// All rows in insertion order.
    async fn select_all(&self) -> Result<Vec<T>, DatabaseError>;
    async fn select(&self, id: &ID) -> Result<Option<T>, DatabaseError>;
    async fn insert(&self, model: &T) -> Result<ID, DatabaseError>;
}

/// Lock wrapper that turns poisoning into a [`DatabaseError`].
struct BaseTable<S> {
    name: &'static str,
    state: RwLock<S>,
}

impl<S: Default> BaseTable<S> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            state: RwLock::new(S::default()),
        }
    }
}

impl<S> BaseTable<S> {
    fn read(&self) -> Result<RwLockReadGuard<'_, S>, DatabaseError> {
        self.state
            .read()
            .map_err(|_| DatabaseError::LockPoisoned { table: self.name })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, S>, DatabaseError> {
        self.state
            .write()
            .map_err(|_| DatabaseError::LockPoisoned { table: self.name })
    }
}

/// Rows in insertion order with a primary key index.
struct Rows<T> {
    rows: Vec<T>,
    by_id: HashMap<Uuid, usize>,
}

impl<T> Default for Rows<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            by_id: HashMap::new(),
        }
    }
}

impl<T: Record + Clone> Rows<T> {
    fn get(&self, id: &Uuid) -> Option<&T> {
        self.by_id.get(id).map(|&i| &self.rows[i])
    }

    fn get_mut(&mut self, id: &Uuid) -> Option<&mut T> {
        self.by_id.get(id).map(|&i| &mut self.rows[i])
    }

    fn push(&mut self, model: &T) -> Result<Uuid, DatabaseError> {
        let id = model.id();
        if self.by_id.contains_key(&id) {
            return Err(DatabaseError::UniqueViolation {
                field: "id".to_string(),
            });
        }
        self.by_id.insert(id, self.rows.len());
        self.rows.push(model.clone());
        Ok(id)
    }
}

/// Plain table keyed by record id only.
pub struct MemTable<T> {
    base: BaseTable<Rows<T>>,
}

impl<T> MemTable<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            base: BaseTable::new(name),
        }
    }
}

#[async_trait::async_trait]
impl<T: Send + Sync> TableBase for MemTable<T> {
    fn name(&self) -> &'static str {
        self.base.name
    }

    async fn count(&self) -> Result<usize, DatabaseError> {
        Ok(self.base.read()?.rows.len())
    }
}

#[async_trait::async_trait]
impl<T: Record + Clone + Send + Sync> Table<T, Uuid> for MemTable<T> {
    async fn select_all(&self) -> Result<Vec<T>, DatabaseError> {
        Ok(self.base.read()?.rows.clone())
    }

    async fn select(&self, id: &Uuid) -> Result<Option<T>, DatabaseError> {
        Ok(self.base.read()?.get(id).cloned())
    }

    async fn insert(&self, model: &T) -> Result<Uuid, DatabaseError> {
        self.base.write()?.push(model)
    }
}

pub type PracticeAreaTable = MemTable<PracticeAreaModel>;
pub type NewsItemTable = MemTable<NewsItemModel>;
pub type NewsletterTable = MemTable<NewsletterModel>;
pub type AttorneyTable = MemTable<AttorneyModel>;
pub type OfficeTable = MemTable<OfficeModel>;
pub type EventTable = MemTable<EventModel>;
pub type ContactTable = MemTable<ContactModel>;

// SUBSCRIPTIONS

#[derive(Default)]
struct SubscriptionState {
    rows: Rows<SubscriptionModel>,
    by_email: HashMap<String, Uuid>,
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Subscriptions with a unique, case-insensitive email index.
pub struct SubscriptionTable {
    base: BaseTable<SubscriptionState>,
}

impl SubscriptionTable {
    pub fn new() -> Self {
        Self {
            base: BaseTable::new("subscription"),
        }
    }

    pub async fn select_by_email(
        &self,
        email: &str,
    ) -> Result<Option<SubscriptionModel>, DatabaseError> {
        let state = self.base.read()?;
        Ok(state
            .by_email
            .get(&email_key(email))
            .and_then(|id| state.rows.get(id))
            .cloned())
    }
}

#[async_trait::async_trait]
impl TableBase for SubscriptionTable {
    fn name(&self) -> &'static str {
        self.base.name
    }

    async fn count(&self) -> Result<usize, DatabaseError> {
        Ok(self.base.read()?.rows.rows.len())
    }
}

#[async_trait::async_trait]
impl Table<SubscriptionModel, Uuid> for SubscriptionTable {
    async fn select_all(&self) -> Result<Vec<SubscriptionModel>, DatabaseError> {
        Ok(self.base.read()?.rows.rows.clone())
    }

    async fn select(&self, id: &Uuid) -> Result<Option<SubscriptionModel>, DatabaseError> {
        Ok(self.base.read()?.rows.get(id).cloned())
    }

    /// Fails with [`DatabaseError::UniqueViolation`] when the email is taken.
    async fn insert(&self, model: &SubscriptionModel) -> Result<Uuid, DatabaseError> {
        let mut state = self.base.write()?;
        let key = email_key(&model.email);
        if state.by_email.contains_key(&key) {
            return Err(DatabaseError::UniqueViolation {
                field: "email".to_string(),
            });
        }
        let id = state.rows.push(model)?;
        state.by_email.insert(key, id);
        Ok(id)
    }
}

// CONSULTATIONS

#[derive(Default)]
struct ConsultationState {
    rows: Rows<ConsultationModel>,
    by_token: HashMap<String, Uuid>,
}

/// Consultation requests with a unique confirmation token index.
pub struct ConsultationTable {
    base: BaseTable<ConsultationState>,
}

impl ConsultationTable {
    pub fn new() -> Self {
        Self {
            base: BaseTable::new("consultation"),
        }
    }

    pub async fn select_by_token(
        &self,
        token: &str,
    ) -> Result<Option<ConsultationModel>, DatabaseError> {
        let state = self.base.read()?;
        Ok(state
            .by_token
            .get(token)
            .and_then(|id| state.rows.get(id))
            .cloned())
    }

    /// Runs `f` on the row holding `token` while the table is write-locked.
    ///
    /// Returns `None` when no row holds the token. `f` must not change the
    /// token.
    pub async fn update_by_token<R, F>(&self, token: &str, f: F) -> Result<Option<R>, DatabaseError>
    where
        F: FnOnce(&mut ConsultationModel) -> R + Send,
        R: Send,
    {
        let mut state = self.base.write()?;
        let Some(id) = state.by_token.get(token).copied() else {
            return Ok(None);
        };
        match state.rows.get_mut(&id) {
            Some(row) => Ok(Some(f(row))),
            None => Err(DatabaseError::InternalError {
                message: format!("token index points to missing consultation {id}"),
            }),
        }
    }
}

#[async_trait::async_trait]
impl TableBase for ConsultationTable {
    fn name(&self) -> &'static str {
        self.base.name
    }

    async fn count(&self) -> Result<usize, DatabaseError> {
        Ok(self.base.read()?.rows.rows.len())
    }
}

#[async_trait::async_trait]
impl Table<ConsultationModel, Uuid> for ConsultationTable {
    async fn select_all(&self) -> Result<Vec<ConsultationModel>, DatabaseError> {
        Ok(self.base.read()?.rows.rows.clone())
    }

    async fn select(&self, id: &Uuid) -> Result<Option<ConsultationModel>, DatabaseError> {
        Ok(self.base.read()?.rows.get(id).cloned())
    }

    /// Fails with [`DatabaseError::UniqueViolation`] when the token is taken.
    async fn insert(&self, model: &ConsultationModel) -> Result<Uuid, DatabaseError> {
        let mut state = self.base.write()?;
        if state.by_token.contains_key(&model.token) {
            return Err(DatabaseError::UniqueViolation {
                field: "token".to_string(),
            });
        }
        let id = state.rows.push(model)?;
        state.by_token.insert(model.token.clone(), id);
        Ok(id)
    }
}
