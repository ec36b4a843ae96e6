//! Default-slot rules shared by color ranges, map color ranges and presets.
//!
//! A *slot* is the family scope key plus a visibility: there is at most one
//! public default per scope and at most one private default per scope and
//! owner. Public and private defaults never displace each other.

use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use super::error::DomainError;

pub const DEFAULT_ALREADY_EXISTS: &str = "The default value already exists. You must apply forced replacement if this change is necessary";
pub const DEFAULT_STILL_IN_USE: &str =
    "Used as the default value. First assign a new default value or use the force attribute";
pub const DEFAULT_REMOVAL_FORBIDDEN: &str =
    "The value is used as default. To remove, use the forced option";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private { owner: String },
}

impl Visibility {
    #[must_use]
    pub fn of(public: bool, owner: &str) -> Self {
        if public {
            Self::Public
        } else {
            Self::Private {
                owner: owner.to_owned(),
            }
        }
    }
}

/// Storage access needed to keep a default slot exclusive.
#[async_trait]
pub trait DefaultSlotStore: Send + Sync {
    type Scope: Send + Sync;
    type Record: Send + Sync;

    async fn find_default(
        &self,
        scope: &Self::Scope,
        visibility: &Visibility,
    ) -> Result<Option<Self::Record>, DomainError>;

    /// Clears the default flag on `record`.
    async fn demote(&self, record: &Self::Record) -> Result<(), DomainError>;
}

/// Repository side of [`DefaultSlotStore`]: same lookups, connection passed
/// per call so they run inside the caller's transaction.
#[async_trait]
pub trait DefaultSlotRepository: Send + Sync {
    type Scope: Send + Sync;
    type Record: Send + Sync;

    async fn find_default<C: ConnectionTrait>(
        &self,
        conn: &C,
        scope: &Self::Scope,
        visibility: &Visibility,
    ) -> Result<Option<Self::Record>, DomainError>;

    async fn demote<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &Self::Record,
    ) -> Result<(), DomainError>;
}

/// A slot repository bound to one connection or transaction.
pub struct BoundSlots<'a, R, C> {
    repo: &'a R,
    conn: &'a C,
}

impl<'a, R, C> BoundSlots<'a, R, C> {
    #[must_use]
    pub fn new(repo: &'a R, conn: &'a C) -> Self {
        Self { repo, conn }
    }
}

#[async_trait]
impl<R, C> DefaultSlotStore for BoundSlots<'_, R, C>
where
    R: DefaultSlotRepository,
    C: ConnectionTrait,
{
    type Scope = R::Scope;
    type Record = R::Record;

    async fn find_default(
        &self,
        scope: &Self::Scope,
        visibility: &Visibility,
    ) -> Result<Option<Self::Record>, DomainError> {
        self.repo.find_default(self.conn, scope, visibility).await
    }

    async fn demote(&self, record: &Self::Record) -> Result<(), DomainError> {
        self.repo.demote(self.conn, record).await
    }
}

/// Makes room in a slot for a record that is about to become its default.
///
/// Returns the demoted record, if any.
///
/// # Errors
/// `Conflict` when the slot is taken and `forced` is false.
pub async fn enforce<S: DefaultSlotStore>(
    store: &S,
    scope: &S::Scope,
    visibility: &Visibility,
    forced: bool,
) -> Result<Option<S::Record>, DomainError> {
    let Some(current) = store.find_default(scope, visibility).await? else {
        return Ok(None);
    };
    if !forced {
        return Err(DomainError::conflict(DEFAULT_ALREADY_EXISTS));
    }
    store.demote(&current).await?;
    Ok(Some(current))
}

/// Default-related state of a record before and after an update.
#[derive(Debug, Clone, Copy)]
pub struct DefaultTransition {
    pub was_default: bool,
    pub was_public: bool,
    pub default: Option<bool>,
    pub public: Option<bool>,
    pub scope_changed: bool,
}

impl DefaultTransition {
    #[must_use]
    pub fn will_be_default(&self) -> bool {
        self.default.unwrap_or(self.was_default)
    }

    #[must_use]
    pub fn will_be_public(&self) -> bool {
        self.public.unwrap_or(self.was_public)
    }

    /// The update explicitly clears the flag on the current default.
    #[must_use]
    pub fn is_demotion(&self) -> bool {
        self.was_default && self.default == Some(false)
    }

    /// The record ends up default in a slot it did not hold before.
    #[must_use]
    pub fn needs_enforcement(&self) -> bool {
        self.will_be_default()
            && (!self.was_default
                || self.scope_changed
                || self.will_be_public() != self.was_public)
    }
}

/// # Errors
/// `Conflict` when an update demotes the current default without `forced`.
pub fn guard_demotion(transition: &DefaultTransition, forced: bool) -> Result<(), DomainError> {
    if transition.is_demotion() && !forced {
        return Err(DomainError::conflict(DEFAULT_STILL_IN_USE));
    }
    Ok(())
}

/// Private defaults are the owner's business; public ones need `forced`.
///
/// # Errors
/// `Conflict` when deleting a public default without `forced`.
pub fn guard_removal(public: bool, is_default: bool, forced: bool) -> Result<(), DomainError> {
    if public && is_default && !forced {
        return Err(DomainError::conflict(DEFAULT_REMOVAL_FORBIDDEN));
    }
    Ok(())
}
