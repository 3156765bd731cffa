//! Artifact handle ownership.
//!
//! A successful conversion yields an [`ArtifactHandle`], an opaque
//! reference to the converted bytes, not a filesystem path. The
//! [`ResultResourceManager`] is the sole owner of the live handle: at most
//! one exists per controller, and acquiring a new one releases the previous
//! one first. Release failures are programming-contract violations, never
//! user-facing errors.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier of a converted artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactId(Uuid);

impl ArtifactId {
    /// Generates a fresh artifact id.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to a converted artifact's bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactHandle {
    /// Identifier used to release the underlying storage.
    pub id: ArtifactId,
    /// Addressable location of the bytes (e.g. an object URI).
    pub uri: String,
}

/// Releasing an artifact handle failed.
///
/// Under the stated invariants this never happens; it indicates a broken
/// ownership contract, so the manager logs it rather than surfacing it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    /// The handle was already released.
    #[error("artifact {id} was already released")]
    AlreadyReleased { id: ArtifactId },

    /// The store has no record of this handle.
    #[error("unknown artifact handle: {id}")]
    UnknownHandle { id: ArtifactId },
}

/// The party able to free an artifact's underlying storage.
///
/// Implemented by whatever minted the handle (in tests, the mock
/// conversion service).
pub trait ArtifactStore: Send + Sync {
    /// Frees the storage behind `id`.
    fn release(&self, id: ArtifactId) -> Result<(), ResourceError>;
}

/// Owns the lifetime of the single live conversion result.
///
/// `acquire` and `release_all` are the only places handles are touched, and
/// they are invoked at explicit session boundaries: new file selection, new
/// submission, controller shutdown.
pub struct ResultResourceManager {
    store: Arc<dyn ArtifactStore>,
    held: Option<ArtifactHandle>,
}

impl ResultResourceManager {
    /// Creates a manager releasing against the given store.
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self { store, held: None }
    }

    /// The currently held handle, if any.
    pub fn held(&self) -> Option<&ArtifactHandle> {
        self.held.as_ref()
    }

    /// Takes ownership of a new handle, releasing any held one first.
    ///
    /// The previous handle is released before the new one becomes visible,
    /// so no two live handles ever coexist.
    pub fn acquire(&mut self, handle: ArtifactHandle) -> Result<(), ResourceError> {
        let result = self.release_all();
        self.held = Some(handle);
        result
    }

    /// Releases a handle that was never held, without touching the slot.
    ///
    /// Used for artifacts minted by a stale service response: the job they
    /// belong to has been superseded, so they go straight back to the store
    /// instead of becoming the live result.
    pub fn discard(&mut self, handle: ArtifactHandle) -> Result<(), ResourceError> {
        tracing::debug!(artifact = %handle.id, "discarding stale artifact handle");
        self.store.release(handle.id)
    }

    /// Releases the held handle, if any.
    ///
    /// Safe to call at any boundary: the handle is taken out of the slot
    /// before the store is invoked, so the manager can never release the
    /// same handle twice.
    pub fn release_all(&mut self) -> Result<(), ResourceError> {
        match self.held.take() {
            Some(handle) => {
                tracing::debug!(artifact = %handle.id, "releasing artifact handle");
                self.store.release(handle.id)
            }
            None => Ok(()),
        }
    }
}

impl Drop for ResultResourceManager {
    fn drop(&mut self) {
        if let Err(e) = self.release_all() {
            tracing::error!("artifact release on drop violated ownership contract: {e}");
        }
    }
}
