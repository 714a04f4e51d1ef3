//! Create/read/delete of associations on top of the remote primitives.
//!
//! The remote exposes no lookup by key, so every read is a list scan through
//! [`AssociationFinder`], and a create is only reported as successful once
//! that scan sees the new association.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::arn::validate_arn;
use crate::error::{AssociationError, Result, TransportError};
use crate::finder::AssociationFinder;
use crate::id;
use crate::model::{Association, AssociationState};
use crate::transport::{AssociationTransport, MAX_PAGE_SIZE};

const DEFAULT_CREATE_TIMEOUT: Duration = Duration::from_secs(5 * 60);
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_DELETE_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Tuning for a [`Reconciler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilerConfig {
    /// Page size used when scanning the remote list endpoint.
    pub page_size: u32,
    /// Deadline for the remote associate call.
    pub create_timeout: Duration,
    /// Deadline for a full list scan.
    pub read_timeout: Duration,
    /// Deadline for the remote disassociate call.
    pub delete_timeout: Duration,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            create_timeout: DEFAULT_CREATE_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            delete_timeout: DEFAULT_DELETE_TIMEOUT,
        }
    }
}

/// Drives a single association through `Absent -> Creating -> Present ->
/// Deleting -> Absent`.
///
/// Holds no state between calls; the host is expected to run at most one
/// operation per association at a time.
pub struct Reconciler {
    transport: Arc<dyn AssociationTransport>,
    config: ReconcilerConfig,
}

impl Reconciler {
    pub fn new(transport: Arc<dyn AssociationTransport>) -> Self {
        Self::with_config(transport, ReconcilerConfig::default())
    }

    pub fn with_config(transport: Arc<dyn AssociationTransport>, config: ReconcilerConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Associate `function_arn` with `instance_id` and verify it by reading
    /// it back.
    ///
    /// # Errors
    ///
    /// - `InvalidArn` or `Encoding` before any remote call is made.
    /// - `Create` when the associate call fails, carrying the would-be ID.
    /// - Any `read` error from the verification step.
    #[instrument(skip(self), fields(transport = self.transport.transport_name()))]
    pub async fn create(&self, instance_id: &str, function_arn: &str) -> Result<Association> {
        validate_arn(function_arn)?;
        let id = id::encode(instance_id, function_arn)?;

        info!(%id, state = %AssociationState::Creating, "Creating association");
        with_deadline(
            self.config.create_timeout,
            self.transport.associate(instance_id, function_arn),
        )
        .await
        .map_err(|source| {
            warn!(%id, error = %source, category = %source.category(), "Associate call failed");
            AssociationError::Create {
                id: id.clone(),
                source,
            }
        })?;

        let association = self.read(&id).await?;
        info!(%id, state = %AssociationState::Present, "Association created");
        Ok(association)
    }

    /// Look the association up by scanning the instance's list.
    ///
    /// # Errors
    ///
    /// - `MalformedIdentifier` before any remote call is made.
    /// - `NotFound` when the association is absent; the host should drop it
    ///   from tracked state.
    /// - `Transport` when the listing fails.
    #[instrument(skip(self))]
    pub async fn read(&self, id: &str) -> Result<Association> {
        let Association {
            instance_id,
            function_arn,
        } = Association::from_id(id)?;

        let finder =
            AssociationFinder::new(self.transport.as_ref()).with_page_size(self.config.page_size);
        let found = with_deadline(
            self.config.read_timeout,
            finder.find(&instance_id, &function_arn),
        )
        .await
        .map_err(|source| AssociationError::Transport {
            id: id.to_string(),
            source,
        })?;

        match found {
            Some(function_arn) => {
                debug!(%id, state = %AssociationState::Present, "Association read");
                Ok(Association {
                    instance_id,
                    function_arn,
                })
            }
            None => {
                warn!(%id, state = %AssociationState::Absent, "Association not found");
                Err(AssociationError::not_found(id))
            }
        }
    }

    /// Associations have no mutable attributes, so an update is a re-read.
    pub async fn update(&self, id: &str) -> Result<Association> {
        self.read(id).await
    }

    /// Remove the association. Removing an association that is already gone
    /// succeeds.
    ///
    /// # Errors
    ///
    /// - `MalformedIdentifier` before any remote call is made.
    /// - `Delete` for any remote failure other than not-found.
    #[instrument(skip(self), fields(transport = self.transport.transport_name()))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let Association {
            instance_id,
            function_arn,
        } = Association::from_id(id)?;

        info!(%id, state = %AssociationState::Deleting, "Deleting association");
        match with_deadline(
            self.config.delete_timeout,
            self.transport.disassociate(&instance_id, &function_arn),
        )
        .await
        {
            Ok(()) => {}
            Err(source) if source.is_not_found() => {
                debug!(%id, "Association already absent");
            }
            Err(source) => {
                warn!(%id, error = %source, category = %source.category(), "Disassociate call failed");
                return Err(AssociationError::Delete {
                    id: id.to_string(),
                    source,
                });
            }
        }

        info!(%id, state = %AssociationState::Absent, "Association deleted");
        Ok(())
    }

    /// Adopt an operator-supplied ID into tracked state.
    ///
    /// The raw value is trimmed and must decode into an instance ID and a
    /// valid ARN before the association is read.
    pub async fn import(&self, raw_id: &str) -> Result<Association> {
        let id = raw_id.trim();
        let association = Association::from_id(id)?;
        validate_arn(&association.function_arn)?;
        self.read(id).await
    }

    /// Current state of the association: `Present` or `Absent`.
    ///
    /// # Errors
    ///
    /// Every `read` error except `NotFound`.
    pub async fn observe(&self, id: &str) -> Result<AssociationState> {
        match self.read(id).await {
            Ok(_) => Ok(AssociationState::Present),
            Err(AssociationError::NotFound { .. }) => Ok(AssociationState::Absent),
            Err(err) => Err(err),
        }
    }
}

async fn with_deadline<T, F>(limit: Duration, call: F) -> std::result::Result<T, TransportError>
where
    F: Future<Output = std::result::Result<T, TransportError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or(Err(TransportError::Timeout { after: limit }))
}
