//! In-memory transport.
//!
//! Keeps associations per instance in insertion order and serves them in
//! pages, with call counters and fault injection for tests and dry runs.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::TransportError;
use crate::model::AssociationPage;
use crate::transport::AssociationTransport;

#[derive(Debug, Default)]
struct Faults {
    associate: Option<TransportError>,
    disassociate: Option<TransportError>,
    list: Option<TransportError>,
}

/// Transport backed by a process-local map.
///
/// Associating an existing pair is a no-op. Disassociating a missing pair
/// returns `TransportError::ResourceNotFound`, as the remote does.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    associations: DashMap<String, Vec<String>>,
    faults: Mutex<Faults>,
    associate_calls: AtomicUsize,
    disassociate_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an association directly, bypassing call counters.
    pub fn seed(&self, instance_id: impl Into<String>, function_arn: impl Into<String>) {
        let function_arn = function_arn.into();
        let mut arns = self.associations.entry(instance_id.into()).or_default();
        if !arns.contains(&function_arn) {
            arns.push(function_arn);
        }
    }

    /// Detach an association directly, simulating an out-of-band removal.
    pub fn remove(&self, instance_id: &str, function_arn: &str) -> bool {
        self.associations
            .get_mut(instance_id)
            .map(|mut arns| {
                let before = arns.len();
                arns.retain(|arn| arn != function_arn);
                arns.len() != before
            })
            .unwrap_or(false)
    }

    /// Returns `true` if the pair is currently attached.
    pub fn contains(&self, instance_id: &str, function_arn: &str) -> bool {
        self.associations
            .get(instance_id)
            .is_some_and(|arns| arns.iter().any(|arn| arn == function_arn))
    }

    /// Make every subsequent `associate` call fail with `err`.
    pub fn fail_associate_with(&self, err: TransportError) {
        self.faults().associate = Some(err);
    }

    /// Make every subsequent `disassociate` call fail with `err`.
    pub fn fail_disassociate_with(&self, err: TransportError) {
        self.faults().disassociate = Some(err);
    }

    /// Make every subsequent `list_associations` call fail with `err`.
    pub fn fail_list_with(&self, err: TransportError) {
        self.faults().list = Some(err);
    }

    /// Remove all injected faults.
    pub fn clear_faults(&self) {
        *self.faults() = Faults::default();
    }

    pub fn associate_calls(&self) -> usize {
        self.associate_calls.load(Ordering::Relaxed)
    }

    pub fn disassociate_calls(&self) -> usize {
        self.disassociate_calls.load(Ordering::Relaxed)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::Relaxed)
    }

    fn faults(&self) -> std::sync::MutexGuard<'_, Faults> {
        self.faults.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl AssociationTransport for MemoryTransport {
    async fn associate(&self, instance_id: &str, function_arn: &str) -> Result<(), TransportError> {
        self.associate_calls.fetch_add(1, Ordering::Relaxed);
        if let Some(err) = self.faults().associate.clone() {
            return Err(err);
        }
        self.seed(instance_id, function_arn);
        Ok(())
    }

    async fn disassociate(
        &self,
        instance_id: &str,
        function_arn: &str,
    ) -> Result<(), TransportError> {
        self.disassociate_calls.fetch_add(1, Ordering::Relaxed);
        if let Some(err) = self.faults().disassociate.clone() {
            return Err(err);
        }
        if self.remove(instance_id, function_arn) {
            Ok(())
        } else {
            Err(TransportError::ResourceNotFound {
                message: format!("{function_arn} is not associated with {instance_id}"),
            })
        }
    }

    async fn list_associations(
        &self,
        instance_id: &str,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<AssociationPage, TransportError> {
        self.list_calls.fetch_add(1, Ordering::Relaxed);
        if let Some(err) = self.faults().list.clone() {
            return Err(err);
        }

        let start = match page_token {
            Some(token) => token.parse::<usize>().map_err(|_| {
                TransportError::from_http_status(400, format!("invalid next token {token:?}"))
            })?,
            None => 0,
        };
        let arns = self
            .associations
            .get(instance_id)
            .map(|arns| arns.value().clone())
            .unwrap_or_default();

        let end = start.saturating_add(max_results.max(1) as usize).min(arns.len());
        let function_arns = arns.get(start..end).map(<[String]>::to_vec).unwrap_or_default();
        let next_token = (end < arns.len()).then(|| end.to_string());

        Ok(AssociationPage {
            function_arns,
            next_token,
        })
    }

    fn transport_name(&self) -> &'static str {
        "memory"
    }
}
