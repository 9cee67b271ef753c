//! Bulk fan-out over the cached checker.

use crate::application::services::check_service::CheckService;
use crate::domain::entities::{DomainCheckResult, DomainQuery, QueryError, parse_tld};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Default cap on domains per bulk request.
pub const DEFAULT_MAX_BULK_DOMAINS: usize = 10;

/// Default number of checks run at once for one bulk request.
pub const DEFAULT_BULK_CONCURRENCY: usize = 5;

/// Batch-level failures. Nothing is probed when one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BulkError {
    #[error("Maximum {max} domains per request, got {count}")]
    TooManyDomains { count: usize, max: usize },

    #[error("{0}")]
    InvalidTld(QueryError),
}

/// One slot of a bulk response, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkItem {
    Checked(DomainCheckResult),
    /// The item failed validation and was not probed.
    Rejected {
        input: String,
        tld: String,
        reason: QueryError,
    },
}

/// Checks many labels under one TLD with bounded concurrency.
pub struct BulkService {
    checker: Arc<CheckService>,
    max_count: usize,
    max_concurrency: usize,
}

impl BulkService {
    pub fn new(checker: Arc<CheckService>, max_count: usize, max_concurrency: usize) -> Self {
        Self {
            checker,
            max_count,
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Validates and checks every label in `domains` under `tld`.
    ///
    /// # Policy
    ///
    /// - More than `max_count` labels: the whole batch fails, nothing is probed
    /// - Invalid shared TLD: the whole batch fails, nothing is probed
    /// - Invalid label: its slot becomes [`BulkItem::Rejected`], the rest proceed
    ///
    /// At most `max_concurrency` checks run at once. Each result is written to
    /// the slot of its input index, so output order equals input order no
    /// matter which check finishes first.
    ///
    /// # Errors
    ///
    /// Returns [`BulkError`] for the batch-level failures above.
    pub async fn check_many(
        &self,
        domains: &[String],
        tld: Option<&str>,
    ) -> Result<Vec<BulkItem>, BulkError> {
        if domains.len() > self.max_count {
            return Err(BulkError::TooManyDomains {
                count: domains.len(),
                max: self.max_count,
            });
        }

        let tld = parse_tld(tld).map_err(BulkError::InvalidTld)?;

        let mut slots: Vec<Option<BulkItem>> = Vec::with_capacity(domains.len());
        let mut pending = Vec::new();

        for (index, raw) in domains.iter().enumerate() {
            match DomainQuery::parse(raw, Some(&tld)) {
                Ok(query) => {
                    slots.push(None);
                    pending.push((index, query));
                }
                Err(reason) => slots.push(Some(BulkItem::Rejected {
                    input: raw.clone(),
                    tld: tld.clone(),
                    reason,
                })),
            }
        }

        debug!(
            total = domains.len(),
            to_check = pending.len(),
            concurrency = self.max_concurrency,
            "Bulk check started"
        );

        let checker = &self.checker;
        let mut completed = stream::iter(pending)
            .map(|(index, query)| async move { (index, checker.check(&query).await) })
            .buffer_unordered(self.max_concurrency);

        while let Some((index, result)) = completed.next().await {
            slots[index] = Some(BulkItem::Checked(result));
        }

        Ok(slots.into_iter().flatten().collect())
    }
}
