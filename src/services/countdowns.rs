//! Countdown lifecycle service
//!
//! Orchestrates the two stores: every mutation commits to the
//! relational store first, then mirrors into the shop's metaobject
//! store. There is no compensation; a failed mirror leaves the local
//! write in place and surfaces the remote error to the caller.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::form;
use crate::models::{CountdownConfig, StoredCountdown};
use crate::notify::{Notice, Notifier};
use crate::repository::Repository;
use crate::shopify::ShopifyRepository;

#[derive(Clone)]
pub struct CountdownsService {
    repository: Repository,
    notifier: Arc<dyn Notifier>,
}

impl CountdownsService {
    pub fn new(repository: Repository, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    fn checked(config: CountdownConfig) -> AppResult<CountdownConfig> {
        let issues = form::check_validity(&config);
        if issues.is_empty() {
            Ok(config)
        } else {
            Err(AppError::CountdownInvalid(issues))
        }
    }

    /// List a shop's countdowns; the mirror is never read back
    pub async fn list(&self, shop: &str) -> AppResult<Vec<StoredCountdown>> {
        self.repository.countdowns_list(shop).await
    }

    /// Get one countdown by id
    pub async fn get(&self, shop: &str, id: &str) -> AppResult<StoredCountdown> {
        self.repository.countdowns_get(shop, id).await
    }

    /// Create a countdown: persist locally, then publish the mirror
    /// under the freshly assigned id.
    pub async fn create(
        &self,
        shop: &str,
        remote: &ShopifyRepository,
        config: CountdownConfig,
    ) -> AppResult<StoredCountdown> {
        let config = Self::checked(config)?;

        let stored = self.repository.countdowns_save(shop, None, &config).await?;
        remote.save(&stored).await?;

        tracing::info!("Countdown {} created for {}", stored.id, shop);
        self.notifier.notify(Notice::CountdownCreated);
        Ok(stored)
    }

    /// Update a countdown in place, then refresh its mirror.
    pub async fn update(
        &self,
        shop: &str,
        remote: &ShopifyRepository,
        id: &str,
        config: CountdownConfig,
    ) -> AppResult<StoredCountdown> {
        let config = Self::checked(config)?;

        let stored = self
            .repository
            .countdowns_save(shop, Some(id), &config)
            .await?;
        remote.save(&stored).await?;

        tracing::info!("Countdown {} updated for {}", stored.id, shop);
        self.notifier.notify(Notice::CountdownUpdated);
        Ok(stored)
    }

    /// Soft-remove a countdown locally, then best-effort delete its
    /// mirror; an already-gone mirror is fine.
    pub async fn remove(&self, shop: &str, remote: &ShopifyRepository, id: &str) -> AppResult<()> {
        self.repository.countdowns_remove(shop, id).await?;
        remote.remove(id).await?;

        tracing::info!("Countdown {} removed for {}", id, shop);
        self.notifier.notify(Notice::CountdownRemoved);
        Ok(())
    }
}

// ---- Tests ----
