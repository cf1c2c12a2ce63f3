//! Business logic services

pub mod countdowns;
pub mod setup;

use std::sync::Arc;

use crate::notify::Notifier;
use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub countdowns: countdowns::CountdownsService,
    pub setup: setup::SetupService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            countdowns: countdowns::CountdownsService::new(repository, notifier.clone()),
            setup: setup::SetupService::new(notifier),
        }
    }
}
