//! Core domain logic for SalesDesk.
//! This crate is the single source of truth for business invariants.

pub mod auth;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod report;
pub mod service;
pub mod store;

pub use auth::gate::{
    AuthError, AuthGate, AuthResult, AuthState, PasswordPolicy, Route, RouteAccess,
};
pub use auth::session::SessionUser;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::client::Client;
pub use model::concept::Concept;
pub use model::credential::Credential;
pub use model::entity::{Collection, Entity, EntityId, EntityValidationError};
pub use model::sale::Sale;
pub use model::seller::Seller;
pub use notify::{LogNotifier, Notice, NoticeKind, Notifier};
pub use report::dashboard::DashboardStats;
pub use report::directory::NameDirectory;
pub use report::receipt::{format_currency, ReceiptData};
pub use report::sales_report::{
    build_sales_report, run_sales_report, ConceptTotal, ReportError, ReportFilter, ReportLine,
    ReportResult, SalesReport,
};
pub use repo::entity_repo::{CollectionRepository, EntityRepository, RepoError, RepoResult};
pub use service::entity_service::{EntityService, ServiceError};
pub use service::seed_service::{seed_defaults, SeedReport};
pub use store::{KeyValueStore, SqliteKeyValueStore, StoreError, StoreResult};

/// Minimal health-check API for smoke probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
