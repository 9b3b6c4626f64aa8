use thiserror::Error;

use assetpro_auth::AuthzError;
use assetpro_core::{DomainError, ProductId};
use assetpro_plans::SubscriptionPlan;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failure of a catalog mutation. Every variant means nothing was changed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The actor's role does not grant the required permission.
    #[error("permission denied: {0}")]
    PermissionDenied(#[from] AuthzError),

    /// New-product creation blocked by the subscription tier; the caller
    /// should route to the upgrade flow.
    #[error("plan limit reached: {current} of {limit} products in use")]
    PlanLimitReached {
        current: usize,
        limit: usize,
        upgrade_to: Option<SubscriptionPlan>,
    },

    /// The price changed but no justification was supplied.
    #[error("a reason is required when changing a product's price")]
    MissingPriceReason,

    #[error("product {0} not found")]
    NotFound(ProductId),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
