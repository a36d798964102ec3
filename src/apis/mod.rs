pub mod discounts;
pub mod integrations_github;
pub mod meters;
pub mod organization_access_tokens;
pub mod organizations;
pub mod personal_access_tokens;

// Re-export all APIs
pub use discounts::DiscountsApi;
pub use integrations_github::IntegrationsGithubApi;
pub use meters::MetersApi;
pub use organization_access_tokens::OrganizationAccessTokensApi;
pub use organizations::OrganizationsApi;
pub use personal_access_tokens::PersonalAccessTokensApi;

use crate::operation::Operation;

/// Every operation the client knows about, grouped by resource
pub fn all_operations() -> impl Iterator<Item = &'static Operation> {
    [
        discounts::OPERATIONS,
        meters::OPERATIONS,
        organizations::OPERATIONS,
        organization_access_tokens::OPERATIONS,
        personal_access_tokens::OPERATIONS,
        integrations_github::OPERATIONS,
    ]
    .into_iter()
    .flatten()
}
