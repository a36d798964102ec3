/*
 * Polar API Client - typed Rust client for the Polar commerce and billing API
 */

// Internal modules
mod client;
pub mod models;  // Make models public
pub mod apis;
mod error;
mod auth;
pub mod operation;
pub mod params;
pub mod request;

#[cfg(test)]
mod tests;

// Re-export public types and interfaces
pub use client::{ApiResponse, ClientBuilder, Environment, PolarClient};
pub use models::*;
pub use apis::*;
pub use error::{PolarError, PolarResult, ResponseError};
pub use auth::{
    resolve_bearer, CredentialPolicy, CredentialProvider, CredentialScheme, FnProvider,
    NoCredentials, StaticToken, TokenStore,
};
pub use operation::{BodyKind, HttpMethod, Operation, ResponseShape};
pub use params::{QueryParam, QueryValue, RequestParams};
pub use request::{PreparedRequest, RequestOptions};

// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        PolarClient, ClientBuilder, Environment,
        CredentialPolicy, CredentialProvider, CredentialScheme, StaticToken, TokenStore,
        PolarError, PolarResult, ResponseError, RequestOptions,
        // Common model types
        Discount, Meter, Organization, ListResource, Pagination,
        HttpValidationError,
    };
}
