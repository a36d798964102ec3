use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form metadata attached to most resources
pub type Metadata = BTreeMap<String, MetadataValue>;

/// Metadata value: string, integer, float or boolean
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Pagination metadata returned with every list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub total_count: u64,
    #[serde(default)]
    pub max_page: u64,
}

/// A page of items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResource<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> ListResource<T> {
    /// For a single-page result, the item count must equal `total_count`.
    /// Multi-page results are always considered consistent.
    pub fn is_consistent(&self) -> bool {
        self.pagination.max_page > 1 || self.items.len() as u64 == self.pagination.total_count
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Errors returned in response bodies
// ---------------------------------------------------------------------------

/// One field-level validation failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
    #[serde(rename = "type")]
    pub error_type: String,
}

/// Body of a 422 response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpValidationError {
    #[serde(default)]
    pub detail: Vec<ValidationError>,
}

/// Body of a 404 response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceNotFound {
    pub error: String,
    pub detail: String,
}

// ---------------------------------------------------------------------------
// Discounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Fixed,
    Percentage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountDuration {
    Once,
    Forever,
    Repeating,
}

/// Discount information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discount {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub name: String,
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub discount_type: DiscountType,
    pub duration: DiscountDuration,
    pub duration_in_months: Option<u32>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub basis_points: Option<u32>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub max_redemptions: Option<u32>,
    #[serde(default)]
    pub redemptions_count: u32,
    pub organization_id: String,
    #[serde(default)]
    pub metadata: Metadata,
}

/// Discount creation body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscountCreate {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<DiscountDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_in_months: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basis_points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_redemptions: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: Metadata,
}

/// Discount update body; only set fields are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_redemptions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscountSortProperty {
    #[serde(rename = "created_at")]
    CreatedAt,
    #[serde(rename = "-created_at")]
    CreatedAtDesc,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "-name")]
    NameDesc,
    #[serde(rename = "code")]
    Code,
    #[serde(rename = "-code")]
    CodeDesc,
    #[serde(rename = "redemptions_count")]
    RedemptionsCount,
    #[serde(rename = "-redemptions_count")]
    RedemptionsCountDesc,
}

impl DiscountSortProperty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::CreatedAtDesc => "-created_at",
            Self::Name => "name",
            Self::NameDesc => "-name",
            Self::Code => "code",
            Self::CodeDesc => "-code",
            Self::RedemptionsCount => "redemptions_count",
            Self::RedemptionsCountDesc => "-redemptions_count",
        }
    }
}

// ---------------------------------------------------------------------------
// Meters
// ---------------------------------------------------------------------------

/// Meter information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meter {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub name: String,
    pub filter: serde_json::Value,
    pub aggregation: serde_json::Value,
    pub organization_id: String,
    #[serde(default)]
    pub metadata: Metadata,
}

/// Meter creation body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeterCreate {
    pub name: String,
    pub filter: serde_json::Value,
    pub aggregation: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: Metadata,
}

/// Meter update body; only set fields are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeterUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// One bucket of a quantities series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeterQuantity {
    pub timestamp: DateTime<Utc>,
    pub quantity: f64,
}

/// Meter quantities over a time period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeterQuantities {
    pub quantities: Vec<MeterQuantity>,
    #[serde(default)]
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeInterval {
    Year,
    Month,
    Week,
    Day,
    Hour,
}

impl TimeInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeterSortProperty {
    #[serde(rename = "created_at")]
    CreatedAt,
    #[serde(rename = "-created_at")]
    CreatedAtDesc,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "-name")]
    NameDesc,
}

impl MeterSortProperty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::CreatedAtDesc => "-created_at",
            Self::Name => "name",
            Self::NameDesc => "-name",
        }
    }
}

/// An ingested event matched by a meter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub source: String,
    pub organization_id: String,
    pub customer_id: Option<String>,
    pub external_customer_id: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
}

// ---------------------------------------------------------------------------
// Organizations
// ---------------------------------------------------------------------------

/// Organization information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub name: String,
    pub slug: String,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub socials: Vec<serde_json::Value>,
    pub details_submitted_at: Option<DateTime<Utc>>,
    pub feature_settings: Option<serde_json::Value>,
    pub subscription_settings: Option<serde_json::Value>,
}

/// Organization creation body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationCreate {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Organization update body; only set fields are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_settings: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_settings: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrganizationSortProperty {
    #[serde(rename = "created_at")]
    CreatedAt,
    #[serde(rename = "-created_at")]
    CreatedAtDesc,
    #[serde(rename = "slug")]
    Slug,
    #[serde(rename = "-slug")]
    SlugDesc,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "-name")]
    NameDesc,
}

impl OrganizationSortProperty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::CreatedAtDesc => "-created_at",
            Self::Slug => "slug",
            Self::SlugDesc => "-slug",
            Self::Name => "name",
            Self::NameDesc => "-name",
        }
    }
}

/// Member of an organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationMember {
    pub created_at: DateTime<Utc>,
    pub user_id: String,
    pub email: String,
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// Payout account of an organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub account_type: String,
    pub status: String,
    pub country: String,
    pub currency: Option<String>,
    #[serde(default)]
    pub is_details_submitted: bool,
    #[serde(default)]
    pub is_charges_enabled: bool,
    #[serde(default)]
    pub is_payouts_enabled: bool,
}

/// Badge settings of one repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryBadgeSettings {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub badge_auto_embed: bool,
    #[serde(default)]
    pub is_private: bool,
}

/// Organization-wide badge settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationBadgeSettingsRead {
    #[serde(default)]
    pub show_amount: bool,
    pub minimum_amount: i64,
    pub message: Option<String>,
    #[serde(default)]
    pub repositories: Vec<RepositoryBadgeSettings>,
}

/// Badge settings update body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationBadgeSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_amount: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repositories: Vec<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Access tokens
// ---------------------------------------------------------------------------

/// Organization access token metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationAccessToken {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub comment: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub organization_id: String,
}

/// Organization access token creation body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationAccessTokenCreate {
    pub comment: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Lifetime in seconds; `None` never expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

/// Organization access token update body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationAccessTokenUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
}

/// Returned once on creation; `token` is never shown again
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationAccessTokenCreateResponse {
    pub organization_access_token: OrganizationAccessToken,
    pub token: String,
}

/// Personal access token metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalAccessToken {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub comment: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub last_used_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// GitHub integration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    Read,
    Write,
    Admin,
}

/// GitHub App permissions the caller needs to hold
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppPermissions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administration: Option<PermissionLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<PermissionLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<PermissionLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<PermissionLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_administration: Option<PermissionLevel>,
}

/// Body of the permission check
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationCheckPermissionsInput {
    pub permissions: AppPermissions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GithubBillingPlan {
    Free,
    Pro,
    Team,
    Enterprise,
}

/// Billing plan of the linked GitHub organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationBillingPlan {
    pub organization_id: String,
    pub plan: GithubBillingPlan,
    #[serde(default)]
    pub is_free: bool,
}

crate::wire_name_query_param!(
    DiscountSortProperty,
    MeterSortProperty,
    OrganizationSortProperty,
    TimeInterval,
);

impl crate::params::QueryParam for MetadataValue {
    fn to_query_value(&self) -> crate::params::QueryValue {
        let value = match self {
            Self::String(s) => s.clone(),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Boolean(b) => b.to_string(),
        };
        crate::params::QueryValue::Scalar(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_resource_consistency() {
        let page: ListResource<serde_json::Value> = serde_json::from_value(json!({
            "items": [{}, {}, {}],
            "pagination": { "total_count": 3, "max_page": 1 }
        }))
        .unwrap();
        assert!(page.is_consistent());

        let short: ListResource<serde_json::Value> = serde_json::from_value(json!({
            "items": [{}],
            "pagination": { "total_count": 3, "max_page": 1 }
        }))
        .unwrap();
        assert!(!short.is_consistent());
    }

    #[test]
    fn sort_property_wire_names_match_serde() {
        for prop in [DiscountSortProperty::CreatedAtDesc, DiscountSortProperty::RedemptionsCount] {
            assert_eq!(serde_json::to_value(prop).unwrap(), json!(prop.as_str()));
        }
    }

    #[test]
    fn update_bodies_only_send_set_fields() {
        let update = MeterUpdate {
            name: Some("API calls".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(update).unwrap(), json!({ "name": "API calls" }));
    }
}
