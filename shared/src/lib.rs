//! Typed record shapes for every SBB DAO entity.
//!
//! Each entity has two shapes:
//! - a `*Row`, exactly as the hosted database returns and accepts it
//!   (snake_case names, timestamps and JSON columns as text)
//! - an application model, serialized with camelCase names and carrying
//!   parsed datetimes and JSON values
//!
//! Conversion between the two lives in the mapper crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Profiles and businesses
// ---------------------------------------------------------------------------

/// A community member's profile row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_business_owner: bool,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_business_owner: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A Black-owned business listed in the directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessRow {
    pub id: String,
    /// Profile ID of the owner
    pub owner_id: String,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub is_verified: bool,
    /// Free-form JSON text (hours, social links, ...)
    pub metadata: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub is_verified: bool,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Social feed
// ---------------------------------------------------------------------------

/// A feed post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostRow {
    pub id: String,
    pub author_id: String,
    /// Set when the post is published on behalf of a business
    pub business_id: Option<String>,
    pub content: String,
    /// JSON text array of media URLs
    pub media_urls: Option<String>,
    /// JSON text array of tags
    pub tags: Option<String>,
    pub like_count: i64,
    pub comment_count: i64,
    pub is_pinned: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub business_id: Option<String>,
    pub content: String,
    pub media_urls: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub like_count: i64,
    pub comment_count: i64,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentRow {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    /// Parent comment for threaded replies
    pub parent_id: Option<String>,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub parent_id: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarkRow {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRow {
    pub id: String,
    pub organizer_id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub is_virtual: bool,
    /// Maximum attendees, unlimited when not set
    pub capacity: Option<i64>,
    pub metadata: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub organizer_id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_virtual: bool,
    pub capacity: Option<i64>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRsvpRow {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    /// "going", "interested" or "declined"
    pub status: String,
    pub responded_at: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRsvp {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub status: String,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Learning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseRow {
    pub id: String,
    pub instructor_id: String,
    pub title: String,
    pub description: Option<String>,
    /// JSON text describing the course modules and lessons
    pub modules: Option<String>,
    pub is_published: bool,
    pub published_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub instructor_id: String,
    pub title: String,
    pub description: Option<String>,
    pub modules: Option<Value>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseEnrollmentRow {
    pub id: String,
    pub course_id: String,
    pub user_id: String,
    /// Completion ratio between 0.0 and 1.0
    pub progress: f64,
    pub enrolled_at: String,
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseEnrollment {
    pub id: String,
    pub course_id: String,
    pub user_id: String,
    pub progress: f64,
    pub enrolled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificateRow {
    pub id: String,
    pub enrollment_id: String,
    pub user_id: String,
    pub certificate_url: Option<String>,
    pub issued_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: String,
    pub enrollment_id: String,
    pub user_id: String,
    pub certificate_url: Option<String>,
    pub issued_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// DAO governance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DaoProposalRow {
    pub id: String,
    pub dao_id: String,
    pub proposer_id: String,
    pub title: String,
    pub description: Option<String>,
    /// "draft", "active", "passed", "rejected"
    pub status: String,
    pub votes_for: i64,
    pub votes_against: i64,
    /// JSON text array of ballot options
    pub options: Option<String>,
    pub voting_ends_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaoProposal {
    pub id: String,
    pub dao_id: String,
    pub proposer_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub votes_for: i64,
    pub votes_against: i64,
    pub options: Option<Value>,
    pub voting_ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A treasury movement. The database stores `amount` as numeric text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreasuryTransactionRow {
    pub id: String,
    pub dao_id: String,
    pub amount: String,
    pub currency: String,
    /// "deposit" or "withdrawal"
    pub transaction_type: String,
    pub tx_hash: Option<String>,
    pub date: String,
    pub metadata: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasuryTransaction {
    pub id: String,
    pub dao_id: String,
    pub amount: f64,
    pub currency: String,
    pub transaction_type: String,
    pub tx_hash: Option<String>,
    pub date: DateTime<Utc>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Marketplace
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceListingRow {
    pub id: String,
    pub seller_id: String,
    pub business_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    /// Numeric text, e.g. "19.99"
    pub price: String,
    pub currency: String,
    /// JSON text array of image URLs
    pub images: Option<String>,
    pub is_available: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceListing {
    pub id: String,
    pub seller_id: String,
    pub business_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub currency: String,
    pub images: Option<Vec<String>>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Media and files
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoRow {
    pub id: String,
    pub owner_id: String,
    pub url: String,
    pub caption: Option<String>,
    /// JSON text with dimensions, EXIF and so on
    pub metadata: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub owner_id: String,
    pub url: String,
    pub caption: Option<String>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// An uploaded file. `data` holds base64 content, not JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileUploadRow {
    pub id: String,
    pub owner_id: String,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub data: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUpload {
    pub id: String,
    pub owner_id: String,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub data: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Settings and reporting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSettingsRow {
    pub id: String,
    pub user_id: String,
    pub theme: Option<String>,
    /// JSON text of per-channel notification switches
    pub notification_preferences: Option<String>,
    /// JSON text of profile visibility switches
    pub privacy: Option<String>,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub id: String,
    pub user_id: String,
    pub theme: Option<String>,
    pub notification_preferences: Option<Value>,
    pub privacy: Option<Value>,
    pub updated_at: DateTime<Utc>,
}

/// Business analytics for a reporting period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReportRow {
    pub id: String,
    pub business_id: String,
    pub start_date: String,
    pub end_date: String,
    /// JSON text with the computed figures
    pub data: Option<String>,
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub id: String,
    pub business_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub data: Option<Value>,
    pub generated_at: DateTime<Utc>,
}
