//! crates/agency_core/src/domain.rs
//!
//! Defines the core data structures for the agency toolkit: quote requests and
//! generated quotes, the content-generation requests and results, and the demo
//! client/project records served by the dashboard.
//!
//! Every value here is request-scoped. Nothing is shared or mutated across requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

//=========================================================================================
// Quote Inputs
//=========================================================================================

/// The kind of website a quote is requested for.
///
/// Unrecognised values are kept in `Other` so they can be priced with defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectType {
    Business,
    Ecommerce,
    Portfolio,
    Blog,
    Restaurant,
    Custom,
    Other(String),
}

impl ProjectType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Business => "business",
            Self::Ecommerce => "ecommerce",
            Self::Portfolio => "portfolio",
            Self::Blog => "blog",
            Self::Restaurant => "restaurant",
            Self::Custom => "custom",
            Self::Other(raw) => raw,
        }
    }
}

impl Default for ProjectType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for ProjectType {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "business" => Self::Business,
            "ecommerce" => Self::Ecommerce,
            "portfolio" => Self::Portfolio,
            "blog" => Self::Blog,
            "restaurant" => Self::Restaurant,
            "custom" => Self::Custom,
            _ => Self::Other(raw),
        }
    }
}

impl From<ProjectType> for String {
    fn from(value: ProjectType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A feature a client can add to their project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Feature {
    Responsive,
    Cms,
    Seo,
    Analytics,
    Contact,
    Social,
    Ecommerce,
    Booking,
    Membership,
    Other(String),
}

impl Feature {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Responsive => "responsive",
            Self::Cms => "cms",
            Self::Seo => "seo",
            Self::Analytics => "analytics",
            Self::Contact => "contact",
            Self::Social => "social",
            Self::Ecommerce => "ecommerce",
            Self::Booking => "booking",
            Self::Membership => "membership",
            Self::Other(raw) => raw,
        }
    }

    /// The human-readable name shown on a quote. Unknown features keep their raw name.
    pub fn label(&self) -> &str {
        match self {
            Self::Responsive => "Mobile-responsive design",
            Self::Cms => "Content management system",
            Self::Seo => "Search engine optimization",
            Self::Analytics => "Analytics and tracking",
            Self::Contact => "Contact forms and lead capture",
            Self::Social => "Social media integration",
            Self::Ecommerce => "E-commerce functionality",
            Self::Booking => "Appointment/booking system",
            Self::Membership => "User accounts and membership area",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for Feature {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "responsive" => Self::Responsive,
            "cms" => Self::Cms,
            "seo" => Self::Seo,
            "analytics" => Self::Analytics,
            "contact" => Self::Contact,
            "social" => Self::Social,
            "ecommerce" => Self::Ecommerce,
            "booking" => Self::Booking,
            "membership" => Self::Membership,
            _ => Self::Other(raw),
        }
    }
}

impl From<Feature> for String {
    fn from(value: Feature) -> Self {
        value.as_str().to_string()
    }
}

/// How quickly the client wants the project delivered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TimelinePreference {
    Rush,
    Standard,
    Relaxed,
    Flexible,
    Other(String),
}

impl TimelinePreference {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Rush => "rush",
            Self::Standard => "standard",
            Self::Relaxed => "relaxed",
            Self::Flexible => "flexible",
            Self::Other(raw) => raw,
        }
    }
}

impl Default for TimelinePreference {
    fn default() -> Self {
        Self::Standard
    }
}

impl From<String> for TimelinePreference {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "rush" => Self::Rush,
            "standard" => Self::Standard,
            "relaxed" => Self::Relaxed,
            "flexible" => Self::Flexible,
            _ => Self::Other(raw),
        }
    }
}

impl From<TimelinePreference> for String {
    fn from(value: TimelinePreference) -> Self {
        value.as_str().to_string()
    }
}

/// A named budget range. Each band carries a `[min, max]` clamp and a multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetBand {
    Small,
    Medium,
    Large,
    Enterprise,
}

impl BudgetBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Enterprise => "enterprise",
        }
    }
}

impl FromStr for BudgetBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            "enterprise" => Ok(Self::Enterprise),
            other => Err(format!("unknown budget band '{}'", other)),
        }
    }
}

/// Unknown or empty budget bands are treated as absent, which skips clamping.
fn lenient_budget_band<'de, D>(deserializer: D) -> Result<Option<BudgetBand>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(raw) => raw.parse().ok(),
        _ => None,
    })
}

/// Reads a string-backed field, falling back to the default for `null` and non-string values.
fn lenient_text<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String> + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(raw) => T::from(raw),
        _ => T::default(),
    })
}

/// Anything but an array counts as "no features". Non-string entries are skipped.
fn lenient_features<'de, D>(deserializer: D) -> Result<Vec<Feature>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(raw) => Some(Feature::from(raw)),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// The structured form a prospective client submits to get a price estimate.
///
/// Deserialization never fails on field contents: malformed values price as defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteRequest {
    #[serde(deserialize_with = "lenient_text")]
    pub project_type: ProjectType,
    #[serde(deserialize_with = "lenient_features")]
    pub features: Vec<Feature>,
    #[serde(alias = "timelinePreference", deserialize_with = "lenient_text")]
    pub timeline: TimelinePreference,
    #[serde(
        rename = "budgetRange",
        alias = "budgetBand",
        deserialize_with = "lenient_budget_band",
        skip_serializing_if = "Option::is_none"
    )]
    pub budget_band: Option<BudgetBand>,
    pub description: String,
}

//=========================================================================================
// Generated Quote
//=========================================================================================

/// One line of a cost breakdown, in whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostLineItem {
    pub line_item: String,
    pub amount: u64,
}

/// A contiguous day range of a project schedule. Days are 1-based and inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePhase {
    pub name: String,
    pub start_day: u32,
    pub end_day: u32,
    pub duration_days: u32,
    pub description: String,
}

/// Where a generated quote's narrative came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuote {
    pub total_cost: u64,
    pub currency: String,
    pub breakdown: Vec<CostLineItem>,
    pub timeline: Vec<TimelinePhase>,
    pub total_days: u32,
    pub included_features: Vec<String>,
    pub suggestions: Vec<String>,
    pub project_type: ProjectType,
    pub confidence: Confidence,
    pub valid_until: DateTime<Utc>,
}

//=========================================================================================
// Website Design
//=========================================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct DesignRequest {
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebsiteType {
    Business,
    Ecommerce,
    Portfolio,
    Restaurant,
    Nonprofit,
    Blog,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSection {
    pub name: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteDesign {
    pub website_type: WebsiteType,
    pub site_name: String,
    pub tagline: String,
    pub sections: Vec<DesignSection>,
    pub color_scheme: ColorScheme,
    pub features: Vec<String>,
    pub pages: Vec<String>,
    pub technical_requirements: Vec<String>,
    pub content_suggestions: BTreeMap<String, String>,
}

//=========================================================================================
// Marketing Content
//=========================================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogRequest {
    pub topic: String,
    pub article_type: Option<String>,
    pub audience: Option<String>,
    pub tone: Option<String>,
    pub keywords: Option<String>,
    pub length: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogSection {
    pub heading: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogContent {
    pub title: String,
    pub introduction: String,
    pub sections: Vec<BlogSection>,
    pub conclusion: String,
    #[serde(deserialize_with = "string_or_number")]
    pub word_count: String,
}

/// Completion APIs report word counts as either `"750"` or `750`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(n) => n.to_string(),
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptionRequest {
    pub content: String,
    pub mood: Option<String>,
    pub cta: Option<String>,
    pub include_hashtags: bool,
    pub include_emojis: bool,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    pub version: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionSet {
    pub captions: Vec<Caption>,
    pub platform: String,
    #[serde(default)]
    pub character_counts: Vec<usize>,
}

impl CaptionSet {
    /// Recomputes `character_counts` so it always matches the caption texts.
    pub fn with_counts(mut self) -> Self {
        self.character_counts = self
            .captions
            .iter()
            .map(|c| c.text.chars().count())
            .collect();
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailRequest {
    pub email_type: Option<String>,
    pub subject: String,
    pub audience: Option<String>,
    pub goal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailContent {
    pub subject: String,
    pub opening: String,
    pub body: String,
    pub cta: String,
    pub closing: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductRequest {
    pub name: String,
    pub category: Option<String>,
    pub features: String,
    pub audience: Option<String>,
    pub price: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductContent {
    pub short_description: String,
    pub detailed_description: String,
    pub bullet_points: String,
    pub benefits: Vec<String>,
    pub call_to_action: String,
}

//=========================================================================================
// Client Dashboard Records
//=========================================================================================

/// A dashboard client, including the demo password used for login.
#[derive(Debug, Clone)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub project_id: String,
    pub avatar: String,
}

/// The part of a `Client` that is safe to return over the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub project_id: String,
}

impl From<&Client> for ClientProfile {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.clone(),
            name: client.name.clone(),
            email: client.email.clone(),
            avatar: client.avatar.clone(),
            project_id: client.project_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MilestoneStatus {
    Completed,
    InProgress,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Milestone {
    pub id: String,
    pub date: String,
    pub title: String,
    pub status: MilestoneStatus,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageAuthorKind {
    Team,
    Client,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectMessage {
    pub id: String,
    pub author: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: MessageAuthorKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub upload_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub client_id: String,
    pub name: String,
    pub status: String,
    pub progress: u8,
    pub budget: String,
    pub deadline: String,
    pub created_at: String,
    pub team: Vec<TeamMember>,
    pub milestones: Vec<Milestone>,
    pub messages: Vec<ProjectMessage>,
    pub files: Vec<ProjectFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub project_id: String,
    pub client_id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub status: String,
}

/// A short status message for a client about their project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectUpdate {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub confidence: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_request_treats_nulls_as_defaults() {
        let request: QuoteRequest = serde_json::from_str(
            r#"{"projectType":null,"features":null,"timeline":null,"budgetRange":null}"#,
        )
        .unwrap();
        assert_eq!(request, QuoteRequest::default());
    }

    #[test]
    fn quote_request_ignores_non_array_features() {
        let request: QuoteRequest =
            serde_json::from_str(r#"{"projectType":"blog","features":"cms"}"#).unwrap();
        assert_eq!(request.project_type, ProjectType::Blog);
        assert!(request.features.is_empty());

        let request: QuoteRequest =
            serde_json::from_str(r#"{"features":["seo",7,null,"CMS"],"timeline":42}"#).unwrap();
        assert_eq!(request.features, vec![Feature::Seo, Feature::Cms]);
        assert_eq!(request.timeline, TimelinePreference::Standard);
    }

    #[test]
    fn budget_band_accepts_unknown_values() {
        let request: QuoteRequest =
            serde_json::from_str(r#"{"budgetRange":"whatever"}"#).unwrap();
        assert_eq!(request.budget_band, None);
        let request: QuoteRequest = serde_json::from_str(r#"{"budgetRange":5000}"#).unwrap();
        assert_eq!(request.budget_band, None);
    }
}
