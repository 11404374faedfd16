//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between the browser tools and the API
//! server. Core domain types are embedded as-is; the wrappers add the
//! `success` flag and `timestamp` every response carries.

use agency_core::domain::{
    BlogContent, BlogRequest, CaptionRequest, CaptionSet, ClientProfile, DesignRequest,
    EmailContent, EmailRequest, Feedback, GeneratedQuote, ProductContent, ProductRequest, Project,
    ProjectUpdate, QuoteRequest, WebsiteDesign,
};
use agency_core::invoice::{Invoice, InvoiceItemRequest, InvoiceRequest};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Explicit `null` reads as the field's default, same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

//=========================================================================================
// Payloads Sent FROM the Browser TO the Server
//=========================================================================================

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateQuotePayload {
    /// The quote form. Every field is optional.
    #[serde(deserialize_with = "null_as_default")]
    #[schema(value_type = Object)]
    pub form_data: QuoteRequest,
    /// Free-text prompt composed by the quote tool. Blank means "build it from the form".
    #[serde(deserialize_with = "null_as_default")]
    pub prompt: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct GenerateDesignPayload {
    pub description: String,
}

impl From<GenerateDesignPayload> for DesignRequest {
    fn from(payload: GenerateDesignPayload) -> Self {
        DesignRequest {
            description: payload.description,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateMockupPayload {
    #[schema(value_type = Object)]
    pub design: WebsiteDesign,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateBlogPayload {
    pub topic: String,
    pub article_type: Option<String>,
    pub audience: Option<String>,
    pub tone: Option<String>,
    pub keywords: Option<String>,
    pub length: Option<String>,
}

impl From<GenerateBlogPayload> for BlogRequest {
    fn from(p: GenerateBlogPayload) -> Self {
        BlogRequest {
            topic: p.topic,
            article_type: p.article_type,
            audience: p.audience,
            tone: p.tone,
            keywords: p.keywords,
            length: p.length,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateCaptionPayload {
    pub content: String,
    pub mood: Option<String>,
    pub cta: Option<String>,
    pub include_hashtags: bool,
    pub include_emojis: bool,
    pub platform: Option<String>,
}

impl From<GenerateCaptionPayload> for CaptionRequest {
    fn from(p: GenerateCaptionPayload) -> Self {
        CaptionRequest {
            content: p.content,
            mood: p.mood,
            cta: p.cta,
            include_hashtags: p.include_hashtags,
            include_emojis: p.include_emojis,
            platform: p.platform,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateEmailPayload {
    pub email_type: Option<String>,
    pub subject: String,
    pub audience: Option<String>,
    pub goal: String,
}

impl From<GenerateEmailPayload> for EmailRequest {
    fn from(p: GenerateEmailPayload) -> Self {
        EmailRequest {
            email_type: p.email_type,
            subject: p.subject,
            audience: p.audience,
            goal: p.goal,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct GenerateProductPayload {
    pub name: String,
    pub category: Option<String>,
    /// Comma-separated feature list.
    pub features: String,
    pub audience: Option<String>,
    pub price: Option<String>,
}

impl From<GenerateProductPayload> for ProductRequest {
    fn from(p: GenerateProductPayload) -> Self {
        ProductRequest {
            name: p.name,
            category: p.category,
            features: p.features,
            audience: p.audience,
            price: p.price,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct InvoiceItemPayload {
    pub description: String,
    /// Defaults to 1.
    pub quantity: Option<f64>,
    /// Price per unit. Defaults to 0.
    pub rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateInvoicePayload {
    /// Omit to take the next number from the server's `INV-###` sequence.
    pub invoice_number: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    /// ISO code; `ZAR` when omitted.
    pub currency: Option<String>,
    /// Percent; 15 when omitted.
    pub tax_rate: Option<f64>,
    pub items: Vec<InvoiceItemPayload>,
}

impl From<GenerateInvoicePayload> for InvoiceRequest {
    fn from(p: GenerateInvoicePayload) -> Self {
        InvoiceRequest {
            invoice_number: p.invoice_number,
            issue_date: p.issue_date,
            due_date: p.due_date,
            currency: p.currency,
            tax_rate: p.tax_rate,
            items: p
                .items
                .into_iter()
                .map(|item| InvoiceItemRequest {
                    description: item.description,
                    quantity: item.quantity,
                    rate: item.rate,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedbackPayload {
    pub project_id: String,
    pub client_id: String,
    pub message: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AiUpdatePayload {
    pub project_id: String,
}

//=========================================================================================
// Responses Sent FROM the Server TO the Browser
//=========================================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub quote: GeneratedQuote,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DesignResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub design: WebsiteDesign,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MockupResponse {
    pub success: bool,
    /// A complete HTML document.
    pub mockup: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BlogResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub content: BlogContent,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CaptionResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub captions: CaptionSet,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmailResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub content: EmailContent,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub content: ProductContent,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub invoice: Invoice,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    /// Opaque demo token of the form `demo_token_<clientId>`.
    pub token: String,
    #[schema(value_type = Object)]
    pub client: ClientProfile,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub project: Project,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub feedback: Feedback,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AiUpdateResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub update: ProjectUpdate,
}

//=========================================================================================
// Error Bodies
//=========================================================================================

/// Error body of the content generation endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error body of the quote endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteFailureResponse {
    pub success: bool,
    pub error: String,
}

/// Error body of the client dashboard endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct FailureResponse {
    pub success: bool,
    pub message: String,
}

impl FailureResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
