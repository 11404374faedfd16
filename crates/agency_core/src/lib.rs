pub mod domain;
pub mod fallback;
pub mod gateway;
pub mod invoice;
pub mod mockup;
pub mod orchestrator;
pub mod ports;
pub mod pricing;
pub mod prompts;

pub use domain::{
    BlogContent, BlogRequest, CaptionRequest, CaptionSet, Client, ClientProfile, DesignRequest,
    EmailContent, EmailRequest, Feedback, GeneratedQuote, ProductContent, ProductRequest, Project,
    ProjectUpdate, QuoteRequest, WebsiteDesign,
};
pub use gateway::{Gateway, GatewayError};
pub use invoice::{Invoice, InvoiceRequest, InvoiceSequence, Money};
pub use orchestrator::{ContentOrchestrator, Generated, Source, ValidationError};
pub use ports::{CompletionRequest, CompletionService, PortError, PortResult, ProjectRepository};
pub use pricing::{PricingPolicy, Rounding};
