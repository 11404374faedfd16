//! crates/agency_core/src/prompts.rs
//!
//! Fixed system instructions and user-prompt templates for every content kind.
//! Prompt building is plain string substitution; nothing here can fail.

use std::fmt;

use crate::domain::{
    BlogRequest, CaptionRequest, DesignRequest, EmailRequest, MilestoneStatus, ProductRequest,
    Project, QuoteRequest,
};
use crate::ports::CompletionRequest;

/// The kinds of content the gateway knows how to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Quote,
    Design,
    Blog,
    Caption,
    Email,
    Product,
    ProjectUpdate,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Quote => "quote",
            Self::Design => "design",
            Self::Blog => "blog",
            Self::Caption => "caption",
            Self::Email => "email",
            Self::Product => "product",
            Self::ProjectUpdate => "project-update",
        };
        f.write_str(name)
    }
}

/// The parameters of a single content request, borrowed from the caller.
#[derive(Debug, Clone, Copy)]
pub enum ContentRequest<'a> {
    Quote {
        request: &'a QuoteRequest,
        prompt: &'a str,
    },
    Design(&'a DesignRequest),
    Blog(&'a BlogRequest),
    Caption(&'a CaptionRequest),
    Email(&'a EmailRequest),
    Product(&'a ProductRequest),
    ProjectUpdate(&'a Project),
}

impl ContentRequest<'_> {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Quote { .. } => ContentKind::Quote,
            Self::Design(_) => ContentKind::Design,
            Self::Blog(_) => ContentKind::Blog,
            Self::Caption(_) => ContentKind::Caption,
            Self::Email(_) => ContentKind::Email,
            Self::Product(_) => ContentKind::Product,
            Self::ProjectUpdate(_) => ContentKind::ProjectUpdate,
        }
    }

    /// Builds the complete completion request: system instruction, sampling
    /// settings and the user prompt.
    pub fn to_completion(&self) -> CompletionRequest {
        let (system, temperature, max_tokens) = settings(self.kind());
        let prompt = match self {
            Self::Quote { request, prompt } => quote_prompt(request, prompt),
            Self::Design(request) => {
                fill_template(DESIGN_TEMPLATE, &[("description", request.description.as_str())])
            }
            Self::Blog(request) => blog_prompt(request),
            Self::Caption(request) => caption_prompt(request),
            Self::Email(request) => email_prompt(request),
            Self::Product(request) => product_prompt(request),
            Self::ProjectUpdate(project) => project_update_prompt(project),
        };

        CompletionRequest {
            system: system.to_string(),
            prompt,
            temperature,
            max_tokens,
        }
    }
}

fn settings(kind: ContentKind) -> (&'static str, f32, u32) {
    match kind {
        // Lower temperature keeps pricing narrative consistent.
        ContentKind::Quote => (QUOTE_SYSTEM, 0.3, 2000),
        ContentKind::Design => (DESIGN_SYSTEM, 0.7, 1500),
        ContentKind::Blog => (BLOG_SYSTEM, 0.7, 2000),
        ContentKind::Caption => (CAPTION_SYSTEM, 0.8, 1500),
        ContentKind::Email => (EMAIL_SYSTEM, 0.7, 1500),
        ContentKind::Product => (PRODUCT_SYSTEM, 0.7, 1500),
        ContentKind::ProjectUpdate => (PROJECT_UPDATE_SYSTEM, 0.7, 200),
    }
}

//=========================================================================================
// System Instructions
//=========================================================================================

const QUOTE_SYSTEM: &str = "You are an expert web development project manager and cost estimator. \
Review client requirements and recommend worthwhile additions, considering industry standards and complexity factors. \
Always respond with valid JSON.";

const DESIGN_SYSTEM: &str = "You are a professional web designer and UX expert. \
Generate practical, modern website designs based on user requirements. Always respond with valid JSON.";

const BLOG_SYSTEM: &str = "You are an expert content writer and SEO specialist. \
Create engaging, well-structured blog content that ranks well and engages readers. Always respond with valid JSON.";

const CAPTION_SYSTEM: &str = "You are a social media expert who creates viral, engaging content for different platforms. \
Always respond with valid JSON.";

const EMAIL_SYSTEM: &str = "You are an expert email marketer who creates high-converting email campaigns. \
Always respond with valid JSON.";

const PRODUCT_SYSTEM: &str = "You are an expert copywriter who creates compelling product descriptions that convert browsers into buyers. \
Always respond with valid JSON.";

const PROJECT_UPDATE_SYSTEM: &str = "You are a professional project manager providing client updates. \
Be encouraging, specific, and professional.";

//=========================================================================================
// User Prompt Templates
//=========================================================================================

const QUOTE_TEMPLATE: &str = r#"Generate a detailed project quote for a {project_type} website with the following requirements:

Project Description: {description}
Required Features: {features}
Timeline: {timeline}
Budget Range: {budget}

Please provide:
1. Suggested additional features that would benefit this project
2. Potential challenges or considerations
3. Technology recommendations"#;

const QUOTE_RESPONSE_SHAPE: &str = r#"Return a JSON object with:
- suggestions: array of short strings, each one recommended addition for this project
Prices and timelines are calculated separately; do not include them."#;

const DESIGN_TEMPLATE: &str = r##"Based on this website description: "{description}"

Analyze the requirements and generate a JSON response with:
1. Recommended website type (business, ecommerce, portfolio, restaurant, nonprofit, blog)
2. Suggested sections/pages
3. Color scheme (primary, secondary, accent colors)
4. Key features needed
5. Content suggestions for each section
6. Technical requirements

Return a valid JSON object with this structure:
{
  "websiteType": "business|ecommerce|portfolio|restaurant|nonprofit|blog",
  "siteName": "suggested site name",
  "tagline": "catchy tagline",
  "sections": [
    {
      "name": "section name",
      "title": "section title",
      "content": "suggested content description",
      "features": ["feature1", "feature2"]
    }
  ],
  "colorScheme": {
    "primary": "#hex",
    "secondary": "#hex",
    "accent": "#hex",
    "background": "#hex",
    "text": "#hex"
  },
  "features": ["list of required features"],
  "pages": ["list of pages needed"],
  "technicalRequirements": ["requirements"],
  "contentSuggestions": {
    "hero": "hero section content",
    "about": "about section content"
  }
}"##;

const BLOG_TEMPLATE: &str = r#"Write a {article_type} blog post about "{topic}".
{audience_line}
Writing tone: {tone}
Length: {length} (short=300-500 words, medium=500-1000 words, long=1000+ words)
{keywords_line}

Return a JSON object with:
- title: compelling headline
- introduction: engaging opening paragraph
- sections: array of {heading, content} objects for main sections
- conclusion: strong closing paragraph
- wordCount: estimated word count

Make it engaging, informative, and optimized for SEO."#;

const CAPTION_TEMPLATE: &str = r#"Create 3 different social media captions for {platform} about: "{content}"

Mood/Tone: {mood}
{cta_line}
{hashtag_line}
{emoji_line}
Character limit: {limit}

Return a JSON object with:
- captions: array of {version, text} objects
- platform: the target platform
- characterCounts: array of character counts for each caption

Make them engaging and platform-appropriate."#;

const EMAIL_TEMPLATE: &str = r#"Create a {email_type} email about "{subject}".
Target audience: {audience}
Goal: {goal}

Return a JSON object with:
- subject: compelling subject line
- opening: email greeting and opening
- body: main email content
- cta: call to action
- closing: professional closing

Make it professional, engaging, and action-oriented."#;

const PRODUCT_TEMPLATE: &str = r#"Create product descriptions for "{name}" - a {category} product.
Features: {features}
Target customer: {audience}
Price range: {price}

Return a JSON object with:
- shortDescription: brief 1-sentence description
- detailedDescription: comprehensive description
- bulletPoints: key features as bullet points
- benefits: array of customer benefits
- callToAction: compelling purchase prompt

Focus on benefits, not just features. Make it persuasive and conversion-focused."#;

const PROJECT_UPDATE_TEMPLATE: &str = r#"Generate a personalized project update for a client based on the following project details:

Project: {name}
Status: {status}
Progress: {progress}%
Timeline: {deadline}

Recent milestones:
{recent}

Current milestone:
{current}

Generate a brief, encouraging update in plain language that:
1. Acknowledges recent progress
2. Mentions specific achievements
3. Provides next steps
4. Maintains a positive, professional tone
5. Is 2-3 sentences long

Respond with just the update text, no additional formatting."#;

//=========================================================================================
// Prompt Builders
//=========================================================================================

/// Substitutes `{key}` placeholders in one pass over `template`.
///
/// Substituted text is never scanned again, so braces in caller text come out
/// verbatim. Braces that do not name a known key are copied as-is.
pub(crate) fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let hit = tail.find('}').and_then(|close| {
            let key = &tail[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (close, *value))
        });
        match hit {
            Some((close, value)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// The client may send its own prompt text; otherwise one is built from the form.
/// The response-shape instructions are always appended.
fn quote_prompt(request: &QuoteRequest, client_prompt: &str) -> String {
    let body = if client_prompt.trim().is_empty() {
        let features = if request.features.is_empty() {
            "basic functionality".to_string()
        } else {
            request
                .features
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        fill_template(
            QUOTE_TEMPLATE,
            &[
                ("project_type", request.project_type.as_str()),
                ("description", request.description.as_str()),
                ("features", features.as_str()),
                ("timeline", request.timeline.as_str()),
                (
                    "budget",
                    request.budget_band.map(|b| b.as_str()).unwrap_or("not specified"),
                ),
            ],
        )
    } else {
        client_prompt.trim().to_string()
    };

    format!("{}\n\n{}", body, QUOTE_RESPONSE_SHAPE)
}

fn blog_prompt(request: &BlogRequest) -> String {
    let audience_line = request
        .audience
        .as_deref()
        .map(|a| format!("Target audience: {}", a))
        .unwrap_or_default();
    let keywords_line = request
        .keywords
        .as_deref()
        .map(|k| format!("Keywords to include: {}", k))
        .unwrap_or_default();

    fill_template(
        BLOG_TEMPLATE,
        &[
            ("article_type", request.article_type.as_deref().unwrap_or("how-to")),
            ("topic", request.topic.as_str()),
            ("audience_line", audience_line.as_str()),
            ("tone", request.tone.as_deref().unwrap_or("professional")),
            ("length", request.length.as_deref().unwrap_or("medium")),
            ("keywords_line", keywords_line.as_str()),
        ],
    )
}

/// Character limit for a caption on the given platform.
pub fn platform_limit(platform: &str) -> usize {
    match platform {
        "instagram" => 2200,
        "twitter" => 280,
        "facebook" => 500,
        "linkedin" => 700,
        "tiktok" => 150,
        _ => 500,
    }
}

fn caption_prompt(request: &CaptionRequest) -> String {
    let platform = request.platform.as_deref().unwrap_or("instagram");
    let cta_line = request
        .cta
        .as_deref()
        .map(|c| format!("Call to action: {}", c))
        .unwrap_or_default();
    let hashtag_line = if request.include_hashtags {
        "Include relevant hashtags"
    } else {
        "No hashtags needed"
    };
    let emoji_line = if request.include_emojis {
        "Include appropriate emojis"
    } else {
        "No emojis needed"
    };

    let limit = platform_limit(platform).to_string();
    fill_template(
        CAPTION_TEMPLATE,
        &[
            ("platform", platform),
            ("content", request.content.as_str()),
            ("mood", request.mood.as_deref().unwrap_or("casual")),
            ("cta_line", cta_line.as_str()),
            ("hashtag_line", hashtag_line),
            ("emoji_line", emoji_line),
            ("limit", limit.as_str()),
        ],
    )
}

fn email_prompt(request: &EmailRequest) -> String {
    fill_template(
        EMAIL_TEMPLATE,
        &[
            ("email_type", request.email_type.as_deref().unwrap_or("newsletter")),
            ("subject", request.subject.as_str()),
            ("audience", request.audience.as_deref().unwrap_or("general audience")),
            ("goal", request.goal.as_str()),
        ],
    )
}

fn product_prompt(request: &ProductRequest) -> String {
    fill_template(
        PRODUCT_TEMPLATE,
        &[
            ("name", request.name.as_str()),
            ("category", request.category.as_deref().unwrap_or("general")),
            ("features", request.features.as_str()),
            ("audience", request.audience.as_deref().unwrap_or("general customers")),
            ("price", request.price.as_deref().unwrap_or("competitive")),
        ],
    )
}

fn project_update_prompt(project: &Project) -> String {
    let completed: Vec<_> = project
        .milestones
        .iter()
        .filter(|m| m.status == MilestoneStatus::Completed)
        .collect();
    let recent = completed
        .iter()
        .skip(completed.len().saturating_sub(2))
        .map(|m| format!("- {}: {}", m.title, m.description))
        .collect::<Vec<_>>()
        .join("\n");
    let current = project
        .milestones
        .iter()
        .find(|m| m.status == MilestoneStatus::InProgress)
        .map(|m| m.description.as_str())
        .unwrap_or("Development in progress");
    let progress = project.progress.to_string();

    fill_template(
        PROJECT_UPDATE_TEMPLATE,
        &[
            ("name", project.name.as_str()),
            ("status", project.status.as_str()),
            ("progress", progress.as_str()),
            ("deadline", project.deadline.as_str()),
            ("recent", recent.as_str()),
            ("current", current),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BudgetBand, Feature, ProjectType, TimelinePreference};

    #[test]
    fn quote_prompt_is_built_from_the_form_when_no_prompt_is_given() {
        let request = QuoteRequest {
            project_type: ProjectType::Ecommerce,
            features: vec![Feature::Cms, Feature::Booking],
            timeline: TimelinePreference::Rush,
            budget_band: Some(BudgetBand::Large),
            description: "Handmade candles".to_string(),
        };
        let completion = ContentRequest::Quote { request: &request, prompt: "  " }.to_completion();

        assert!(completion.prompt.contains("a ecommerce website"));
        assert!(completion.prompt.contains("Required Features: cms, booking"));
        assert!(completion.prompt.contains("Budget Range: large"));
        assert!(completion.prompt.ends_with(QUOTE_RESPONSE_SHAPE));
        assert_eq!(completion.temperature, 0.3);
        assert_eq!(completion.max_tokens, 2000);
    }

    #[test]
    fn client_supplied_quote_prompt_is_kept() {
        let request = QuoteRequest::default();
        let completion = ContentRequest::Quote {
            request: &request,
            prompt: "Quote me a bakery site",
        }
        .to_completion();

        assert!(completion.prompt.starts_with("Quote me a bakery site\n\n"));
    }

    #[test]
    fn caption_prompt_uses_platform_limit() {
        let request = CaptionRequest {
            content: "Our new espresso blend".to_string(),
            platform: Some("twitter".to_string()),
            include_hashtags: true,
            ..Default::default()
        };
        let completion = ContentRequest::Caption(&request).to_completion();

        assert!(completion.prompt.contains("Character limit: 280"));
        assert!(completion.prompt.contains("Include relevant hashtags"));
        assert!(completion.prompt.contains("No emojis needed"));
        assert_eq!(completion.temperature, 0.8);
    }

    #[test]
    fn prompts_are_deterministic() {
        let request = BlogRequest {
            topic: "Local SEO".to_string(),
            keywords: Some("maps, reviews".to_string()),
            ..Default::default()
        };
        let first = ContentRequest::Blog(&request).to_completion();
        let second = ContentRequest::Blog(&request).to_completion();

        assert_eq!(first, second);
        assert!(first.prompt.contains("Keywords to include: maps, reviews"));
        assert!(first.prompt.contains("Write a how-to blog post"));
    }

    #[test]
    fn placeholders_in_caller_text_are_kept_verbatim() {
        let request = BlogRequest {
            topic: "Why {tone} matters for {length} posts".to_string(),
            tone: Some("witty".to_string()),
            ..Default::default()
        };
        let completion = ContentRequest::Blog(&request).to_completion();

        assert!(completion
            .prompt
            .contains(r#"Write a how-to blog post about "Why {tone} matters for {length} posts"."#));
        assert!(completion.prompt.contains("Writing tone: witty"));
        assert!(completion.prompt.contains("Length: medium"));
    }

    #[test]
    fn fill_template_leaves_unknown_braces_alone() {
        let filled = fill_template(
            "{a} and {b} with {heading, content} and {",
            &[("a", "{b}"), ("b", "two")],
        );
        assert_eq!(filled, "{b} and two with {heading, content} and {");
    }
}
