//! crates/agency_core/src/fallback.rs
//!
//! Deterministic content used whenever the completion gateway fails.
//!
//! Every generator is total and returns exactly the shape the gateway would
//! have produced for the same kind, so callers never need to know which path
//! produced their data.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::domain::{
    BlogContent, BlogRequest, BlogSection, Caption, CaptionRequest, CaptionSet, ColorScheme,
    DesignRequest, DesignSection, EmailContent, EmailRequest, ProductContent, ProductRequest,
    Project, QuoteRequest, WebsiteDesign, WebsiteType,
};
use crate::gateway::{ParsedContent, QuoteNarrative};
use crate::pricing;
use crate::prompts::ContentRequest;

/// Produces fallback content for any request.
pub fn generate_fallback(request: ContentRequest<'_>) -> ParsedContent {
    match request {
        ContentRequest::Quote { request, .. } => ParsedContent::Quote(quote(request)),
        ContentRequest::Design(request) => ParsedContent::Design(design(request)),
        ContentRequest::Blog(request) => ParsedContent::Blog(blog(request)),
        ContentRequest::Caption(request) => ParsedContent::Caption(caption(request)),
        ContentRequest::Email(request) => ParsedContent::Email(email(request)),
        ContentRequest::Product(request) => ParsedContent::Product(product(request)),
        ContentRequest::ProjectUpdate(project) => {
            ParsedContent::ProjectUpdate(project_update(project))
        }
    }
}

//=========================================================================================
// Quote
//=========================================================================================

/// The rule engine's suggestions for the project type. Prices are never part
/// of the narrative; they always come from `pricing::compute_quote`.
pub fn quote(request: &QuoteRequest) -> QuoteNarrative {
    QuoteNarrative {
        suggestions: pricing::suggestions(&request.project_type),
    }
}

//=========================================================================================
// Website Design
//=========================================================================================

/// Picks a website type from keywords in the description.
pub fn classify_website(description: &str) -> WebsiteType {
    let text = description.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| text.contains(w));

    if mentions(&["shop", "store", "ecommerce", "sell"]) {
        WebsiteType::Ecommerce
    } else if mentions(&["portfolio", "designer", "artist", "photography"]) {
        WebsiteType::Portfolio
    } else if mentions(&["restaurant", "cafe", "food", "bakery"]) {
        WebsiteType::Restaurant
    } else if mentions(&["nonprofit", "charity", "foundation"]) {
        WebsiteType::Nonprofit
    } else if mentions(&["blog", "news", "magazine"]) {
        WebsiteType::Blog
    } else {
        WebsiteType::Business
    }
}

static SITE_NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)for my (.+?) with",
        r"(?i)for (.+?) business",
        r"(?i)(.+?) website",
        r"(?i)(.+?) needs",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Pulls a business name out of phrases like "for my X with" or "X website".
pub fn extract_site_name(description: &str) -> Option<String> {
    SITE_NAME_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(description)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|name| !name.is_empty())
    })
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn section(name: &str, title: &str, content: &str, features: &[&str]) -> DesignSection {
    DesignSection {
        name: name.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        features: strings(features),
    }
}

/// Template colors as (primary, secondary, background).
fn palette(kind: WebsiteType) -> (&'static str, &'static str, &'static str) {
    match kind {
        WebsiteType::Business => ("#1e293b", "#38bdf8", "#ffffff"),
        WebsiteType::Ecommerce => ("#059669", "#10b981", "#ffffff"),
        WebsiteType::Portfolio => ("#7c3aed", "#a855f7", "#ffffff"),
        WebsiteType::Restaurant => ("#dc2626", "#ef4444", "#ffffff"),
        WebsiteType::Nonprofit => ("#2563eb", "#3b82f6", "#ffffff"),
        WebsiteType::Blog => ("#374151", "#6b7280", "#ffffff"),
    }
}

fn tagline(kind: WebsiteType) -> &'static str {
    match kind {
        WebsiteType::Business => "Your Success, Our Priority",
        WebsiteType::Ecommerce => "Shop Smart, Shop With Us",
        WebsiteType::Portfolio => "Showcasing Excellence",
        WebsiteType::Restaurant => "Taste the Difference",
        WebsiteType::Nonprofit => "Making a Difference Together",
        WebsiteType::Blog => "Stories That Matter",
    }
}

fn design_sections(kind: WebsiteType) -> Vec<DesignSection> {
    match kind {
        WebsiteType::Business => vec![
            section(
                "hero",
                "Welcome",
                "Compelling hero section with value proposition",
                &["Call-to-action", "Trust indicators"],
            ),
            section(
                "services",
                "Our Services",
                "Showcase your key services",
                &["Service cards", "Pricing"],
            ),
            section(
                "about",
                "About Us",
                "Your company story and values",
                &["Team photos", "Mission statement"],
            ),
            section(
                "contact",
                "Contact",
                "Get in touch section",
                &["Contact form", "Location map"],
            ),
        ],
        WebsiteType::Ecommerce => vec![
            section(
                "hero",
                "Shop Now",
                "Featured products and promotions",
                &["Product carousel", "Search bar"],
            ),
            section(
                "categories",
                "Categories",
                "Product categories",
                &["Category grid", "Filters"],
            ),
            section(
                "featured",
                "Featured Products",
                "Best sellers and recommendations",
                &["Product cards", "Reviews"],
            ),
        ],
        WebsiteType::Portfolio => vec![
            section(
                "hero",
                "Hello",
                "A bold introduction to your work",
                &["Signature project", "Call-to-action"],
            ),
            section(
                "gallery",
                "Selected Work",
                "Curated gallery of your best projects",
                &["Image grid", "Lightbox"],
            ),
            section(
                "about",
                "About Me",
                "Your background and creative approach",
                &["Portrait", "Biography"],
            ),
            section(
                "contact",
                "Work With Me",
                "Invite enquiries for new projects",
                &["Contact form", "Social links"],
            ),
        ],
        WebsiteType::Restaurant => vec![
            section(
                "hero",
                "Welcome",
                "Atmosphere shots and today's highlights",
                &["Hero image", "Reserve button"],
            ),
            section(
                "menu",
                "Our Menu",
                "Dishes, prices and dietary information",
                &["Menu categories", "Dietary labels"],
            ),
            section(
                "about",
                "Our Story",
                "The people and passion behind the kitchen",
                &["Chef profile", "Photo gallery"],
            ),
            section(
                "location",
                "Find Us",
                "Address, opening hours and directions",
                &["Location map", "Opening hours"],
            ),
        ],
        WebsiteType::Nonprofit => vec![
            section(
                "hero",
                "Join Our Mission",
                "A clear statement of the cause",
                &["Impact numbers", "Donate button"],
            ),
            section(
                "mission",
                "Our Mission",
                "Why the organisation exists and who it serves",
                &["Mission statement", "Stories"],
            ),
            section(
                "programs",
                "Programs",
                "The work you do and its results",
                &["Program cards", "Impact reports"],
            ),
            section(
                "donate",
                "Support Us",
                "Ways to give and get involved",
                &["Donation form", "Volunteer signup"],
            ),
        ],
        WebsiteType::Blog => vec![
            section(
                "hero",
                "Latest Stories",
                "Featured article and what the blog is about",
                &["Featured post", "Search bar"],
            ),
            section(
                "recent-posts",
                "Recent Posts",
                "The newest articles",
                &["Post cards", "Pagination"],
            ),
            section(
                "categories",
                "Categories",
                "Browse articles by topic",
                &["Category list", "Tag cloud"],
            ),
            section(
                "newsletter",
                "Newsletter",
                "Invite readers to subscribe",
                &["Signup form", "Archive link"],
            ),
        ],
    }
}

fn design_features(kind: WebsiteType) -> &'static [&'static str] {
    match kind {
        WebsiteType::Business => &[
            "Contact forms",
            "Service pages",
            "Testimonials",
            "SEO optimization",
        ],
        WebsiteType::Ecommerce => &[
            "Shopping cart",
            "Payment processing",
            "Inventory management",
            "Customer accounts",
        ],
        WebsiteType::Portfolio => &[
            "Image galleries",
            "Project showcase",
            "Client testimonials",
            "Contact forms",
        ],
        WebsiteType::Restaurant => &[
            "Online menu",
            "Reservation system",
            "Location maps",
            "Photo gallery",
        ],
        WebsiteType::Nonprofit => &[
            "Donation system",
            "Volunteer signup",
            "Event calendar",
            "Mission statement",
        ],
        WebsiteType::Blog => &["Content management", "Categories", "Comments", "Newsletter signup"],
    }
}

fn design_pages(kind: WebsiteType) -> &'static [&'static str] {
    match kind {
        WebsiteType::Business => &["Home", "Services", "About", "Contact", "Blog"],
        WebsiteType::Ecommerce => &["Home", "Shop", "Product Pages", "Cart", "Checkout", "Account"],
        WebsiteType::Portfolio => &["Home", "Portfolio", "About", "Services", "Contact"],
        WebsiteType::Restaurant => &["Home", "Menu", "About", "Reservations", "Contact"],
        WebsiteType::Nonprofit => &["Home", "About", "Programs", "Volunteer", "Donate"],
        WebsiteType::Blog => &["Home", "Blog", "Categories", "About", "Contact"],
    }
}

fn technical_requirements(kind: WebsiteType) -> &'static [&'static str] {
    match kind {
        WebsiteType::Business => &["Responsive design", "SEO optimization", "Contact forms", "CMS"],
        WebsiteType::Ecommerce => &[
            "Payment gateway",
            "SSL certificate",
            "Inventory system",
            "Customer management",
        ],
        WebsiteType::Portfolio => &[
            "Image optimization",
            "Gallery system",
            "Responsive design",
            "Fast loading",
        ],
        WebsiteType::Restaurant => &[
            "Reservation system",
            "Menu management",
            "Location services",
            "Mobile optimization",
        ],
        WebsiteType::Nonprofit => &[
            "Donation processing",
            "Event management",
            "Volunteer system",
            "Social integration",
        ],
        WebsiteType::Blog => &[
            "Content management",
            "SEO tools",
            "Comment system",
            "Social sharing",
        ],
    }
}

fn content_suggestions() -> BTreeMap<String, String> {
    [
        (
            "hero",
            "Create a compelling headline that addresses your target audience's main need. Include a clear call-to-action button.",
        ),
        (
            "about",
            "Tell your unique story - what makes you different? Include your mission, values, and what drives you.",
        ),
        (
            "services",
            "Highlight your key offerings with clear benefits for customers. Use specific examples and results.",
        ),
        (
            "contact",
            "Make it easy for customers to reach you. Include multiple contact methods and response time expectations.",
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

pub fn design(request: &DesignRequest) -> WebsiteDesign {
    let kind = classify_website(&request.description);
    let (primary, secondary, background) = palette(kind);

    WebsiteDesign {
        website_type: kind,
        site_name: extract_site_name(&request.description)
            .unwrap_or_else(|| "Your Business".to_string()),
        tagline: tagline(kind).to_string(),
        sections: design_sections(kind),
        color_scheme: ColorScheme {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            accent: secondary.to_string(),
            background: background.to_string(),
            text: primary.to_string(),
        },
        features: strings(design_features(kind)),
        pages: strings(design_pages(kind)),
        technical_requirements: strings(technical_requirements(kind)),
        content_suggestions: content_suggestions(),
    }
}

//=========================================================================================
// Blog
//=========================================================================================

pub fn blog(request: &BlogRequest) -> BlogContent {
    let topic = request.topic.trim();
    let audience = request.audience.as_deref().filter(|a| !a.trim().is_empty());

    let title = match request.article_type.as_deref().unwrap_or("how-to") {
        "listicle" => format!(
            "10 Essential Tips for {} That Every {} Should Know",
            topic,
            audience.unwrap_or("Professional")
        ),
        "review" => format!("{} Review: Is It Worth Your Investment?", topic),
        "news" => format!("Latest Developments in {}: What You Need to Know", topic),
        "opinion" => format!("Why {} is More Important Than Ever", topic),
        "case-study" => format!("Case Study: How {} Transformed Our Business", topic),
        _ => format!(
            "How to {}: A Complete Guide for {}",
            topic,
            audience.unwrap_or("Beginners")
        ),
    };

    let introduction = match request.tone.as_deref().unwrap_or("professional") {
        "casual" => format!(
            "Hey there! Ready to dive into the world of {}? Let's explore this together and make it super easy to understand.",
            topic
        ),
        "expert" => format!(
            "Advanced practitioners in {} require sophisticated strategies. This analysis presents cutting-edge methodologies and technical insights.",
            topic
        ),
        "conversational" => format!(
            "Let's have a chat about {}. You've probably been wondering about this, and I'm here to share what I've learned.",
            topic
        ),
        "formal" => format!(
            "This document provides a systematic examination of {}, presenting evidence-based recommendations and best practices.",
            topic
        ),
        _ => format!(
            "In today's competitive landscape, understanding {} is crucial for success. This comprehensive guide will walk you through everything you need to know.",
            topic
        ),
    };

    let sections = vec![
        BlogSection {
            heading: "Understanding the Basics".to_string(),
            content: format!(
                "Before diving deep into {}, it's important to establish a solid foundation. {} often overlook the fundamentals, but these basics are what separate successful implementations from failed attempts.",
                topic,
                audience.unwrap_or("Readers")
            ),
        },
        BlogSection {
            heading: "Key Strategies and Best Practices".to_string(),
            content: format!(
                "Implementing {} effectively requires a strategic approach. Here are the proven methods that industry leaders use to achieve outstanding results.",
                topic
            ),
        },
        BlogSection {
            heading: "Common Mistakes to Avoid".to_string(),
            content: format!(
                "Even experienced professionals can fall into these traps when working with {}. By being aware of these pitfalls, you can save time, money, and frustration.",
                topic
            ),
        },
        BlogSection {
            heading: "Getting Started: Your Action Plan".to_string(),
            content: format!(
                "Now that you understand the theory, let's put it into practice. This step-by-step action plan will help you implement {} in your own situation.",
                topic
            ),
        },
    ];

    let word_count = match request.length.as_deref() {
        Some("short") => "450",
        Some("medium") | None => "750",
        Some(_) => "1200",
    };

    BlogContent {
        title,
        introduction,
        sections,
        conclusion: format!(
            "{} doesn't have to be overwhelming. By following these guidelines and staying consistent with your efforts, you'll see significant improvements. Remember, success in {} comes from understanding your {} and adapting these strategies to your unique situation.",
            topic,
            topic,
            audience.unwrap_or("audience")
        ),
        word_count: word_count.to_string(),
    }
}

//=========================================================================================
// Social Captions
//=========================================================================================

const HASHTAG_STOP_WORDS: [&str; 14] = [
    "this", "that", "with", "from", "they", "them", "were", "been", "have", "your", "will", "what",
    "when", "where",
];

/// Up to five hashtags from the content words, followed by the platform's tags.
pub fn hashtags(content: &str, platform: &str) -> String {
    let lowered = content.to_lowercase();
    let mut tags: Vec<String> = lowered
        .split(' ')
        .filter(|word| word.chars().count() > 3 && !HASHTAG_STOP_WORDS.contains(word))
        .map(|word| word.chars().filter(|c| c.is_ascii_alphanumeric()).collect::<String>())
        .filter(|word| !word.is_empty())
        .take(5)
        .map(|word| format!("#{}", word))
        .collect();

    let platform_tags: &[&str] = match platform {
        "instagram" => &["#instagood", "#photooftheday", "#follow"],
        "linkedin" => &["#professional", "#business", "#career"],
        "facebook" => &["#community", "#share", "#connect"],
        "twitter" => &["#trending", "#news", "#update"],
        "tiktok" => &["#fyp", "#viral", "#trending"],
        _ => &[],
    };
    tags.extend(platform_tags.iter().map(|t| t.to_string()));
    tags.join(" ")
}

fn mood_emojis(mood: &str) -> &'static str {
    match mood {
        "professional" => "💼✨📈",
        "funny" => "😂🤣😄",
        "inspiring" => "✨💪🌟",
        "casual" => "😊👋💫",
        "promotional" => "🔥💯🎉",
        "educational" => "📚💡🎓",
        "storytelling" => "📖✨🌈",
        _ => "✨",
    }
}

fn cta_text(cta: &str) -> &'static str {
    match cta {
        "like" => "Double tap if you agree! ❤️",
        "comment" => "What do you think? Drop a comment below! 👇",
        "share" => "Share this with someone who needs to see it! 🔄",
        "follow" => "Follow for more content like this! 🔔",
        "visit" => "Link in bio for more details! 🔗",
        "buy" => "Get yours today! Limited time offer! 🛒",
        _ => "",
    }
}

/// Joins the non-empty words of a line with single spaces.
fn line(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Joins the non-empty paragraphs of a caption with blank lines.
fn paragraphs(parts: &[String]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn caption(request: &CaptionRequest) -> CaptionSet {
    let content = request.content.trim();
    let lowered = content.to_lowercase();
    let platform = request.platform.as_deref().unwrap_or("instagram");
    let emojis = if request.include_emojis {
        mood_emojis(request.mood.as_deref().unwrap_or("casual"))
    } else {
        ""
    };
    let cta = request.cta.as_deref().map(cta_text).unwrap_or_default();
    let tags = if request.include_hashtags {
        hashtags(content, platform)
    } else {
        String::new()
    };

    let captions = vec![
        Caption {
            version: "Version 1 - Engaging".to_string(),
            text: paragraphs(&[line(&[emojis, content, cta]), tags.clone()]),
        },
        Caption {
            version: "Version 2 - Story-focused".to_string(),
            text: paragraphs(&[
                line(&[format!("Here's the thing about {}...", lowered).as_str(), emojis]),
                line(&["It's not just about the moment, it's about the story behind it.", cta]),
                tags.clone(),
            ]),
        },
        Caption {
            version: "Version 3 - Question starter".to_string(),
            text: paragraphs(&[
                line(&[format!("Ever wondered about {}?", lowered).as_str(), emojis]),
                line(&["Here's my take on it...", cta]),
                tags,
            ]),
        },
    ];

    CaptionSet {
        captions,
        platform: platform.to_string(),
        character_counts: Vec::new(),
    }
    .with_counts()
}

//=========================================================================================
// Email
//=========================================================================================

pub fn email(request: &EmailRequest) -> EmailContent {
    let subject = request.subject.trim();
    let audience = request.audience.as_deref().filter(|a| !a.trim().is_empty());

    let (subject_line, opening) = match request.email_type.as_deref().unwrap_or("newsletter") {
        "promotional" => (
            format!("🔥 Special Offer: {}", subject),
            format!(
                "Hey {}!\n\nWe've got something special for you regarding {}:",
                audience.unwrap_or("there"),
                subject
            ),
        ),
        "welcome" => (
            format!("Welcome! Here's everything about {}", subject),
            format!(
                "Welcome to our community!\n\nWe're thrilled you're interested in {}. Here's what you need to know:",
                subject
            ),
        ),
        "follow-up" => (
            format!("Following up on {}", subject),
            format!(
                "Hi again!\n\nI wanted to follow up on our previous conversation about {}:",
                subject
            ),
        ),
        "announcement" => (
            format!("Big News: {}", subject),
            format!("Exciting news!\n\nWe're thrilled to share this update about {}:", subject),
        ),
        "reminder" => (
            format!("Reminder: Don't miss out on {}", subject),
            format!("Quick reminder!\n\nDon't forget about {}:", subject),
        ),
        _ => (
            format!("Your Weekly Update: {}", subject),
            format!(
                "Hi there!\n\nHope you're having a great week! Here's what's new with {}:",
                subject
            ),
        ),
    };

    EmailContent {
        subject: subject_line,
        opening,
        body: format!(
            "{}\n\nThis is exactly what you've been looking for to take your {} to the next level. Our {} have seen incredible results, and we know you will too.",
            request.goal.trim(),
            subject,
            audience.unwrap_or("customers")
        ),
        cta: format!("Ready to get started? Click here to learn more about {}!", subject),
        closing: "Best regards,\nThe Team\n\nP.S. Have questions? Just reply to this email - we'd love to help!"
            .to_string(),
    }
}

//=========================================================================================
// Product Descriptions
//=========================================================================================

pub fn product(request: &ProductRequest) -> ProductContent {
    let name = request.name.trim();
    let features = request.features.trim();
    let category = request.category.as_deref().unwrap_or("general");
    let price = request.price.as_deref().unwrap_or("competitive");
    let audience = request.audience.as_deref().filter(|a| !a.trim().is_empty());
    let first_sentence = features.split('.').next().unwrap_or_default().trim();

    let bullets = features
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join("\n• ");

    ProductContent {
        short_description: format!(
            "Discover the {} - perfect for {}. {}.",
            name,
            audience.unwrap_or("anyone looking for quality"),
            first_sentence
        ),
        detailed_description: format!(
            "Introducing the {}, a premium {} product designed specifically for {}.\n\n{}\n\nCrafted with attention to detail and built to last, this {} option delivers exceptional value.",
            name,
            category,
            audience.unwrap_or("discerning customers"),
            features,
            price
        ),
        bullet_points: format!(
            "• Premium quality {} product\n• {}\n• Perfect for {}\n• {} pricing for excellent value",
            category,
            bullets,
            audience.unwrap_or("everyday use"),
            price
        ),
        benefits: vec![
            format!("Save time and effort with the {}", name),
            "Enjoy peace of mind with our quality guarantee".to_string(),
            format!("Perfect for {}", audience.unwrap_or("busy professionals")),
            format!("Get {} quality without the premium price tag", price),
        ],
        call_to_action: format!(
            "Order your {} today and experience the difference quality makes!",
            name
        ),
    }
}

//=========================================================================================
// Project Updates
//=========================================================================================

const PROJECT_UPDATES: [&str; 5] = [
    "Excellent progress on your website! The responsive design implementation is now 90% complete. Our team has successfully optimized the mobile experience and implemented the new navigation system.",
    "Great news! The database migration has been completed successfully. All your product data has been transferred to the new system with zero data loss.",
    "Security implementation is ahead of schedule! We've integrated SSL certificates, implemented two-factor authentication, and added GDPR compliance features.",
    "Performance optimization complete! Your website now loads 60% faster than before. We've implemented image compression, code minification, and CDN integration.",
    "Content management system setup is finalized! You can now easily update products, blog posts, and pages through the intuitive admin panel.",
];

/// One of the canned status messages, chosen by how far along the project is.
pub fn project_update(project: &Project) -> String {
    let index = (usize::from(project.progress) / 20).min(PROJECT_UPDATES.len() - 1);
    PROJECT_UPDATES[index].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProjectType;

    #[test]
    fn classifies_descriptions_by_keyword() {
        assert_eq!(classify_website("An online store for candles"), WebsiteType::Ecommerce);
        assert_eq!(classify_website("Photography portfolio"), WebsiteType::Portfolio);
        assert_eq!(classify_website("Our family BAKERY"), WebsiteType::Restaurant);
        assert_eq!(classify_website("A charity for dogs"), WebsiteType::Nonprofit);
        assert_eq!(classify_website("Weekly news roundup"), WebsiteType::Blog);
        assert_eq!(classify_website("Accounting firm"), WebsiteType::Business);
    }

    #[test]
    fn extracts_site_names() {
        assert_eq!(
            extract_site_name("I need a site for my Sunrise Yoga with booking").as_deref(),
            Some("Sunrise Yoga")
        );
        assert_eq!(
            extract_site_name("Acme Plumbing website with quotes").as_deref(),
            Some("Acme Plumbing")
        );
        assert_eq!(extract_site_name("just something nice"), None);
    }

    #[test]
    fn design_fallback_uses_template_tables() {
        let design = design(&DesignRequest {
            description: "Bella's Bakery website with online orders".to_string(),
        });

        assert_eq!(design.website_type, WebsiteType::Restaurant);
        assert_eq!(design.site_name, "Bella's Bakery");
        assert_eq!(design.tagline, "Taste the Difference");
        assert_eq!(design.color_scheme.primary, "#dc2626");
        assert_eq!(design.color_scheme.text, design.color_scheme.primary);
        assert!(!design.sections.is_empty());
        assert_eq!(design.pages[1], "Menu");
    }

    #[test]
    fn caption_fallback_counts_match_texts() {
        let set = caption(&CaptionRequest {
            content: "Launching our autumn coffee menu today".to_string(),
            mood: Some("promotional".to_string()),
            cta: Some("visit".to_string()),
            include_hashtags: true,
            include_emojis: true,
            platform: Some("instagram".to_string()),
        });

        assert_eq!(set.captions.len(), 3);
        assert_eq!(set.platform, "instagram");
        for (caption, count) in set.captions.iter().zip(&set.character_counts) {
            assert_eq!(caption.text.chars().count(), *count);
        }
        assert!(set.captions[0].text.starts_with("🔥💯🎉 Launching"));
        assert!(set.captions[0]
            .text
            .contains("#launching #autumn #coffee #menu #today #instagood"));
    }

    #[test]
    fn caption_without_extras_has_no_stray_whitespace() {
        let set = caption(&CaptionRequest {
            content: "New studio photos".to_string(),
            ..Default::default()
        });
        assert_eq!(set.captions[0].text, "New studio photos");
        assert_eq!(
            set.captions[2].text,
            "Ever wondered about new studio photos?\n\nHere's my take on it..."
        );
    }

    #[test]
    fn hashtags_skip_short_and_stop_words() {
        assert_eq!(hashtags("This is what growth looks like!", "unknown"), "#growth #looks #like");
    }

    #[test]
    fn email_fallback_defaults_to_newsletter() {
        let content = email(&EmailRequest {
            email_type: Some("carrier-pigeon".to_string()),
            subject: "Spring Sale".to_string(),
            audience: None,
            goal: "Drive visits to the shop".to_string(),
        });

        assert_eq!(content.subject, "Your Weekly Update: Spring Sale");
        assert!(content.body.starts_with("Drive visits to the shop\n\n"));
    }

    #[test]
    fn product_fallback_builds_bullets_from_features() {
        let content = product(&ProductRequest {
            name: "Trail Bottle".to_string(),
            category: Some("outdoor".to_string()),
            features: "Insulated steel, leak proof lid, 750ml".to_string(),
            audience: Some("hikers".to_string()),
            price: Some("mid-range".to_string()),
        });

        assert!(content
            .bullet_points
            .contains("• Insulated steel\n• leak proof lid\n• 750ml"));
        assert_eq!(content.benefits.len(), 4);
        assert_eq!(
            content.call_to_action,
            "Order your Trail Bottle today and experience the difference quality makes!"
        );
    }

    #[test]
    fn quote_narrative_comes_from_rule_tables() {
        let request = QuoteRequest {
            project_type: ProjectType::Blog,
            ..Default::default()
        };
        assert_eq!(quote(&request).suggestions, pricing::suggestions(&ProjectType::Blog));
    }

    #[test]
    fn fallback_is_pure() {
        let request = BlogRequest {
            topic: "Composting".to_string(),
            article_type: Some("listicle".to_string()),
            ..Default::default()
        };
        assert_eq!(
            generate_fallback(ContentRequest::Blog(&request)),
            generate_fallback(ContentRequest::Blog(&request))
        );
    }
}
