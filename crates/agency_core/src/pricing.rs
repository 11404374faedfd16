//! crates/agency_core/src/pricing.rs
//!
//! The rule-based pricing engine. It turns a `QuoteRequest` into a complete
//! `GeneratedQuote` and never fails: unknown project types, features and
//! timeline preferences fall back to defaults instead of being rejected.
//!
//! Prices are USD. All arithmetic is done on integers scaled by 10 000 so that
//! percentage multipliers never introduce floating-point drift.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{
    BudgetBand, Confidence, CostLineItem, Feature, GeneratedQuote, ProjectType, QuoteRequest,
    TimelinePhase, TimelinePreference,
};

/// Fixed-point scale: currency units × 100 (timeline %) × 100 (band %).
const SCALE: u64 = 10_000;

//=========================================================================================
// Policy
//=========================================================================================

/// How the final total is rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Nearest whole currency unit.
    #[default]
    Unit,
    /// Nearest multiple of 50.
    Fifty,
}

impl std::str::FromStr for Rounding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unit" | "1" => Ok(Self::Unit),
            "fifty" | "50" => Ok(Self::Fifty),
            other => Err(format!("'{}' is not a rounding policy (expected unit or fifty)", other)),
        }
    }
}

/// Deployment-level settings for quote generation.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingPolicy {
    pub rounding: Rounding,
    pub currency: String,
    pub validity_days: u32,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            rounding: Rounding::Unit,
            currency: "USD".to_string(),
            validity_days: 30,
        }
    }
}

//=========================================================================================
// Rate Tables
//=========================================================================================

fn base_cost(project_type: &ProjectType) -> u64 {
    match project_type {
        ProjectType::Business => 1500,
        ProjectType::Ecommerce => 4000,
        ProjectType::Portfolio => 1200,
        ProjectType::Blog => 1000,
        ProjectType::Restaurant => 2200,
        ProjectType::Custom | ProjectType::Other(_) => 3000,
    }
}

fn feature_cost(feature: &Feature) -> u64 {
    match feature {
        Feature::Responsive => 0,
        Feature::Cms => 600,
        Feature::Seo => 400,
        Feature::Analytics => 250,
        Feature::Contact => 200,
        Feature::Social => 300,
        Feature::Ecommerce => 2500,
        Feature::Booking => 1000,
        Feature::Membership => 1500,
        Feature::Other(_) => 0,
    }
}

/// Timeline multiplier in percent.
fn timeline_multiplier(timeline: &TimelinePreference) -> u64 {
    match timeline {
        TimelinePreference::Rush => 160,
        TimelinePreference::Standard => 100,
        TimelinePreference::Relaxed => 90,
        TimelinePreference::Flexible => 85,
        TimelinePreference::Other(_) => 100,
    }
}

/// The clamp range and multiplier (in percent) of a budget band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandLimits {
    pub min: u64,
    pub max: u64,
    pub multiplier: u64,
}

pub fn band_limits(band: BudgetBand) -> BandLimits {
    match band {
        BudgetBand::Small => BandLimits { min: 500, max: 1500, multiplier: 80 },
        BudgetBand::Medium => BandLimits { min: 1500, max: 5000, multiplier: 100 },
        BudgetBand::Large => BandLimits { min: 5000, max: 15000, multiplier: 120 },
        BudgetBand::Enterprise => BandLimits { min: 15000, max: 50000, multiplier: 150 },
    }
}

fn base_days(project_type: &ProjectType) -> u32 {
    match project_type {
        ProjectType::Business => 14,
        ProjectType::Ecommerce => 28,
        ProjectType::Portfolio => 10,
        ProjectType::Blog => 12,
        ProjectType::Restaurant => 18,
        ProjectType::Custom | ProjectType::Other(_) => 21,
    }
}

fn feature_days(feature: &Feature) -> u32 {
    match feature {
        Feature::Cms => 3,
        Feature::Seo => 2,
        Feature::Analytics => 1,
        Feature::Contact => 1,
        Feature::Social => 2,
        Feature::Ecommerce => 12,
        Feature::Booking => 6,
        Feature::Membership => 8,
        Feature::Responsive | Feature::Other(_) => 0,
    }
}

/// Cost buckets as (line item, percent of total). The last bucket absorbs rounding.
const BREAKDOWN_BUCKETS: [(&str, u64); 5] = [
    ("Design & Planning", 25),
    ("Development & Coding", 45),
    ("Content Integration", 15),
    ("Testing & Quality Assurance", 10),
    ("Project Management", 5),
];

/// Schedule phases as (name, percent of total days, description).
const TIMELINE_PHASES: [(&str, u32, &str); 3] = [
    ("Planning & Design", 30, "Wireframes, mockups, and project planning"),
    ("Development", 50, "Coding, feature implementation, and content integration"),
    ("Testing & Launch", 20, "Quality assurance, final testing, and deployment"),
];

fn suggestions_for(project_type: &ProjectType) -> &'static [&'static str] {
    match project_type {
        ProjectType::Business => &[
            "Professional photography package",
            "Blog section for SEO and thought leadership",
            "Client testimonials and case studies page",
            "Live chat integration for customer support",
            "Google My Business optimization",
        ],
        ProjectType::Ecommerce => &[
            "Product review and rating system",
            "Abandoned cart email automation",
            "Advanced inventory management",
            "Multiple payment gateway options",
            "Wishlist and comparison features",
        ],
        ProjectType::Portfolio => &[
            "Before/after project showcase galleries",
            "Client testimonial video integration",
            "Downloadable portfolio PDF",
            "Detailed project case study pages",
            "Skills and expertise timeline",
        ],
        ProjectType::Blog => &[
            "Email newsletter subscription system",
            "Comment system and community features",
            "Social sharing optimization",
            "Related posts recommendation engine",
            "Advanced search and filtering",
        ],
        ProjectType::Restaurant => &[
            "Online ordering and delivery system",
            "Table reservation management",
            "Digital menu with dietary filters",
            "Customer loyalty program",
            "Event booking and catering requests",
        ],
        ProjectType::Custom => &[
            "Advanced security features",
            "API integrations with third-party services",
            "Custom reporting dashboard",
            "Automated workflow systems",
            "Multi-language support",
        ],
        ProjectType::Other(_) => &[
            "SSL certificate and security enhancements",
            "Regular maintenance and backup service",
            "Performance optimization package",
            "Advanced analytics and reporting",
            "Social media marketing integration",
        ],
    }
}

//=========================================================================================
// Engine
//=========================================================================================

/// Requested features in submission order with duplicates removed.
fn unique_features(features: &[Feature]) -> Vec<&Feature> {
    let mut unique: Vec<&Feature> = Vec::with_capacity(features.len());
    for feature in features {
        if !unique.contains(&feature) {
            unique.push(feature);
        }
    }
    unique
}

/// Computes the rounded total cost.
///
/// Order: base + features, then the timeline multiplier, then (only when a band
/// is given) the band multiplier followed by a clamp into the band's range, and
/// finally rounding.
pub fn total_cost(request: &QuoteRequest, rounding: Rounding) -> u64 {
    let subtotal = base_cost(&request.project_type)
        + unique_features(&request.features)
            .into_iter()
            .map(feature_cost)
            .sum::<u64>();

    let mut scaled = subtotal * timeline_multiplier(&request.timeline) * 100;

    if let Some(band) = request.budget_band {
        let limits = band_limits(band);
        scaled = (scaled / 100 * limits.multiplier).clamp(limits.min * SCALE, limits.max * SCALE);
    }

    match rounding {
        Rounding::Unit => (scaled + SCALE / 2) / SCALE,
        Rounding::Fifty => (scaled + 25 * SCALE) / (50 * SCALE) * 50,
    }
}

/// Splits `total` into the fixed percentage buckets. The amounts always sum to `total`.
pub fn cost_breakdown(total: u64) -> Vec<CostLineItem> {
    let mut remaining = total;
    let last = BREAKDOWN_BUCKETS.len() - 1;

    BREAKDOWN_BUCKETS
        .iter()
        .enumerate()
        .map(|(i, (line_item, percent))| {
            let amount = if i == last {
                remaining
            } else {
                ((total * percent + 50) / 100).min(remaining)
            };
            remaining -= amount;
            CostLineItem {
                line_item: line_item.to_string(),
                amount,
            }
        })
        .collect()
}

/// Total project duration in days after the timeline preference is applied.
pub fn total_days(request: &QuoteRequest) -> u32 {
    let days = base_days(&request.project_type)
        + unique_features(&request.features)
            .into_iter()
            .map(feature_days)
            .sum::<u32>();

    match request.timeline {
        TimelinePreference::Rush => (days * 7).div_ceil(10),
        TimelinePreference::Relaxed => (days * 14).div_ceil(10),
        _ => days,
    }
}

/// Partitions `[1, total]` into the schedule phases.
///
/// Leading phases take the ceiling of their share and the last phase takes what
/// is left, so durations always sum to `total`.
pub fn timeline_phases(total: u32) -> Vec<TimelinePhase> {
    let last = TIMELINE_PHASES.len() - 1;
    let mut remaining = total;
    let mut durations: Vec<u32> = TIMELINE_PHASES
        .iter()
        .enumerate()
        .map(|(i, (_, percent, _))| {
            let share = if i == last {
                remaining
            } else {
                (total * percent).div_ceil(100).min(remaining)
            };
            remaining -= share;
            share
        })
        .collect();

    // Give an emptied phase a day from the longest one.
    while let Some(empty) = durations.iter().position(|d| *d == 0) {
        let Some((longest, max)) = durations
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|&(_, d)| d)
        else {
            break;
        };
        if max <= 1 {
            break;
        }
        durations[longest] -= 1;
        durations[empty] += 1;
    }

    let mut next_day = 1;
    TIMELINE_PHASES
        .iter()
        .zip(durations)
        .filter(|(_, days)| *days > 0)
        .map(|((name, _, description), days)| {
            let phase = TimelinePhase {
                name: name.to_string(),
                start_day: next_day,
                end_day: next_day + days - 1,
                duration_days: days,
                description: description.to_string(),
            };
            next_day += days;
            phase
        })
        .collect()
}

/// "Mobile-responsive design" followed by the requested features, de-duplicated.
pub fn included_features(request: &QuoteRequest) -> Vec<String> {
    let mut labels = vec![Feature::Responsive.label().to_string()];
    for feature in unique_features(&request.features) {
        let label = feature.label().to_string();
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    labels
}

pub fn suggestions(project_type: &ProjectType) -> Vec<String> {
    suggestions_for(project_type)
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Builds a full quote from the rate tables alone.
///
/// The result is a pure function of its arguments; `issued_at` only determines
/// `valid_until`.
pub fn compute_quote(
    request: &QuoteRequest,
    policy: &PricingPolicy,
    issued_at: DateTime<Utc>,
) -> GeneratedQuote {
    let total = total_cost(request, policy.rounding);
    let days = total_days(request);

    GeneratedQuote {
        total_cost: total,
        currency: policy.currency.clone(),
        breakdown: cost_breakdown(total),
        timeline: timeline_phases(days),
        total_days: days,
        included_features: included_features(request),
        suggestions: suggestions(&request.project_type),
        project_type: request.project_type.clone(),
        confidence: Confidence::Medium,
        valid_until: issued_at
            .checked_add_signed(Duration::days(i64::from(policy.validity_days)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC),
    }
}
