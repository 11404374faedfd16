//! crates/agency_core/src/mockup.rs
//!
//! Renders a `WebsiteDesign` into a single self-contained HTML preview page.

use crate::domain::WebsiteDesign;
use crate::prompts::fill_template;

/// Maximum number of pages shown in the navigation bar.
const MAX_NAV_LINKS: usize = 5;

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{site_name} - Mockup Preview</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: 'Times New Roman', serif; line-height: 1.6; color: {text}; background: {background}; }
        .container { max-width: 1200px; margin: 0 auto; padding: 0 20px; }
        .header { background: {primary}; color: white; padding: 1rem 0; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .nav { display: flex; justify-content: space-between; align-items: center; }
        .logo { font-size: 1.5rem; font-weight: bold; }
        .nav-links { display: flex; list-style: none; gap: 2rem; }
        .nav-links a { color: white; text-decoration: none; }
        .hero { background: linear-gradient(135deg, {primary}, {secondary}); color: white; text-align: center; padding: 4rem 0; }
        .hero h1 { font-size: 3rem; margin-bottom: 1rem; }
        .hero p { font-size: 1.2rem; margin-bottom: 2rem; }
        .cta-button { background: {accent}; color: white; padding: 12px 30px; border-radius: 5px; font-size: 1.1rem; text-decoration: none; display: inline-block; }
        .section { padding: 3rem 0; border-bottom: 1px solid #eee; }
        .section h2 { text-align: center; margin-bottom: 2rem; color: {primary}; font-size: 2.5rem; }
        .section p.lead { text-align: center; max-width: 600px; margin: 0 auto; }
        .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 2rem; margin-top: 2rem; }
        .card { background: white; padding: 2rem; border-radius: 10px; box-shadow: 0 4px 15px rgba(0,0,0,0.1); text-align: center; }
        .card h3 { color: {primary}; margin-bottom: 1rem; font-size: 1.5rem; }
        .footer { background: {primary}; color: white; text-align: center; padding: 2rem 0; }
        @media (max-width: 768px) {
            .hero h1 { font-size: 2rem; }
            .nav { flex-direction: column; gap: 1rem; }
            .nav-links { flex-direction: column; gap: 1rem; }
        }
    </style>
</head>
<body>
    <header class="header">
        <div class="container">
            <nav class="nav">
                <div class="logo">{site_name}</div>
                <ul class="nav-links">{nav_links}</ul>
            </nav>
        </div>
    </header>
    <section class="hero">
        <div class="container">
            <h1>{site_name}</h1>
            <p>{tagline}</p>
            <a href="#contact" class="cta-button">Get Started</a>
        </div>
    </section>
{sections}
    <footer class="footer">
        <div class="container">
            <p>&copy; {site_name}. All rights reserved. | Design preview</p>
        </div>
    </footer>
</body>
</html>"##;

/// Escapes text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Colors go inside a `<style>` block, so anything but a plain CSS color token is dropped.
fn css_color(value: &str) -> &str {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | ' ' | '%'));
    if valid {
        value
    } else {
        "inherit"
    }
}

fn slug(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

pub fn render_mockup(design: &WebsiteDesign) -> String {
    let nav_links: String = design
        .pages
        .iter()
        .take(MAX_NAV_LINKS)
        .map(|page| {
            format!(
                r##"<li><a href="#{}">{}</a></li>"##,
                slug(page),
                escape_html(page)
            )
        })
        .collect();

    let sections: String = design
        .sections
        .iter()
        .map(|section| {
            let cards = if section.name == "services" {
                let cards: String = section
                    .features
                    .iter()
                    .map(|feature| {
                        format!(
                            r#"
                <div class="card">
                    <h3>{}</h3>
                    <p>Professional {} solution tailored to your needs.</p>
                </div>"#,
                            escape_html(feature),
                            escape_html(&feature.to_lowercase())
                        )
                    })
                    .collect();
                format!("\n            <div class=\"grid\">{}\n            </div>", cards)
            } else {
                String::new()
            };

            format!(
                r#"    <section class="section" id="{}">
        <div class="container">
            <h2>{}</h2>
            <p class="lead">{}</p>{}
        </div>
    </section>
"#,
                slug(&section.name),
                escape_html(&section.title),
                escape_html(&section.content),
                cards
            )
        })
        .collect();

    let colors = &design.color_scheme;
    let tagline = escape_html(&design.tagline);
    let site_name = escape_html(&design.site_name);
    fill_template(
        PAGE_TEMPLATE,
        &[
            ("primary", css_color(&colors.primary)),
            ("secondary", css_color(&colors.secondary)),
            ("accent", css_color(&colors.accent)),
            ("background", css_color(&colors.background)),
            ("text", css_color(&colors.text)),
            ("nav_links", nav_links.as_str()),
            ("tagline", tagline.as_str()),
            ("sections", sections.as_str()),
            ("site_name", site_name.as_str()),
        ],
    )
}
