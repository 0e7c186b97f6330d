//! Shared fixtures for integration tests.

#![allow(dead_code)]

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Homepage linking to one page per subpage category plus an external site.
pub const HOMEPAGE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Acme Widgets</title>
  <meta name="description" content="Precision widgets for industry">
</head>
<body>
  <header><a href="/">Home</a></header>
  <nav>
    <a href="/about">About</a>
    <a href="/services">Services</a>
    <a href="/contact">Contact</a>
    <a href="/careers">Careers</a>
  </nav>
  <main><h1>Acme builds precision widgets</h1><p>Family owned since 1998.</p></main>
  <a href="https://linkedin.example/company/acme">Our company on LinkedIn</a>
  <footer>Copyright Acme</footer>
</body>
</html>"#;

/// Valid extraction reply with every weighted confidence at 0.8.
pub const PROFILE_REPLY: &str = r#"```json
{
  "company_name": "Acme Widgets",
  "industry": "Industrial Manufacturing - Precision Components",
  "industry_confidence": 0.8,
  "location": {"city": "Duluth", "state": "MN", "country": "USA"},
  "location_confidence": 0.8,
  "products_services": ["Precision widgets", "Custom machining"],
  "products_confidence": 0.8,
  "company_size": {"estimate": "50-100 employees", "signals": ["team page lists 60 people"]},
  "size_confidence": 0.8,
  "founded_year": 1998,
  "founded_confidence": 0.9,
  "leadership": [{"name": "Jane Doe", "title": "CEO"}],
  "leadership_confidence": 0.7,
  "customer_segments": ["Aerospace OEMs"],
  "customers_confidence": 0.8,
  "tech_signals": [],
  "business_model": "Contract manufacturing",
  "business_model_confidence": 0.8,
  "growth_signals": ["hiring machinists"],
  "summary": "Acme builds precision widgets for aerospace customers."
}
```"#;

/// Valid matching reply with two ranked funds.
pub const MATCH_REPLY: &str = r#"{
  "analysis": {
    "company_summary": "Founder-owned precision manufacturer.",
    "estimated_enterprise_value": "$25-50M",
    "pe_readiness": "High",
    "pe_readiness_rationale": "Stable customers and succession need."
  },
  "matches": [
    {"rank": 1, "fund_name": "Northwind Industrial Holdings", "fit_score": 88,
     "rationale": "Engineered products focus.", "key_alignment": ["succession planning"],
     "potential_concerns": ["customer concentration"], "deal_type_fit": "buyout"},
    {"rank": 2, "fund_name": "Lakeshore Capital Partners", "fit_score": 81,
     "rationale": "Founder-owned industrial thesis.", "key_alignment": ["founder-owned"],
     "potential_concerns": [], "deal_type_fit": "buyout"}
  ],
  "additional_notes": "Confirm owner timeline."
}"#;

pub fn page_html(text: &str) -> String {
    format!("<html><body><p>{}</p></body></html>", text)
}

/// Serve `html` at `url_path` with a 200.
pub async fn mount_page(server: &MockServer, url_path: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Answer `url_path` with `status`.
pub async fn mount_status(server: &MockServer, url_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
