//! Text rendering of the dashboard for a terminal.

use std::fmt::Write as _;

use client_core::ViewState;
use shared::{domain::ActiveTab, error::FailureContext};

const PRODUCT_NAME: &str = "PostVelocity";
const QUICK_ACTIONS: [&str; 4] = ["Smart Generate", "Weekly Batch", "Emergency Post", "Voice Input"];
const TRENDING_TOPICS: [&str; 4] = [
    "Safety Innovation",
    "Equipment Training",
    "Team Recognition",
    "OSHA Updates",
];
const SOCIAL_PLATFORMS: [&str; 6] = [
    "Instagram",
    "Facebook",
    "LinkedIn",
    "TikTok",
    "YouTube",
    "Twitter",
];
const ANALYTICS_CARDS: [(&str, &str); 4] = [
    ("Engagement Rate", "4.2%"),
    ("Total Reach", "12,500"),
    ("Conversions", "23"),
    ("ROI", "1,400%"),
];

pub fn render(state: &ViewState) -> String {
    let mut out = String::new();
    render_header(&mut out, state);
    render_tab_bar(&mut out, state);
    out.push('\n');
    match state.active_tab() {
        ActiveTab::Content => render_content_hub(&mut out, state),
        ActiveTab::Analytics => render_analytics(&mut out),
        other => render_coming_soon(&mut out, other),
    }
    out
}

fn render_header(out: &mut String, state: &ViewState) {
    let status = state.user_status();
    let _ = writeln!(
        out,
        "{PRODUCT_NAME} | {} | usage {} | [Upgrade]",
        status.tier.badge(),
        status.usage
    );

    let company = match state.selected_company() {
        Some(company) => format!("{} ({})", company.name, company.id),
        None => state.selected_company_id().to_string(),
    };
    let _ = writeln!(
        out,
        "Company: {company} ({} available)",
        state.companies().len()
    );
}

fn render_tab_bar(out: &mut String, state: &ViewState) {
    let tabs: Vec<String> = ActiveTab::ALL
        .into_iter()
        .map(|tab| {
            if state.is_tab_active(tab) {
                format!("[{}]", tab.label())
            } else {
                format!(" {} ", tab.label())
            }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join(" "));
}

fn render_content_hub(out: &mut String, state: &ViewState) {
    let _ = writeln!(out, "Content Hub");
    let _ = writeln!(out, "  Smart Quick Actions: {}", QUICK_ACTIONS.join(" | "));

    let _ = writeln!(out, "  Trending Topics:");
    for topic in TRENDING_TOPICS {
        let _ = writeln!(out, "    - {topic} (Rising, engagement 85%)");
    }

    let _ = writeln!(out, "  Social Media Connections:");
    for platform in SOCIAL_PLATFORMS {
        let _ = writeln!(out, "    - {platform}: Not connected");
    }

    if let Some(notice) = state
        .last_failure()
        .filter(|notice| notice.context == FailureContext::GenerateContent)
    {
        let _ = writeln!(out, "  Notice: {}", notice.message);
    }

    let items = state.generated_content();
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "  Generated Content:");
    for item in items {
        let platform = item.platform().unwrap_or("unknown");
        match item.body() {
            Some(body) => {
                let _ = writeln!(out, "    [{platform}] {body}");
            }
            None => {
                let _ = writeln!(out, "    [{platform}] {}", item.0);
            }
        }
        let hashtags = item.hashtags();
        if !hashtags.is_empty() {
            let _ = writeln!(out, "      {}", hashtags.join(" "));
        }
        if let (Some(score), Some(time)) = (item.engagement_prediction(), item.optimal_time()) {
            let _ = writeln!(out, "      predicted engagement {score}%, post at {time}");
        }
    }
}

fn render_analytics(out: &mut String) {
    let _ = writeln!(out, "Analytics Dashboard");
    for (title, value) in ANALYTICS_CARDS {
        let _ = writeln!(out, "  {title}: {value}");
    }
}

fn render_coming_soon(out: &mut String, tab: ActiveTab) {
    let _ = writeln!(out, "{}", tab.label());
    let _ = writeln!(out, "  Feature coming soon!");
}
