//! Server-rendered HTML pages.
//!
//! Everything interpolated into markup goes through [`escape`].

use crate::profile::{HistoryEntry, UsageStats, UserProfile};
use axum::response::Html;
use ml_client::{AppDescriptor, PredictionResult};
use std::collections::BTreeMap;
use std::fmt::Write;

const STYLE: &str = "body{font-family:sans-serif;margin:0;color:#1f2937}\
nav{background:#f3f4f6;padding:1rem;display:flex;gap:1rem}\
nav a{color:inherit;text-decoration:none}nav a.active{font-weight:bold}\
main{max-width:56rem;margin:1.5rem auto;padding:0 1rem}\
.grid{display:grid;grid-template-columns:1fr 1fr;gap:1rem}\
.card{border:1px solid #e5e7eb;border-radius:.5rem;padding:1rem}\
.card button{all:unset;cursor:pointer;display:block;width:100%}\
.error{background:#fee2e2;border:1px solid #f87171;color:#b91c1c;padding:.75rem;border-radius:.25rem}\
.notice{background:#dcfce7;border:1px solid #4ade80;padding:.75rem;border-radius:.25rem}\
table{width:100%;border-collapse:collapse}td,th{text-align:left;padding:.4rem;border-top:1px solid #e5e7eb}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Home,
    Profile,
    Apps,
}

/// What to show under the upload form of the detail view.
#[derive(Debug)]
pub enum Outcome<'a> {
    Succeeded(&'a PredictionResult),
    Failed(&'a str),
}

pub fn escape(text: &str) -> String {
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

pub fn format_percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

pub fn format_seconds(seconds: f64) -> String {
    format!("{:.3}s", seconds)
}

/// Classes by descending probability, ties broken by name.
pub fn ranked_probabilities(probabilities: &BTreeMap<String, f64>) -> Vec<(&str, f64)> {
    let mut ranked: Vec<(&str, f64)> = probabilities
        .iter()
        .map(|(class, p)| (class.as_str(), *p))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
}

fn layout(title: &str, active: Option<Nav>, body: &str) -> Html<String> {
    let link = |nav: Nav, href: &str, label: &str| {
        let class = if active == Some(nav) { " class=\"active\"" } else { "" };
        format!("<a href=\"{}\"{}>{}</a>", href, class, label)
    };

    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\">\
<title>{title} | ML Apps</title><style>{STYLE}</style></head>\n<body>\n<nav>{home}{profile}{apps}</nav>\n\
<main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape(title),
        home = link(Nav::Home, "/", "Home"),
        profile = link(Nav::Profile, "/profile", "Profile"),
        apps = link(Nav::Apps, "/ml-select", "ML Apps"),
    ))
}

pub fn home_page() -> Html<String> {
    let body = "<h1>Welcome to ML Apps</h1>\n\
<p>Try several machine-learning models from one place: pick a model, upload an image \
and inspect the prediction.</p>\n\
<div class=\"grid\">\n\
<div class=\"card\"><h3>Get started</h3><p>Choose the model you want to use.</p>\
<a href=\"/ml-select\">Select an ML app</a></div>\n\
<div class=\"card\"><h3>Profile</h3><p>Review your settings and prediction history.</p>\
<a href=\"/profile\">Show profile</a></div>\n</div>";
    layout("Home", Some(Nav::Home), body)
}

pub fn selector_page(apps: &[AppDescriptor]) -> Html<String> {
    let mut body = String::from("<h1>ML Apps</h1>\n");
    if apps.is_empty() {
        body.push_str("<p>No apps are available right now.</p>");
        return layout("ML Apps", Some(Nav::Apps), &body);
    }

    body.push_str("<div class=\"grid\">\n");
    for app in apps {
        let _ = write!(
            body,
            "<form class=\"card\" method=\"post\" action=\"/ml-select\">\
<input type=\"hidden\" name=\"id\" value=\"{id}\">\
<input type=\"hidden\" name=\"name\" value=\"{name}\">\
<input type=\"hidden\" name=\"description\" value=\"{description}\">\
<button type=\"submit\"><h3>{name}</h3><p>{description}</p></button></form>\n",
            id = escape(&app.id),
            name = escape(&app.name),
            description = escape(&app.description),
        );
    }
    body.push_str("</div>");

    layout("ML Apps", Some(Nav::Apps), &body)
}

pub fn detail_page(app: &AppDescriptor, outcome: Option<Outcome<'_>>) -> Html<String> {
    let mut body = format!(
        "<h1>{name}</h1>\n<p>{description}</p>\n\
<form method=\"post\" action=\"/ml/{id}/predict\" enctype=\"multipart/form-data\" \
onsubmit=\"this.querySelector('button').disabled = true;\">\
<input type=\"file\" name=\"image\" accept=\"image/*\" required> \
<button type=\"submit\">Predict</button></form>\n",
        name = escape(&app.name),
        description = escape(&app.description),
        id = escape(&app.id),
    );

    match outcome {
        Some(Outcome::Succeeded(result)) => body.push_str(&result_section(result)),
        Some(Outcome::Failed(message)) => {
            let _ = write!(body, "<p class=\"error\">{}</p>", escape(message));
        }
        None => {}
    }

    layout(&app.name, Some(Nav::Apps), &body)
}

fn result_section(result: &PredictionResult) -> String {
    let mut section = format!(
        "<section class=\"card\"><h2>Result</h2>\n<table>\
<tr><th>Predicted class</th><td>{class}</td></tr>\
<tr><th>Confidence</th><td>{confidence}</td></tr>\
<tr><th>Processing time</th><td>{time}</td></tr>\
<tr><th>Device</th><td>{device}</td></tr></table>\n\
<h3>Class probabilities</h3>\n<table>",
        class = escape(&result.predicted_class),
        confidence = format_percent(result.confidence),
        time = format_seconds(result.processing_time),
        device = escape(&result.device),
    );
    for (class, probability) in ranked_probabilities(&result.class_probabilities) {
        let _ = write!(
            section,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape(class),
            format_percent(probability)
        );
    }
    section.push_str("</table></section>");
    section
}

pub fn profile_page(
    profile: &UserProfile,
    stats: &UsageStats,
    history: &[HistoryEntry],
    status: Option<Result<&str, &str>>,
) -> Html<String> {
    let mut body = String::from("<h1>Profile</h1>\n");
    match status {
        Some(Ok(notice)) => {
            let _ = write!(body, "<p class=\"notice\">{}</p>\n", escape(notice));
        }
        Some(Err(error)) => {
            let _ = write!(body, "<p class=\"error\">{}</p>\n", escape(error));
        }
        None => {}
    }

    let _ = write!(
        body,
        "<div class=\"grid\">\n<form class=\"card\" method=\"post\" action=\"/profile\">\
<h2>User</h2>\
<label>Name <input type=\"text\" name=\"name\" value=\"{name}\"></label><br>\
<label>Email <input type=\"email\" name=\"email\" value=\"{email}\"></label><br>\
<p>Joined {joined}</p><button type=\"submit\">Save</button></form>\n\
<div class=\"card\"><h2>Usage</h2><table>\
<tr><th>Total predictions</th><td>{total}</td></tr>\
<tr><th>Favourite app</th><td>{favourite}</td></tr>\
<tr><th>Last used</th><td>{last_used}</td></tr></table></div>\n</div>\n",
        name = escape(&profile.name),
        email = escape(&profile.email),
        joined = escape(&profile.join_date),
        total = stats.total_predictions,
        favourite = escape(&stats.favorite_app),
        last_used = escape(&stats.last_used),
    );

    body.push_str(
        "<section class=\"card\"><h2>Recent predictions</h2><table>\
<tr><th>When</th><th>App</th><th>Processing time</th><th>Result</th></tr>",
    );
    if history.is_empty() {
        body.push_str("<tr><td colspan=\"4\">No predictions yet.</td></tr>");
    }
    for entry in history {
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&entry.timestamp),
            escape(&entry.app_name),
            format_seconds(entry.processing_time),
            escape(&entry.result),
        );
    }
    body.push_str("</table></section>");

    layout("Profile", Some(Nav::Profile), &body)
}

pub fn error_page(title: &str, message: &str) -> Html<String> {
    let body = format!(
        "<h1>{}</h1>\n<p class=\"error\">{}</p>\n<p><a href=\"/ml-select\">Back to the app list</a></p>",
        escape(title),
        escape(message)
    );
    layout(title, None, &body)
}
