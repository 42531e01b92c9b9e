//! Minimal server-rendered markup for the page surface.
//!
//! Styling is not this crate's concern; pages carry just enough structure
//! to be usable and testable. Every interpolated value goes through
//! [`escape`].

use axum::http::StatusCode;
use rankly_core::visibility::{visibility_label, VisibilityFilter};

use crate::auth::session::SessionUser;
use crate::views::{ListCard, ListDetailView, ProfileView};

/// Shown on a detail page for a list without items.
pub const EMPTY_LIST_MESSAGE: &str = "This list is empty.";

/// Values the create form re-renders after a failed submission.
#[derive(Debug, Default, Clone)]
pub struct CreateFormValues {
    pub title: String,
    pub description: String,
    pub category: String,
    pub is_public: bool,
    pub items: String,
}

/// What the navigation bar offers.
#[derive(Debug, Clone, Copy)]
pub enum Nav<'a> {
    /// Links to authoring and the profile.
    Member(&'a SessionUser),
    /// A sign-in link to the auth service.
    Guest { login_url: &'a str },
    /// Home link only.
    Plain,
}

impl<'a> Nav<'a> {
    /// `Member` when signed in, otherwise `Guest` pointing at `login_url`.
    pub fn for_viewer(user: Option<&'a SessionUser>, login_url: &'a str) -> Self {
        match user {
            Some(user) => Nav::Member(user),
            None => Nav::Guest { login_url },
        }
    }
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(title: &str, nav: Nav<'_>, body: &str) -> String {
    let links = match nav {
        Nav::Member(user) => format!(
            r#" <a href="/create-list">New list</a> <a href="/profile">{}</a>"#,
            escape(&user.name)
        ),
        Nav::Guest { login_url } => {
            format!(r#" <a href="{}">Sign in</a>"#, escape(login_url))
        }
        Nav::Plain => String::new(),
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\">\
         <title>{} - Rankly</title></head>\n<body>\n\
         <nav><a href=\"/\">Rankly</a>{links}</nav>\n<main>\n{body}</main>\n</body>\n</html>\n",
        escape(title)
    )
}

/// `GET /` -- latest public lists.
pub fn browse_page(cards: &[ListCard], nav: Nav<'_>) -> String {
    let mut body = String::from("<h1>Public Lists</h1>\n");

    if cards.is_empty() {
        body.push_str("<p>No public lists yet.</p>\n");
    } else {
        body.push_str("<ul class=\"cards\">\n");
        for card in cards {
            let noun = if card.item_count == 1 { "item" } else { "items" };
            body.push_str(&format!(
                "<li class=\"card\"><a href=\"/list/{}\">{}</a> by {} &middot; {} {noun}",
                card.id,
                escape(&card.title),
                escape(&card.owner_name),
                card.item_count,
            ));
            if let Some(cover) = &card.cover_image_url {
                body.push_str(&format!(" <img src=\"{}\" alt=\"\">", escape(cover)));
            }
            body.push_str("</li>\n");
        }
        body.push_str("</ul>\n");
    }

    layout("Browse", nav, &body)
}

/// `GET /list/{id}` -- one list with its ranked items.
pub fn detail_page(view: &ListDetailView, nav: Nav<'_>) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape(&view.list.title));
    body.push_str(&format!(
        "<p><span class=\"visibility\">{}</span> by {}</p>\n",
        view.visibility_label,
        escape(&view.owner.name)
    ));
    if let Some(category) = &view.list.category {
        body.push_str(&format!("<p class=\"category\">{}</p>\n", escape(category)));
    }
    if let Some(description) = &view.list.description {
        body.push_str(&format!(
            "<p class=\"description\">{}</p>\n",
            escape(description)
        ));
    }

    if view.is_empty() {
        body.push_str(&format!("<p class=\"empty\">{EMPTY_LIST_MESSAGE}</p>\n"));
    } else {
        body.push_str("<ol class=\"items\">\n");
        for item in &view.items {
            body.push_str(&format!(
                "<li value=\"{rank}\"><span class=\"rank\">{rank}</span> <strong>{}</strong>",
                escape(&item.name),
                rank = item.rank,
            ));
            if let Some(note) = &item.note {
                body.push_str(&format!(" <em>{}</em>", escape(note)));
            }
            if let Some(url) = &item.image_url {
                body.push_str(&format!(
                    " <img src=\"{}\" alt=\"{}\">",
                    escape(url),
                    escape(&item.name)
                ));
            }
            body.push_str("</li>\n");
        }
        body.push_str("</ol>\n");
    }

    if view.viewer_is_owner {
        body.push_str(&format!(
            "<form method=\"post\" action=\"/list/{}/delete\">\
             <button type=\"submit\">Delete list</button></form>\n",
            view.list.id
        ));
    }

    layout(&view.list.title, nav, &body)
}

/// `GET /create-list` -- the authoring form, optionally with an error banner.
///
/// `items` is a JSON array of `{name, note, imageUrl}` in ranked order.
pub fn create_page(user: &SessionUser, error: Option<&str>, values: &CreateFormValues) -> String {
    let mut body = String::from("<h1>Create a list</h1>\n");
    if let Some(error) = error {
        body.push_str(&format!(
            "<div class=\"error\" role=\"alert\">{}</div>\n",
            escape(error)
        ));
    }

    let items = if values.items.trim().is_empty() {
        "[]"
    } else {
        values.items.as_str()
    };

    body.push_str(&format!(
        "<form method=\"post\" action=\"/create-list\">\n\
         <label>Title <input type=\"text\" name=\"title\" value=\"{}\"></label>\n\
         <label>Description <textarea name=\"description\">{}</textarea></label>\n\
         <label>Category <input type=\"text\" name=\"category\" value=\"{}\"></label>\n\
         <label><input type=\"checkbox\" name=\"isPublic\"{}> Public List</label>\n\
         <label>Items <textarea name=\"items\">{}</textarea></label>\n\
         <button type=\"submit\">Publish List</button>\n\
         </form>\n",
        escape(&values.title),
        escape(&values.description),
        escape(&values.category),
        if values.is_public { " checked" } else { "" },
        escape(items),
    ));

    layout("Create a list", Nav::Member(user), &body)
}

/// `GET /profile` -- the signed-in user's lists.
pub fn profile_page(view: &ProfileView) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape(&view.user.name));
    body.push_str(&format!(
        "<p>{} lists &middot; {} public &middot; {} private</p>\n",
        view.total_count, view.public_count, view.private_count
    ));

    let filters: Vec<String> = [
        VisibilityFilter::All,
        VisibilityFilter::Public,
        VisibilityFilter::Private,
    ]
    .into_iter()
    .map(|filter| {
        let marker = if filter == view.filter {
            " aria-current=\"true\""
        } else {
            ""
        };
        format!("<a href=\"/profile?visibility={filter}\"{marker}>{filter}</a>")
    })
    .collect();
    body.push_str(&format!("<p class=\"filters\">{}</p>\n", filters.join(" ")));

    if view.lists.is_empty() {
        body.push_str("<p>No lists here yet.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for entry in &view.lists {
            body.push_str(&format!(
                "<li><a href=\"/list/{}\">{}</a> ({} items, {})</li>\n",
                entry.list.id,
                escape(&entry.list.title),
                entry.items.len(),
                visibility_label(entry.list.is_public),
            ));
        }
        body.push_str("</ul>\n");
    }

    layout("Profile", Nav::Member(&view.user), &body)
}

/// Error page with the same status semantics as the JSON API.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let (heading, message) = match status {
        StatusCode::NOT_FOUND => (
            "List Not Found".to_string(),
            "This list does not exist or has been deleted.",
        ),
        other => (
            other.canonical_reason().unwrap_or("Error").to_string(),
            message,
        ),
    };
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to browsing</a></p>\n",
        escape(&heading),
        escape(message)
    );
    layout(&heading, Nav::Plain, &body)
}
