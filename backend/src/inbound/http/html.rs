//! Server-rendered HTML pages.
//!
//! Pages are small and few, so they are assembled from strings. Every value
//! that originates from a user goes through [`escape`].

use crate::domain::{AvailabilityValue, Schedule, ScheduleView, User};

/// Escape text for use in HTML element content and quoted attributes.
pub(crate) fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape multi-line text, keeping the line breaks visible.
fn escape_multiline(raw: &str) -> String {
    raw.split('\n')
        .map(|line| escape(line.strip_suffix('\r').unwrap_or(line)))
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Short label shown in the availability grid.
pub(crate) fn availability_label(value: AvailabilityValue) -> &'static str {
    match value.value() {
        1 => "×",
        2 => "○",
        _ => "?",
    }
}

fn layout(title: &str, body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"ja\">\n",
            "<head><meta charset=\"utf-8\"><title>{title}</title></head>\n",
            "<body>\n{body}</body>\n",
            "</html>\n"
        ),
        title = escape(title),
        body = body,
    )
}

fn account_bar(user: Option<&User>) -> String {
    match user {
        Some(user) => format!(
            "<p class=\"account\">{} <a href=\"/logout\">Logout</a></p>\n",
            escape(user.username().as_ref())
        ),
        None => "<p class=\"account\"><a href=\"/login\">Login</a></p>\n".to_owned(),
    }
}

/// Landing page: the viewer's schedules, or a login link when anonymous.
pub(crate) fn index_page(user: Option<&User>, schedules: &[Schedule]) -> String {
    let mut body = account_bar(user);
    body.push_str("<h1>Schedules</h1>\n");
    if user.is_some() {
        body.push_str("<p><a href=\"/schedules/new\">New schedule</a></p>\n<ul>\n");
        for schedule in schedules {
            body.push_str(&format!(
                "<li><a href=\"/schedules/{id}\">{name}</a> <time>{created}</time></li>\n",
                id = schedule.schedule_id,
                name = escape(schedule.schedule_name.as_ref()),
                created = schedule.created_at.format("%Y-%m-%d %H:%M"),
            ));
        }
        body.push_str("</ul>\n");
    }
    layout("Schedules", &body)
}

/// Login form. Shows the current user when a session already exists.
pub(crate) fn login_page(user: Option<&User>) -> String {
    let mut body = account_bar(user);
    body.push_str(concat!(
        "<h1>Login</h1>\n",
        "<form method=\"post\" action=\"/auth/login\">\n",
        "<label>Username <input type=\"text\" name=\"username\"></label>\n",
        "<label>Password <input type=\"password\" name=\"password\"></label>\n",
        "<button type=\"submit\">Login</button>\n",
        "</form>\n"
    ));
    layout("Login", &body)
}

/// Creation form posting to `POST /schedules`.
pub(crate) fn new_schedule_page(user: &User) -> String {
    let mut body = account_bar(Some(user));
    body.push_str(concat!(
        "<h1>New schedule</h1>\n",
        "<form method=\"post\" action=\"/schedules\">\n",
        "<label>Name <input type=\"text\" name=\"scheduleName\"></label>\n",
        "<label>Memo <textarea name=\"memo\"></textarea></label>\n",
        "<label>Candidates (one per line) <textarea name=\"candidates\"></textarea></label>\n",
        "<button type=\"submit\">Create</button>\n",
        "</form>\n"
    ));
    layout("New schedule", &body)
}

const AVAILABILITY_SCRIPT: &str = concat!(
    "<script>\n",
    "document.querySelectorAll('button.availability').forEach((button) => {\n",
    "  button.addEventListener('click', async () => {\n",
    "    const next = (Number(button.dataset.availability) + 1) % 3;\n",
    "    const res = await fetch(button.dataset.href, {\n",
    "      method: 'POST',\n",
    "      headers: { 'Content-Type': 'application/json' },\n",
    "      body: JSON.stringify({ availability: next }),\n",
    "    });\n",
    "    if (res.ok) { location.reload(); }\n",
    "  });\n",
    "});\n",
    "</script>\n"
);

/// Schedule page: memo, candidate grid and comments.
///
/// The viewer's row is rendered as buttons cycling through the availability
/// values; other rows are read-only.
pub(crate) fn schedule_page(view: &ScheduleView, viewer: &User) -> String {
    let schedule = view.schedule();
    let schedule_id = schedule.schedule_id;
    let mut body = account_bar(Some(viewer));
    body.push_str(&format!(
        "<h1>{}</h1>\n<p class=\"memo\">{}</p>\n<p class=\"owner\">{}</p>\n",
        escape(schedule.schedule_name.as_ref()),
        escape_multiline(&schedule.memo),
        escape(schedule.created_by.username().as_ref()),
    ));

    body.push_str("<table>\n<thead><tr><th></th>");
    for participant in view.participants() {
        body.push_str(&format!(
            "<th>{}</th>",
            escape(participant.username().as_ref())
        ));
    }
    body.push_str("</tr></thead>\n<tbody>\n");
    for candidate in view.candidates() {
        body.push_str(&format!(
            "<tr><th>{}</th>",
            escape(candidate.candidate_name.as_ref())
        ));
        for participant in view.participants() {
            let value = view.availability(candidate.candidate_id, participant.user_id());
            if participant.user_id() == viewer.user_id() {
                body.push_str(&format!(
                    concat!(
                        "<td><button class=\"availability\" data-availability=\"{value}\" ",
                        "data-href=\"/schedules/{schedule}/users/{user}/candidates/{candidate}\">",
                        "{label}</button></td>"
                    ),
                    value = value,
                    schedule = schedule_id,
                    user = participant.user_id(),
                    candidate = candidate.candidate_id,
                    label = availability_label(value),
                ));
            } else {
                body.push_str(&format!("<td>{}</td>", availability_label(value)));
            }
        }
        body.push_str("</tr>\n");
    }
    body.push_str("<tr><th>Comment</th>");
    for participant in view.participants() {
        let comment = view
            .comment(participant.user_id())
            .map(|text| escape(text.as_ref()))
            .unwrap_or_default();
        body.push_str(&format!("<td>{comment}</td>"));
    }
    body.push_str("</tr>\n</tbody>\n</table>\n");

    let own_comment = view
        .comment(viewer.user_id())
        .map(|text| escape(text.as_ref()))
        .unwrap_or_default();
    body.push_str(&format!(
        concat!(
            "<form id=\"comment\" data-href=\"/schedules/{schedule}/users/{user}/comments\">\n",
            "<input type=\"text\" name=\"comment\" value=\"{comment}\">\n",
            "<button type=\"submit\">Save comment</button>\n",
            "</form>\n"
        ),
        schedule = schedule_id,
        user = viewer.user_id(),
        comment = own_comment,
    ));
    body.push_str(AVAILABILITY_SCRIPT);
    body.push_str(concat!(
        "<script>\n",
        "const form = document.getElementById('comment');\n",
        "form.addEventListener('submit', async (event) => {\n",
        "  event.preventDefault();\n",
        "  const comment = form.elements.comment.value;\n",
        "  const res = await fetch(form.dataset.href, {\n",
        "    method: 'POST',\n",
        "    headers: { 'Content-Type': 'application/json' },\n",
        "    body: JSON.stringify({ comment }),\n",
        "  });\n",
        "  if (res.ok) { location.reload(); }\n",
        "});\n",
        "</script>\n"
    ));

    layout(schedule.schedule_name.as_ref(), &body)
}
