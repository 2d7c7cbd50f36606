//! Server-rendered HTML pages.
//!
//! Pages are plain strings styled with Bootstrap 5 from a CDN. Every piece
//! of text that can come from a user or the store goes through [`escape`].

use std::fmt::Write;

use crate::form::{
    CafeForm, CafeSubmission, FormErrors, FIELD_CLOSING, FIELD_COFFEE, FIELD_LOCATION,
    FIELD_NAME, FIELD_OPENING, FIELD_POWER, FIELD_WIFI,
};
use crate::models::{CafeRow, COLUMNS};
use crate::rating::Category;

const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="{css}">
</head>
<body class="bg-dark text-light">
<div class="container py-5">
{body}
</div>
</body>
</html>
"#,
        title = escape(title),
        css = BOOTSTRAP_CSS,
        body = body,
    )
}

pub fn index_page() -> String {
    layout(
        "Coffee and Wifi",
        r#"<div class="text-center">
<h1 class="display-4">☕️ Coffee &amp; Wifi 💻</h1>
<p class="lead">Want to work in a cafe but need power and wifi?</p>
<p>You've found the right place! Check out the collection of cafes which have been rated for coffee, wifi and power.</p>
<a class="btn btn-warning btn-lg" href="/cafes">Show Me!</a>
</div>"#,
    )
}

pub fn cafes_page(rows: &[CafeRow]) -> String {
    let mut body = String::new();
    body.push_str("<h1>All Cafes</h1>\n");
    body.push_str("<table class=\"table table-dark table-striped\">\n<thead><tr>");
    for heading in COLUMNS {
        let _ = write!(body, "<th>{}</th>", escape(heading));
    }
    body.push_str("</tr></thead>\n<tbody>\n");

    for row in rows {
        body.push_str("<tr>");
        for (i, cell) in row.iter().enumerate() {
            if i == 1 {
                let _ = write!(
                    body,
                    "<td><a href=\"{}\">Maps Link</a></td>",
                    escape(cell)
                );
            } else {
                let _ = write!(body, "<td>{}</td>", escape(cell));
            }
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</tbody>\n</table>\n");

    if rows.is_empty() {
        body.push_str("<p>No cafes yet.</p>\n");
    }
    body.push_str(
        "<p><a class=\"btn btn-outline-light\" href=\"/add\">Add a cafe</a> \
         <a class=\"btn btn-link\" href=\"/\">Return to index page</a></p>",
    );

    layout("All Cafes", &body)
}

/// The add form, empty or re-rendered with submitted values and errors.
pub fn add_page(
    form: &CafeForm,
    values: &CafeSubmission,
    errors: &FormErrors,
    csrf_token: &str,
) -> String {
    let mut body = String::new();
    body.push_str("<h1>Add a new cafe into the database</h1>\n");

    if let Some(message) = errors.form_error() {
        let _ = writeln!(
            body,
            "<div class=\"alert alert-danger\" role=\"alert\">{}</div>",
            escape(message)
        );
    }

    body.push_str("<form method=\"post\" action=\"/add\" novalidate>\n");
    let _ = writeln!(
        body,
        "<input type=\"hidden\" name=\"csrf_token\" value=\"{}\">",
        escape(csrf_token)
    );

    text_input(&mut body, FIELD_NAME, "Cafe name", "text", values, errors);
    text_input(
        &mut body,
        FIELD_LOCATION,
        "Cafe Location on Google Maps (URL)",
        "url",
        values,
        errors,
    );
    text_input(
        &mut body,
        FIELD_OPENING,
        "Opening Time e.g. 8AM",
        "text",
        values,
        errors,
    );
    text_input(
        &mut body,
        FIELD_CLOSING,
        "Closing Time e.g. 5:30PM",
        "text",
        values,
        errors,
    );

    let ratings = [
        (FIELD_COFFEE, "Coffee Rating", Category::Coffee),
        (FIELD_WIFI, "Wifi Strength Rating", Category::Wifi),
        (FIELD_POWER, "Power Socket Rating", Category::Power),
    ];
    for (field, label, category) in ratings {
        select_input(&mut body, form, field, label, category, values, errors);
    }

    body.push_str(
        "<button type=\"submit\" class=\"btn btn-primary\">Submit</button>\n</form>\n",
    );
    body.push_str("<p class=\"mt-3\"><a href=\"/cafes\">See all cafes</a></p>");

    layout("Add a Cafe", &body)
}

fn text_input(
    body: &mut String,
    field: &str,
    label: &str,
    kind: &str,
    values: &CafeSubmission,
    errors: &FormErrors,
) {
    let error = errors.get(field);
    let _ = writeln!(
        body,
        "<div class=\"mb-3\">\n\
         <label class=\"form-label\" for=\"{field}\">{label}</label>\n\
         <input class=\"form-control{invalid}\" type=\"{kind}\" \
         id=\"{field}\" name=\"{field}\" value=\"{value}\">",
        field = field,
        label = escape(label),
        invalid = if error.is_some() { " is-invalid" } else { "" },
        kind = kind,
        value = escape(values.value(field)),
    );
    field_error(body, error);
    body.push_str("</div>\n");
}

fn select_input(
    body: &mut String,
    form: &CafeForm,
    field: &str,
    label: &str,
    category: Category,
    values: &CafeSubmission,
    errors: &FormErrors,
) {
    let error = errors.get(field);
    let selected = values.value(field);
    let _ = writeln!(
        body,
        "<div class=\"mb-3\">\n\
         <label class=\"form-label\" for=\"{field}\">{label}</label>\n\
         <select class=\"form-select{invalid}\" id=\"{field}\" name=\"{field}\">",
        field = field,
        label = escape(label),
        invalid = if error.is_some() { " is-invalid" } else { "" },
    );
    for choice in form.choices().choices(category) {
        let value = choice.value.to_string();
        let _ = writeln!(
            body,
            "<option value=\"{}\"{}>{}</option>",
            value,
            if value == selected { " selected" } else { "" },
            escape(&choice.label)
        );
    }
    body.push_str("</select>\n");
    field_error(body, error);
    body.push_str("</div>\n");
}

fn field_error(body: &mut String, error: Option<&str>) {
    if let Some(message) = error {
        let _ = writeln!(
            body,
            "<div class=\"invalid-feedback\">{}</div>",
            escape(message)
        );
    }
}

pub fn error_page(title: &str, message: &str) -> String {
    layout(
        title,
        &format!(
            "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/\">Return to index page</a></p>",
            escape(title),
            escape(message)
        ),
    )
}
