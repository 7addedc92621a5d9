use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

use super::Flash;

const NAV: [(&str, &str); 5] = [
    ("/", "Home"),
    ("/about", "About"),
    ("/services", "Services"),
    ("/projects", "Projects"),
    ("/contact", "Contact"),
];

/// Wraps a rendered body in the site chrome. `body` is trusted markup; the
/// title and flash text are escaped here.
pub fn page(title: &str, flash: Option<&Flash>, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 1024);
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{} | Portfolio</title>\n</head>\n<body>\n<nav>\n<ul>\n",
        encode_text(title)
    );
    for (href, label) in NAV {
        let _ = writeln!(html, "<li><a href=\"{href}\">{label}</a></li>");
    }
    html.push_str("</ul>\n</nav>\n<main>\n");

    if let Some(flash) = flash {
        let _ = writeln!(
            html,
            "<div class=\"{}\" role=\"alert\">{}</div>",
            flash.level.css_class(),
            encode_text(&flash.message)
        );
    }

    html.push_str(body);
    html.push_str("\n</main>\n<footer><p>&copy; Portfolio</p></footer>\n</body>\n</html>\n");
    html
}

/// Escapes text for element content.
pub fn text(value: &str) -> String {
    encode_text(value).into_owned()
}

/// Escapes text for a double-quoted attribute value.
pub fn attr(value: &str) -> String {
    encode_double_quoted_attribute(value).into_owned()
}
