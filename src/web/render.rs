//! HTML for the web pages. Plain `format!`, no templates.

use std::path::Path;

use crate::core::Charset;

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a filesystem path for use after a route prefix.
/// Slashes are kept so the path reads naturally in the address bar.
pub fn encode_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

/// One row per entry: `[+]` opens info, directories also link into themselves.
pub fn dir_listing(dir: &Path, entries: &[(std::path::PathBuf, bool)]) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape_html(&dir.display().to_string()));

    if let Some(parent) = dir.parent() {
        body.push_str(&format!(
            "<a href=\"/dir{}\">..</a><br />\n",
            encode_path(parent)
        ));
    }

    for (path, is_dir) in entries {
        let href = encode_path(path);
        let name = escape_html(&path.display().to_string());
        if *is_dir {
            body.push_str(&format!(
                "<a href=\"/info{href}\">[+]</a> <a href=\"/dir{href}\">{name}</a><br />\n"
            ));
        } else {
            body.push_str(&format!("<a href=\"/info{href}\">[+]</a> {name}<br />\n"));
        }
    }

    page(&dir.display().to_string(), &body)
}

/// Info output plus a convert button and, for single files, the cover.
pub fn info_page(path: &Path, output: &str, legacy: Charset, is_file: bool) -> String {
    let href = encode_path(path);
    let charset = legacy.name().to_ascii_lowercase();

    let mut body = String::from("<h1>Mp3 Info</h1>\n");
    body.push_str(&format!(
        "<h2>{}</h2>\n",
        escape_html(&path.display().to_string())
    ));
    body.push_str(&format!(
        "<form method=\"post\" action=\"/conv{href}?charset={charset}\"><button type=\"submit\">Convert to Unicode ({})</button></form>\n",
        legacy.name()
    ));
    if is_file {
        body.push_str(&format!(
            "<img src=\"/cover{href}\" alt=\"cover\" style=\"max-width: 300px\" />\n"
        ));
    }
    body.push_str(&format!("<pre>{}</pre>\n", escape_html(output)));

    page("Mp3 Info", &body)
}

pub fn conv_page(path: &Path, output: &str) -> String {
    let href = encode_path(path);
    let body = format!(
        "<h1>Convert</h1>\n<h2>{}</h2>\n<pre>{}</pre>\n<a href=\"/info{href}\">Back to info</a>\n",
        escape_html(&path.display().to_string()),
        escape_html(output)
    );
    page("Convert", &body)
}
