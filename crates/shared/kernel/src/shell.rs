//! HTML shell and asset references rooted at the public base path.

use pm_domain::constants::MOUNT_ANCHOR;

/// Stylesheet copied into the bundle from `apps/web/public`.
pub const STYLESHEET: &str = "assets/main.css";

/// Normalises a public base path so it starts and ends with `/`.
///
/// ```rust
/// use pm_kernel::shell::normalize_base;
///
/// assert_eq!(normalize_base(""), "/");
/// assert_eq!(normalize_base("play"), "/play/");
/// assert_eq!(normalize_base("/play/"), "/play/");
/// ```
#[must_use]
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_matches('/');
    if trimmed.is_empty() { "/".to_owned() } else { format!("/{trimmed}/") }
}

/// Absolute href of `asset` under `base`; never a relative reference.
#[must_use]
pub fn asset_href(base: &str, asset: &str) -> String {
    format!("{}{}", normalize_base(base), asset.trim_start_matches(['.', '/']))
}

/// Renders the document served for client routes when no bundle is present.
///
/// The bundler fingerprints its script names, so this page carries the mount
/// anchor and stylesheet but no client code.
#[must_use]
pub fn render_shell(base: &str, title: &str) -> String {
    let base = normalize_base(base);
    let title = escape(title);
    let css = asset_href(&base, STYLESHEET);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="{css}">
</head>
<body>
  <div id="{MOUNT_ANCHOR}"></div>
  <p class="notice">The client bundle has not been built.</p>
</body>
</html>
"#
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
