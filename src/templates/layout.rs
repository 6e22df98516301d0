// src/templates/layout.rs
use super::html_escape;

pub fn render_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{}</title>
    <link rel="stylesheet" href="/static/css/signup.css">
    <script src="/static/js/signup.js" defer></script>
</head>
<body>
    <main class="main">
        {}
    </main>
</body>
</html>"#,
        html_escape(title),
        content
    )
}
