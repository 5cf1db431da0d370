//! Plain-text draft → HTML body.

use html_escape::encode_text;

/// Escapes the draft and splits it into `<p>` paragraphs on blank lines.
/// Single newlines inside a paragraph become `<br />`.
pub fn render_html_body(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");

    normalized
        .split("\n\n")
        .map(|paragraph| paragraph.trim_matches('\n'))
        .filter(|paragraph| !paragraph.trim().is_empty())
        .map(|paragraph| {
            let lines: Vec<String> = paragraph
                .lines()
                .map(|line| encode_text(line).into_owned())
                .collect();
            format!("<p>{}</p>", lines.join("<br />"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_and_line_breaks() {
        let text = "Dear Hiring Team,\n\nI would like to apply.\nThank you.\n\nYour Sincerely\n\nJANE\nMIT";
        assert_eq!(
            render_html_body(text),
            "<p>Dear Hiring Team,</p>\n\
             <p>I would like to apply.<br />Thank you.</p>\n\
             <p>Your Sincerely</p>\n\
             <p>JANE<br />MIT</p>"
        );
    }

    #[test]
    fn test_markup_in_draft_is_escaped() {
        let html = render_html_body("Skills: <script>alert(1)</script> & Rust");
        assert_eq!(
            html,
            "<p>Skills: &lt;script&gt;alert(1)&lt;/script&gt; &amp; Rust</p>"
        );
    }

    #[test]
    fn test_crlf_and_extra_blank_lines_collapse() {
        assert_eq!(render_html_body("A\r\n\r\n\r\n\r\nB\r\n"), "<p>A</p>\n<p>B</p>");
    }
}
