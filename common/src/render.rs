//! Render a scoreboard report as a standalone HTML document.

use crate::{Rank, ScoreboardReport};
use anyhow::{Context, Result};
use itertools::Itertools;
use std::fs;
use std::path::Path;

/// Pick the cell color for a rank. Rank 0 always takes `colors[0]` (the
/// "no artifact" entry); real ranks cycle through the remaining entries so a
/// board with more classes than colors wraps around instead of failing.
/// The config loader guarantees at least two entries.
pub fn color_for_rank(rank: Rank, colors: &[String]) -> &str {
    if rank == 0 {
        return &colors[0];
    }
    let rank_colors = &colors[1..];
    &rank_colors[(rank as usize - 1) % rank_colors.len()]
}

/// Render the full document: a Bootstrap-styled table with one row per user,
/// one column per test case, and cells colored by equivalence class.
pub fn render_document(report: &ScoreboardReport, colors: &[String]) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n{}\n{}\n</html>\n",
        document_head(&report.title),
        document_body(report, colors)
    )
}

/// Write a rendered document to the configured location.
///
/// # Errors
///
/// Returns an error if the file cannot be written. The caller logs it and
/// retries next cycle; it must not kill the poll loop.
pub fn write_document(html: &str, path: &Path) -> Result<()> {
    fs::write(path, html)
        .with_context(|| format!("Failed to write scoreboard to {}", path.display()))
}

fn document_head(title: &str) -> String {
    format!(
        concat!(
            "<head>\n",
            "<meta http-equiv=\"content-type\" content=\"text/html; charset=UTF-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0, shrink-to-fit=yes\">\n",
            "<title>{title}</title>\n",
            "<link rel=\"stylesheet\" href=\"https://maxcdn.bootstrapcdn.com/bootstrap/4.0.0-beta/css/bootstrap.min.css\" integrity=\"sha384-/Y6pD6FV/Vv2HJnA6t+vslU6fwYXjCFtcEpHbNJ0lyAFsXTsjBbfaDjzALeQsN6M\" crossorigin=\"anonymous\">\n",
            "</head>"
        ),
        title = escape_html(title)
    )
}

fn document_body(report: &ScoreboardReport, colors: &[String]) -> String {
    format!(
        concat!(
            "<body>\n<div class=\"container\">\n",
            "<table class=\"table table-hover table-bordered\">\n",
            "{caption}\n{head}\n{body}\n",
            "</table>\n",
            "</div>\n</body>"
        ),
        caption = table_caption(report),
        head = table_head(&report.testcases),
        body = table_body(report, colors)
    )
}

fn table_caption(report: &ScoreboardReport) -> String {
    format!(
        concat!(
            "<caption class=\"text-center\" style=\"caption-side: top\">\n",
            "<h2 style=\"color: #000000;\">{title}</h2>\n",
            "</caption>\n",
            "<caption class=\"text-right\" style=\"caption-side: bottom\">\n",
            "<em><small>Generated at {generated_at}</small></em>\n",
            "</caption>"
        ),
        title = escape_html(&report.title),
        generated_at = report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

fn table_head(testcases: &[String]) -> String {
    let columns = testcases
        .iter()
        .map(|name| format!("<th class=\"text-center\">{}</th>", escape_html(name)))
        .join("\n");
    format!(
        "<thead>\n<tr>\n<th class=\"text-center\">User Name</th>\n{columns}\n</tr>\n</thead>"
    )
}

fn table_body(report: &ScoreboardReport, colors: &[String]) -> String {
    let rows = report
        .users
        .iter()
        .zip(&report.results)
        .map(|(user, ranks)| {
            let cells = ranks
                .iter()
                .map(|rank| {
                    format!(
                        "<td class=\"text-center\" style=\"background-color: {}\"></td>",
                        color_for_rank(*rank, colors)
                    )
                })
                .join("\n");
            format!(
                "<tr><td class=\"text-center\">{}</td>\n{cells}</tr>",
                escape_html(user)
            )
        })
        .join("\n");
    format!("<tbody>\n{rows}\n</tbody>")
}

/// Minimal escaping for names and titles that land in HTML text content.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn palette() -> Vec<String> {
        vec![
            "transparent".to_string(),
            "#aaffaa".to_string(),
            "#ffaaaa".to_string(),
        ]
    }

    fn sample_report() -> ScoreboardReport {
        ScoreboardReport {
            title: "Compilers <2026>".to_string(),
            generated_at: Utc::now(),
            testcases: vec!["t1".to_string()],
            users: vec!["alice".to_string(), "dave".to_string()],
            results: vec![vec![1], vec![0]],
        }
    }

    #[test_log::test]
    fn test_color_for_rank_zero_is_distinct() {
        assert_eq!(color_for_rank(0, &palette()), "transparent");
    }

    #[test_log::test]
    fn test_color_for_rank_cycles() {
        let colors = palette();
        assert_eq!(color_for_rank(1, &colors), "#aaffaa");
        assert_eq!(color_for_rank(2, &colors), "#ffaaaa");
        // Two rank colors, so rank 3 wraps back to the first
        assert_eq!(color_for_rank(3, &colors), "#aaffaa");
        assert_eq!(color_for_rank(4, &colors), "#ffaaaa");
    }

    #[test_log::test]
    fn test_document_contains_title_and_cells() {
        let html = render_document(&sample_report(), &palette());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Compilers &lt;2026&gt;"));
        assert!(html.contains("<th class=\"text-center\">t1</th>"));
        assert!(html.contains("background-color: #aaffaa"));
        assert!(html.contains("background-color: transparent"));
        assert!(html.contains("Generated at"));
    }

    #[test_log::test]
    fn test_write_document() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("board.html");
        write_document("<html></html>", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test_log::test]
    fn test_write_document_bad_path_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("board.html");
        assert!(write_document("<html></html>", &path).is_err());
    }
}
