use std::fmt::Write;

use crate::core::report::render::{ClassReportView, IndexView, ReportRenderer, Template};
use crate::types::{MutationOutcome, RenderError};

const STYLE_CSS: &str = include_str!("../../../assets/style.css");

/// Renders self-contained HTML documents with the stylesheet inlined
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }
}

/// Escape text for use in element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

fn head(out: &mut String, title: &str, css: &str) {
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    out.push_str("<style>\n");
    out.push_str(css);
    out.push_str("</style>\n</head>\n<body>\n");
}

fn mutation_item(out: &mut String, m: &MutationOutcome) -> std::fmt::Result {
    write!(
        out,
        "<li class=\"{}\">{}: {} in {}{}",
        m.status.css_class(),
        m.status,
        escape_html(m.description.as_deref().unwrap_or(m.mutator_name())),
        escape_html(&m.method),
        escape_html(&m.method_desc),
    )?;
    if let Some(test) = &m.killing_test {
        write!(out, " (killed by {})", escape_html(test))?;
    }
    out.push_str("</li>\n");
    Ok(())
}

impl ReportRenderer for HtmlRenderer {
    fn stylesheet(&self) -> &str {
        STYLE_CSS
    }

    fn render_class(&self, view: &ClassReportView<'_>) -> Result<String, RenderError> {
        let fail = |e: std::fmt::Error| Template::ClassReport.render_error(e.to_string());
        let summary = view.summary;
        let mut out = String::with_capacity(8_192);

        head(&mut out, &summary.source_file, view.css);
        writeln!(out, "<h1>{}</h1>", escape_html(&summary.source_file)).map_err(fail)?;
        writeln!(
            out,
            "<p>Package <code>{}</code>, mutated classes: {}</p>",
            escape_html(&summary.package_name),
            view.mutated_classes
                .iter()
                .map(|c| format!("<code>{}</code>", escape_html(c)))
                .collect::<Vec<_>>()
                .join(", ")
        )
        .map_err(fail)?;
        writeln!(
            out,
            "<p class=\"score\">Mutation score {}% ({} / {} detected, {} survived, {} without coverage)</p>",
            summary.mutation_score(),
            summary.detected,
            summary.total,
            summary.survived,
            summary.no_coverage
        )
        .map_err(fail)?;

        if view.lines.is_empty() {
            out.push_str("<p>Source file not found.</p>\n");
        } else {
            out.push_str("<table class=\"src\">\n");
            for line in view.lines {
                writeln!(
                    out,
                    "<tr class=\"{}\"><td class=\"ln\"><a name=\"l{n}\">{n}</a></td><td>{}</td><td>{}</td></tr>",
                    line.css_class(),
                    if line.is_mutated() {
                        format!("<a href=\"#m{}\">{}</a>", line.number, line.mutations.len())
                    } else {
                        String::new()
                    },
                    escape_html(&line.text),
                    n = line.number,
                )
                .map_err(fail)?;
            }
            out.push_str("</table>\n");
        }

        out.push_str("<h2>Mutations</h2>\n");
        for (line, mutations) in view.mutations_by_line {
            writeln!(
                out,
                "<h3><a name=\"m{line}\" href=\"#l{line}\">Line {line}</a></h3>\n<ul class=\"mutations\">"
            )
            .map_err(fail)?;
            for m in mutations {
                mutation_item(&mut out, m).map_err(fail)?;
            }
            out.push_str("</ul>\n");
        }

        out.push_str("<h2>Active mutators</h2>\n<ul>\n");
        for mutator in view.mutators {
            writeln!(out, "<li>{}</li>", escape_html(mutator)).map_err(fail)?;
        }
        out.push_str("</ul>\n</body>\n</html>\n");
        Ok(out)
    }

    fn render_index(&self, view: &IndexView<'_>) -> Result<String, RenderError> {
        let fail = |e: std::fmt::Error| Template::Index.render_error(e.to_string());
        let mut out = String::with_capacity(4_096);

        head(&mut out, "Mutation report", view.css);
        out.push_str("<h1>Mutation report</h1>\n");
        writeln!(
            out,
            "<p class=\"score\">{} classes, {} mutations, {} detected ({}%)</p>",
            view.totals.classes,
            view.totals.mutations,
            view.totals.detected,
            view.totals.mutation_score()
        )
        .map_err(fail)?;

        out.push_str("<table>\n<tr><th>Class</th><th>Source</th><th>Mutations</th><th>Detected</th><th>Score</th></tr>\n");
        for s in view.summaries {
            writeln!(
                out,
                "<tr><td><a href=\"{}\">{}</a></td><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}%</td></tr>",
                escape_html(&s.file_name),
                escape_html(&s.mutated_class),
                escape_html(&s.source_file),
                s.total,
                s.detected,
                s.mutation_score()
            )
            .map_err(fail)?;
        }
        out.push_str("</table>\n");

        if !view.errors.is_empty() {
            out.push_str("<h2>Errors</h2>\n<ul class=\"errors\">\n");
            for reason in view.errors {
                writeln!(out, "<li>{}</li>", escape_html(reason)).map_err(fail)?;
            }
            out.push_str("</ul>\n");
        }

        out.push_str("</body>\n</html>\n");
        Ok(out)
    }
}
