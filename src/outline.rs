use crate::headings::Heading;

const CONTENTS_HEADER: &str = "## Contents\n\n";

/// Renders headings as Markdown, one `#`-prefixed line per heading, in the
/// order given. Heading text is emitted verbatim.
pub fn render_outline(headings: &[Heading]) -> String {
    let body_len: usize = headings
        .iter()
        .map(|h| h.level() as usize + h.text().len() + 3)
        .sum();
    let mut result = String::with_capacity(CONTENTS_HEADER.len() + body_len);
    result.push_str(CONTENTS_HEADER);

    for heading in headings {
        for _ in 0..heading.level() {
            result.push('#');
        }
        result.push(' ');
        result.push_str(heading.text());
        result.push_str("\n\n");
    }

    result
}
