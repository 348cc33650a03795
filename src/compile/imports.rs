//! `@import` extraction from compiled CSS.
//!
//! A theme file must carry its header comment and `@import` lines before
//! any rule, but the compiler emits imports wherever the source placed
//! them. This pass lifts them out so assembly can put them back in the
//! right spot.

/// Result of splitting a stylesheet into residual CSS and its imports.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SplitCss {
    /// Input CSS with all import statements removed, lines trimmed.
    pub css: String,
    /// Extracted `@import ...;` statements, in order of appearance.
    pub imports: Vec<String>,
}

/// Split `@import` statements out of compiled CSS.
///
/// Single forward pass over lines. A line containing `@import` has its
/// `@...;` segment (from the `@` through the next `;`, or end of line when
/// unterminated) moved verbatim into `imports`; the rest of the line is
/// trimmed and kept. Other lines pass through trimmed. Running the pass
/// again on the residual CSS yields no further imports.
pub fn split_imports(css: &str) -> SplitCss {
    let mut out = SplitCss::default();
    let mut lines = Vec::new();

    for line in css.lines() {
        match line.find("@import") {
            Some(at) => {
                let rest = &line[at..];
                let (import, remainder) = match rest.find(';') {
                    Some(semi) => (&rest[..=semi], format!("{}{}", &line[..at], &rest[semi + 1..])),
                    None => (rest, line[..at].to_string()),
                };
                out.imports.push(import.to_string());
                lines.push(remainder.trim().to_string());
            }
            None => lines.push(line.trim().to_string()),
        }
    }

    out.css = lines.join("\n");
    out
}
