//! Display-math cleanup over a rendered body.
//!
//! The body is scanned once for `\[ ... \]` regions. A region whose first
//! `\begin{name}` declares a self-delimiting environment (or that declares
//! none at all) loses its `\[`/`\]` markers; every other region is kept as is.
//! Regions do not nest: each `\[` pairs with the nearest following `\]`.

use nom::{
    bytes::complete::{tag, take_while},
    character::complete::char,
    sequence::delimited,
    IResult,
};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Environment name reported when a region declares none.
pub const NO_ENVIRONMENT: &str = "none";

/// Environments that carry their own layout and must not be wrapped in `\[ \]`.
pub const SELF_DELIMITING: &[&str] = &["array", "matrix", NO_ENVIRONMENT];

/// A `\[` opening a display-math region, up to the nearest `\]`.
///
/// The opener is not checked for a preceding backslash, so a row spacing such
/// as `\\[2pt]` also opens a region.
static DISPLAY_MATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\\[(.*?)\\\]").unwrap());

/// One `\[ ... \]` region found in a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region<'a> {
    /// Byte range of the whole region, markers included
    pub span: Range<usize>,
    /// Text between the markers
    pub inner: &'a str,
    /// First declared environment, or [`NO_ENVIRONMENT`]
    pub environment: &'a str,
}

impl Region<'_> {
    pub fn is_self_delimiting(&self) -> bool {
        is_self_delimiting(self.environment)
    }
}

/// Whether `environment` is one of [`SELF_DELIMITING`].
pub fn is_self_delimiting(environment: &str) -> bool {
    SELF_DELIMITING.contains(&environment)
}

/// Parse a `\begin{name}` declaration whose name stays on one line.
fn begin_declaration(input: &str) -> IResult<&str, &str> {
    delimited(
        tag("\\begin{"),
        take_while(|c: char| c != '}' && c != '\n'),
        char('}'),
    )(input)
}

/// Name of the first environment declared in `text`.
pub fn environment_type(text: &str) -> &str {
    let mut rest = text;
    while let Some(pos) = rest.find("\\begin{") {
        let candidate = &rest[pos..];
        if let Ok((_, name)) = begin_declaration(candidate) {
            return name;
        }
        rest = &candidate[1..];
    }
    NO_ENVIRONMENT
}

/// All display-math regions of `body`, left to right.
pub fn find_regions(body: &str) -> Vec<Region<'_>> {
    DISPLAY_MATH
        .captures_iter(body)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1).map_or("", |m| m.as_str());
            Some(Region {
                span: whole.range(),
                inner,
                environment: environment_type(inner),
            })
        })
        .collect()
}

/// Strip the display-math markers from every self-delimiting region.
pub fn process_environments(body: &str) -> String {
    let regions = find_regions(body);
    if regions.is_empty() {
        return body.to_string();
    }

    let mut output = String::with_capacity(body.len());
    let mut last = 0;

    for region in &regions {
        let strip = region.is_self_delimiting();
        tracing::trace!(
            environment = region.environment,
            start = region.span.start,
            strip,
            "Display math region"
        );

        output.push_str(&body[last..region.span.start]);
        if strip {
            output.push_str(region.inner);
        } else {
            output.push_str(&body[region.span.clone()]);
        }
        last = region.span.end;
    }

    output.push_str(&body[last..]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_environment_type() {
        assert_eq!(environment_type("\\begin{matrix}1\\end{matrix}"), "matrix");
        assert_eq!(environment_type("x^2 + y^2 = z^2"), "none");
        assert_eq!(environment_type(""), "none");
        assert_eq!(
            environment_type("a \\begin{aligned} x \\begin{array}"),
            "aligned"
        );
    }

    #[test]
    fn test_environment_type_skips_broken_declaration() {
        assert_eq!(environment_type("\\begin{ali\ngned} \\begin{cases}"), "cases");
        assert_eq!(environment_type("\\begin{matrix"), "none");
    }

    #[test]
    fn test_find_regions() {
        let body = "a \\[x\\] b \\[\n\\begin{align}y\\end{align}\n\\] c";
        let regions = find_regions(body);

        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].inner, "x");
        assert_eq!(regions[0].environment, "none");
        assert_eq!(&body[regions[0].span.clone()], "\\[x\\]");
        assert_eq!(regions[1].environment, "align");
        assert!(!regions[1].is_self_delimiting());
    }

    #[test]
    fn test_strips_matrix() {
        let body = "\\[\n\\begin{matrix}1&0\\\\0&1\\end{matrix}\n\\]\n";
        assert_eq!(
            process_environments(body),
            "\n\\begin{matrix}1&0\\\\0&1\\end{matrix}\n\n"
        );
    }

    #[test]
    fn test_strips_plain_math() {
        let body = "before \\[x^2+y^2=z^2\\] after";
        assert_eq!(process_environments(body), "before x^2+y^2=z^2 after");
    }

    #[test]
    fn test_keeps_other_environments() {
        let body = "\\[\n\\begin{align}a &= b\\end{align}\n\\]";
        assert_eq!(process_environments(body), body);
    }

    #[test]
    fn test_empty_region_is_stripped() {
        assert_eq!(process_environments("a\\[\\]b"), "ab");
    }

    #[test]
    fn test_unbalanced_is_left_alone() {
        let body = "\\[ \\begin{matrix} no close";
        assert_eq!(process_environments(body), body);
        assert!(find_regions(body).is_empty());
    }

    #[test]
    fn test_mixed_regions_in_order() {
        let body = "\\[\\begin{array}{c}1\\end{array}\\] mid \\[\\begin{cases}2\\end{cases}\\] \\[3\\]";
        assert_eq!(
            process_environments(body),
            "\\begin{array}{c}1\\end{array} mid \\[\\begin{cases}2\\end{cases}\\] 3"
        );
    }

    #[test]
    fn test_idempotent_once_stripped() {
        let inputs = [
            "\\[\\begin{matrix}1\\end{matrix}\\]",
            "text \\[\\begin{equation}e\\end{equation}\\] and \\[z\\]",
            "no math at all",
        ];
        for input in inputs {
            let once = process_environments(input);
            assert_eq!(process_environments(&once), once);
        }
    }

    #[test]
    fn test_row_spacing_opens_a_region() {
        let body = "x \\\\[2pt] y \\] z";
        let regions = find_regions(body);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].span.start, 3);
        assert_eq!(regions[0].inner, "2pt] y ");
    }

    #[test]
    fn test_no_regions_returns_input() {
        assert_eq!(process_environments(""), "");
        assert_eq!(process_environments("plain $x$ text"), "plain $x$ text");
    }
}
