//! Human-Readable Output
//!
//! Renders one group as a fixed text block:
//!
//! ```text
//! ============ 42 ============
//! A:      0.2000us ± 0.08165us
//! B:       2.000us ±  0.8165us
//! ============================
//! ```
//!
//! The header centres the input's text in a rule, each unit gets one line with
//! its mean and standard deviation, and a rule of the same width closes the
//! block. All numbers share the scale picked from the median of the units'
//! means, so lines stay comparable at a glance.

use crate::report::TestcaseGroupResult;
use chronos_core::{Duration, SIGNIFICANT_DIGITS, Scale, format_significant};
use std::fmt::Display;
use std::io;

/// Default rule character
pub const DEFAULT_SEPARATOR: char = '=';

/// Columns added to the longest of (unit name, input text) to get the line width
pub const LAYOUT_MARGIN: usize = 26;

const FIELD_SEPARATOR: &str = " ± ";

/// Layout knobs for the text block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStyle {
    /// Character used for the header and trailing rules
    pub separator: char,
    /// See [`LAYOUT_MARGIN`]
    pub margin: usize,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            margin: LAYOUT_MARGIN,
        }
    }
}

struct Row<'a> {
    name: &'a str,
    mean: String,
    std_dev: String,
}

fn render(duration: Duration, scale: Scale) -> String {
    format!(
        "{}{}",
        format_significant(scale.apply(duration), SIGNIFICANT_DIGITS),
        scale.label()
    )
}

fn push_rule(output: &mut String, separator: char, count: usize) {
    output.extend(std::iter::repeat_n(separator, count));
}

/// Format a group with the default style
pub fn format_group<I: Display>(group: &TestcaseGroupResult<I>) -> String {
    format_group_with(group, &ReportStyle::default())
}

/// Format a group as the aligned, unit-scaled text block
pub fn format_group_with<I: Display>(group: &TestcaseGroupResult<I>, style: &ReportStyle) -> String {
    let input = group.input().to_string();
    let input_len = input.chars().count();
    let scale = group.scale();

    let rows: Vec<Row<'_>> = group
        .results()
        .iter()
        .map(|result| Row {
            name: result.name(),
            mean: render(result.mean(), scale),
            std_dev: render(result.std_dev(), scale),
        })
        .collect();

    let name_width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0);
    let mean_width = rows.iter().map(|r| r.mean.len()).max().unwrap_or(0);
    let std_width = rows.iter().map(|r| r.std_dev.len()).max().unwrap_or(0);
    let value_width = mean_width + FIELD_SEPARATOR.chars().count() + std_width;

    // Wide enough for the margin, for every "name: values" line, and for at
    // least one rule character on each side of the header text.
    let width = (name_width.max(input_len) + style.margin)
        .max(name_width + 2 + value_width)
        .max(input_len + 4);

    let mut output = String::new();

    let fill = width - input_len - 2;
    push_rule(&mut output, style.separator, fill / 2);
    output.push(' ');
    output.push_str(&input);
    output.push(' ');
    push_rule(&mut output, style.separator, fill - fill / 2);
    output.push('\n');

    for row in &rows {
        let padding = width - row.name.chars().count() - 1 - value_width;
        output.push_str(row.name);
        output.push(':');
        output.extend(std::iter::repeat_n(' ', padding));
        output.push_str(&format!(
            "{:>mw$}{}{:>sw$}",
            row.mean,
            FIELD_SEPARATOR,
            row.std_dev,
            mw = mean_width,
            sw = std_width
        ));
        output.push('\n');
    }

    push_rule(&mut output, style.separator, width);
    output.push('\n');

    output
}

/// Write the text block for `group` to `sink`
pub fn write_group<W, I>(sink: &mut W, group: &TestcaseGroupResult<I>, style: &ReportStyle) -> io::Result<()>
where
    W: io::Write + ?Sized,
    I: Display,
{
    sink.write_all(format_group_with(group, style).as_bytes())
}
