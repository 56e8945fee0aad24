//! Plain-text table rendering.
//!
//! Cells may span several lines (wrapped columns); widths are counted in
//! characters, not bytes.

use std::fmt::Write;

use clap::ValueEnum;
use fp_core::TalkTable;
use serde::{Deserialize, Serialize};

/// Supported table layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableFormat {
    /// Box-drawing borders with a line between rows.
    #[default]
    #[value(name = "fancy_grid")]
    FancyGrid,
    /// ASCII borders with a line between rows.
    Grid,
    /// Dashed rule under the header.
    Simple,
    /// GitHub-flavored Markdown pipe table.
    Github,
    /// Aligned columns, no rules.
    Plain,
}

/// A horizontal rule: left corner, fill, junction, right corner.
struct Rule {
    left: &'static str,
    fill: char,
    junction: &'static str,
    right: &'static str,
}

struct Style {
    top: Option<Rule>,
    below_header: Option<Rule>,
    between_rows: Option<Rule>,
    bottom: Option<Rule>,
    left: &'static str,
    separator: &'static str,
    right: &'static str,
    padding: usize,
}

impl TableFormat {
    fn style(self) -> Style {
        match self {
            Self::FancyGrid => Style {
                top: Some(Rule {
                    left: "╒",
                    fill: '═',
                    junction: "╤",
                    right: "╕",
                }),
                below_header: Some(Rule {
                    left: "╞",
                    fill: '═',
                    junction: "╪",
                    right: "╡",
                }),
                between_rows: Some(Rule {
                    left: "├",
                    fill: '─',
                    junction: "┼",
                    right: "┤",
                }),
                bottom: Some(Rule {
                    left: "╘",
                    fill: '═',
                    junction: "╧",
                    right: "╛",
                }),
                left: "│",
                separator: "│",
                right: "│",
                padding: 1,
            },
            Self::Grid => {
                let dashed = || Rule {
                    left: "+",
                    fill: '-',
                    junction: "+",
                    right: "+",
                };
                Style {
                    top: Some(dashed()),
                    below_header: Some(Rule {
                        left: "+",
                        fill: '=',
                        junction: "+",
                        right: "+",
                    }),
                    between_rows: Some(dashed()),
                    bottom: Some(dashed()),
                    left: "|",
                    separator: "|",
                    right: "|",
                    padding: 1,
                }
            }
            Self::Simple => Style {
                top: None,
                below_header: Some(Rule {
                    left: "",
                    fill: '-',
                    junction: "  ",
                    right: "",
                }),
                between_rows: None,
                bottom: None,
                left: "",
                separator: "  ",
                right: "",
                padding: 0,
            },
            Self::Github => Style {
                top: None,
                below_header: Some(Rule {
                    left: "|",
                    fill: '-',
                    junction: "|",
                    right: "|",
                }),
                between_rows: None,
                bottom: None,
                left: "|",
                separator: "|",
                right: "|",
                padding: 1,
            },
            Self::Plain => Style {
                top: None,
                below_header: None,
                between_rows: None,
                bottom: None,
                left: "",
                separator: "  ",
                right: "",
                padding: 0,
            },
        }
    }
}

/// Renders `table` with its title on the first line.
pub fn render(table: &TalkTable, format: TableFormat) -> String {
    let style = format.style();
    let headers: Vec<&str> = table.headers().collect();
    let widths = column_widths(&headers, &table.rows);

    let mut output = String::new();
    writeln!(output, "{}", table.title).unwrap();

    if let Some(rule) = &style.top {
        write_rule(&mut output, &style, rule, &widths);
    }
    write_row(&mut output, &style, &widths, headers.as_slice());
    if let Some(rule) = &style.below_header {
        write_rule(&mut output, &style, rule, &widths);
    }
    for (i, row) in table.rows.iter().enumerate() {
        if i > 0 {
            if let Some(rule) = &style.between_rows {
                write_rule(&mut output, &style, rule, &widths);
            }
        }
        write_row(&mut output, &style, &widths, row.as_slice());
    }
    if let Some(rule) = &style.bottom {
        write_rule(&mut output, &style, rule, &widths);
    }

    output
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| max_line_width(h)).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(max_line_width(cell));
        }
    }
    widths
}

fn max_line_width(cell: &str) -> usize {
    cell.lines().map(|line| line.chars().count()).max().unwrap_or(0)
}

fn write_rule(output: &mut String, style: &Style, rule: &Rule, widths: &[usize]) {
    let segments: Vec<String> = widths
        .iter()
        .map(|width| rule.fill.to_string().repeat(width + 2 * style.padding))
        .collect();
    writeln!(
        output,
        "{}{}{}",
        rule.left,
        segments.join(rule.junction),
        rule.right
    )
    .unwrap();
}

fn write_row<S: AsRef<str>>(output: &mut String, style: &Style, widths: &[usize], cells: &[S]) {
    let cell_lines: Vec<Vec<&str>> = cells
        .iter()
        .map(|cell| cell.as_ref().lines().collect())
        .collect();
    let height = cell_lines.iter().map(Vec::len).max().unwrap_or(0).max(1);
    let pad = " ".repeat(style.padding);

    for line in 0..height {
        let segments: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(column, width)| {
                let text = cell_lines
                    .get(column)
                    .and_then(|lines| lines.get(line))
                    .copied()
                    .unwrap_or_default();
                let fill = " ".repeat(width - text.chars().count());
                format!("{pad}{text}{fill}{pad}")
            })
            .collect();
        let rendered = format!(
            "{}{}{}",
            style.left,
            segments.join(style.separator),
            style.right
        );
        writeln!(output, "{}", rendered.trim_end()).unwrap();
    }
}
