use log::trace;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "ini.pest"]
pub struct IniLineParser;

/// Lines longer than this many characters are skipped
pub const MAX_LINE_LENGTH: usize = 4096;

/// Classification of a single line of INI text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty line, comment, or a line exceeding [`MAX_LINE_LENGTH`]
    Skip,

    /// Section header: [name]
    Section(&'a str),

    /// Item: key = value, both sides trimmed
    Item { key: &'a str, value: &'a str },

    /// Anything else
    Unstructured(&'a str),
}

impl IniLineParser {
    /// Classify one line of text.
    ///
    /// The line must already be split from its neighbours with carriage
    /// returns removed. Item lines split at the first `=`.
    pub fn classify(line: &str) -> Line<'_> {
        if line.is_empty() || exceeds_max_length(line) {
            trace!("skipping empty or oversized line");
            return Line::Skip;
        }

        let Ok(mut pairs) = IniLineParser::parse(Rule::line, line) else {
            return Line::Unstructured(line);
        };

        let Some(classified) = pairs.next().and_then(|p| p.into_inner().next()) else {
            return Line::Unstructured(line);
        };

        match classified.as_rule() {
            Rule::comment => Line::Skip,
            Rule::item => {
                let mut inner = classified.into_inner();
                let key = inner.next().map(|p| p.as_str()).unwrap_or_default();
                let value = inner.next().map(|p| p.as_str()).unwrap_or_default();
                Line::Item {
                    key: key.trim(),
                    value: value.trim(),
                }
            }
            Rule::section_header => {
                let name = classified
                    .into_inner()
                    .next()
                    .map(|p| p.as_str())
                    .unwrap_or_default();
                Line::Section(name)
            }
            _ => Line::Unstructured(line),
        }
    }
}

fn exceeds_max_length(line: &str) -> bool {
    line.len() > MAX_LINE_LENGTH && line.chars().count() > MAX_LINE_LENGTH
}

/// Pick the line delimiter for a whole input.
///
/// Inputs with at most one `\n` split on `\r`; everything else on `\n`.
pub fn line_delimiter(content: &str) -> char {
    if content.matches('\n').count() <= 1 {
        '\r'
    } else {
        '\n'
    }
}

/// Split content into lines with every `\r` removed.
pub fn split_lines(content: &str) -> impl Iterator<Item = String> + '_ {
    let delimiter = line_delimiter(content);
    content.split(delimiter).map(|line| line.replace('\r', ""))
}
