//! Delimiter detection.
//!
//! Each candidate delimiter is scored over the first few non-blank lines.
//! A delimiter that appears the same number of times on every line scores
//! highest, nearly-consistent counts score lower, and anything else scores
//! by its raw count on the first line.

use crate::config::LoaderConfig;

/// Delimiter used when no candidate appears in the sample.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Scores candidate delimiters over a text sample.
#[derive(Debug, Clone)]
pub struct DelimiterSniffer<'a> {
    config: &'a LoaderConfig,
}

impl<'a> DelimiterSniffer<'a> {
    pub fn new(config: &'a LoaderConfig) -> Self {
        Self { config }
    }

    /// The highest-scoring candidate, or comma when none appears.
    pub fn detect(&self, text: &str) -> u8 {
        self.rank(text)
            .into_iter()
            .find(|&(_, score)| score > 0)
            .map_or(DEFAULT_DELIMITER, |(delim, _)| delim)
    }

    /// Every candidate with its score, best first.
    ///
    /// Equal scores keep candidate order.
    pub fn rank(&self, text: &str) -> Vec<(u8, usize)> {
        let lines = sample_lines(text, self.config.sniff_lines);

        let mut ranked: Vec<(u8, usize)> = self
            .config
            .candidate_delimiters
            .iter()
            .map(|&delim| (delim, self.score(&lines, delim)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    fn score(&self, lines: &[&str], delim: u8) -> usize {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim, self.config.quote_char))
            .collect();

        let Some(&first_count) = counts.first() else {
            return 0;
        };
        if first_count == 0 {
            return 0;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Tab gets a bonus as it rarely shows up inside values
        if consistent {
            first_count * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        }
    }
}

/// First `limit` non-blank lines of the text.
pub fn sample_lines(text: &str, limit: usize) -> Vec<&str> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .take(limit)
        .collect()
}

/// Count delimiter occurrences in a line, ignoring those inside quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8, quote: u8) -> usize {
    let delim_char = delimiter as char;
    let quote_char = quote as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            c if c == quote_char => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str) -> u8 {
        DelimiterSniffer::new(&LoaderConfig::default()).detect(text)
    }

    #[test]
    fn test_detect_delimiter_csv() {
        assert_eq!(detect("a,b,c\n1,2,3\n4,5,6"), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        assert_eq!(detect("a\tb\tc\n1\t2\t3\n4\t5\t6"), b'\t');
    }

    #[test]
    fn test_detect_delimiter_semicolon_with_decimal_commas() {
        let text = "name;price\nwidget;1,5\ngadget;2,25\nthing;3";
        assert_eq!(detect(text), b';');
    }

    #[test]
    fn test_detect_delimiter_pipe() {
        assert_eq!(detect("a|b\n1|2\n"), b'|');
    }

    #[test]
    fn test_detect_ignores_quoted_delimiters() {
        let text = "name;note\n\"Smith, J\";ok\n\"Doe, A\";fine";
        assert_eq!(detect(text), b';');
    }

    #[test]
    fn test_detect_tab_wins_tie() {
        assert_eq!(detect("a,b\tc\n1,2\t3"), b'\t');
    }

    #[test]
    fn test_detect_single_column_defaults_to_comma() {
        assert_eq!(detect("value\n1\n2"), DEFAULT_DELIMITER);
    }

    #[test]
    fn test_detect_skips_blank_lines() {
        assert_eq!(detect("\n\n  \na;b\n1;2"), b';');
    }

    #[test]
    fn test_rank_orders_by_score() {
        let config = LoaderConfig::default();
        let ranked = DelimiterSniffer::new(&config).rank("a;b;c\n1;2;3");
        assert_eq!(ranked[0], (b';', 2000));
        assert!(ranked[1..].iter().all(|&(_, score)| score == 0));
        // zero scores keep candidate order
        let rest: Vec<u8> = ranked[1..].iter().map(|&(d, _)| d).collect();
        assert_eq!(rest, vec![b',', b'\t', b'|']);
    }

    #[test]
    fn test_rank_inconsistent_counts() {
        let config = LoaderConfig::default();
        let ranked = DelimiterSniffer::new(&config).rank("a,b,c\n1,2\n");
        // counts [2, 1], variance 0.25
        assert_eq!(ranked[0], (b',', 200));
    }

    #[test]
    fn test_sample_lines_limit() {
        let text = "1\n2\n\n3\n4";
        assert_eq!(sample_lines(text, 3), vec!["1", "2", "3"]);
    }
}
