use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::scoring::{Alternative, RankedEntry, ScoreRow};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a total at the 4 decimal places rankings are compared at.
pub fn format_total(total: f64) -> String {
    format!("{:.4}", total)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width <= 1 {
        "…".to_string()
    } else {
        let truncated: String = chars[..max_width - 1].iter().collect();
        format!("{}…", truncated)
    }
}

fn name_column_width(names: impl Iterator<Item = usize>) -> usize {
    // Leave room for "  N. ", the code column, and the total column.
    let budget = get_terminal_width().unwrap_or(usize::MAX).saturating_sub(20);
    names.max().unwrap_or(0).clamp(4, budget.max(4))
}

/// Format the ranked summary, one line per alternative, best first.
pub fn format_ranking(ranking: &[RankedEntry], use_colors: bool) -> String {
    if ranking.is_empty() {
        return "No alternatives to rank.".to_string();
    }

    let width = name_column_width(ranking.iter().map(|e| e.name.chars().count()));
    let mut lines = Vec::with_capacity(ranking.len());
    for (i, entry) in ranking.iter().enumerate() {
        let rank = i + 1;
        let name = truncate_name(&entry.name, width);
        let line = format!(
            "{:>2}. {:<width$}  {}  {}",
            rank,
            name,
            entry.code,
            format_total(entry.total),
            width = width
        );
        if use_colors && rank == 1 {
            lines.push(line.green().bold().to_string());
        } else {
            lines.push(line);
        }
    }
    lines.join("\n")
}

/// Format the full score table: one column per criterion (3 decimals, the
/// way the normalization matrix is usually printed) plus the weighted total.
pub fn format_detail(detail: &[ScoreRow], use_colors: bool) -> String {
    if detail.is_empty() {
        return "No alternatives to rank.".to_string();
    }

    let width = name_column_width(detail.iter().map(|r| r.name.chars().count()));

    let mut header = format!("{:<width$}  {:<4}", "Major", "Code", width = width);
    for criterion_score in &detail[0].scores {
        header.push_str(&format!("  {:>12}", criterion_score.criterion));
    }
    header.push_str(&format!("  {:>8}", "Total"));

    let mut lines = Vec::with_capacity(detail.len() + 1);
    if use_colors {
        lines.push(header.bold().to_string());
    } else {
        lines.push(header);
    }

    for row in detail {
        let mut line = format!(
            "{:<width$}  {:<4}",
            truncate_name(&row.name, width),
            row.code,
            width = width
        );
        for criterion_score in &row.scores {
            line.push_str(&format!("  {:>12.3}", criterion_score.score));
        }
        line.push_str(&format!("  {:>8}", format_total(row.total)));
        lines.push(line);
    }

    lines.join("\n")
}

/// Format the catalog listing: each alternative with its raw attributes.
pub fn format_catalog(catalog: &[Alternative], use_colors: bool) -> String {
    if catalog.is_empty() {
        return "Catalog is empty.".to_string();
    }

    catalog
        .iter()
        .map(|alternative| {
            let title = if use_colors {
                format!(
                    "{} ({})",
                    alternative.name.bold(),
                    alternative.code.cyan()
                )
            } else {
                format!("{} ({})", alternative.name, alternative.code)
            };
            let attributes = alternative
                .attributes
                .iter()
                .map(|(id, value)| format!("  {}: {}", id, value))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{}\n{}", title, attributes)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, name: &str, total: f64) -> RankedEntry {
        RankedEntry {
            code: code.to_string(),
            name: name.to_string(),
            total,
        }
    }

    #[test]
    fn test_format_total_four_decimals() {
        assert_eq!(format_total(0.91825), "0.9183");
        assert_eq!(format_total(1.0), "1.0000");
    }

    #[test]
    fn test_format_ranking_positions() {
        let ranking = vec![
            entry("A4", "Teknik Sipil", 0.91945),
            entry("A1", "Teknik Informatika", 0.91825),
        ];
        let output = format_ranking(&ranking, false);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with(" 1. Teknik Sipil"));
        // 0.91945 sits just under the rounding midpoint as an f64.
        assert!(lines[0].contains("0.9194"));
        assert!(lines[1].starts_with(" 2. Teknik Informatika"));
    }

    #[test]
    fn test_format_ranking_empty() {
        assert_eq!(format_ranking(&[], false), "No alternatives to rank.");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Manajemen", 20), "Manajemen");
        assert_eq!(truncate_name("Teknik Informatika", 10), "Teknik In…");
        assert_eq!(truncate_name("Psikologi", 1), "…");
    }

    #[test]
    fn test_format_detail_has_criterion_columns() {
        use crate::scoring::CriterionScore;
        let detail = vec![ScoreRow {
            code: "A1".to_string(),
            name: "Teknik Informatika".to_string(),
            scores: vec![
                CriterionScore {
                    criterion: "academic".to_string(),
                    score: 1.0,
                },
                CriterionScore {
                    criterion: "economy".to_string(),
                    score: 0.7,
                },
            ],
            total: 0.91825,
        }];
        let output = format_detail(&detail, false);
        assert!(output.contains("academic"));
        assert!(output.contains("economy"));
        assert!(output.contains("0.700"));
        assert!(output.contains("0.9183"));
    }
}
