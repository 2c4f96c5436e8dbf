/// Output formatting: terminal table and JSON.
use pairank_core::{RankedItem, SessionConfig};
use serde::Serialize;

#[derive(Serialize)]
struct JsonRankedItem<'a> {
    rank: usize,
    name: &'a str,
    rating: f64,
    shown: usize,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    items: Vec<JsonRankedItem<'a>>,
    total_comparisons: usize,
    total_rounds: usize,
    config: &'a SessionConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    kendall_tau: Option<f64>,
}

/// Print results as a formatted terminal table.
pub fn print_table(rankings: &[RankedItem], total_comparisons: usize, total_rounds: usize) {
    let name_width = rankings.iter()
        .map(|r| r.item.chars().count())
        .max()
        .unwrap_or(4)
        .max(4); // at least "Item"

    println!(" # | {:<name_width$} | Rating | Shown", "Item");
    println!("---|-{}-|--------|------", "-".repeat(name_width));

    for (i, r) in rankings.iter().enumerate() {
        println!(
            "{:>2} | {:<name_width$} | {:>6.0} | {:>5}",
            i + 1, r.item, r.rating.round(), r.shown,
        );
    }

    println!(
        "\n{} items ranked after {} of {} comparisons",
        rankings.len(),
        total_comparisons,
        total_rounds,
    );
}

/// Print results as JSON.
pub fn print_json(
    rankings: &[RankedItem],
    total_comparisons: usize,
    config: &SessionConfig,
    kendall_tau: Option<f64>,
) {
    let items: Vec<JsonRankedItem> = rankings
        .iter()
        .enumerate()
        .map(|(i, r)| JsonRankedItem {
            rank: i + 1,
            name: &r.item,
            rating: r.rating,
            shown: r.shown,
        })
        .collect();

    let output = JsonOutput {
        items,
        total_comparisons,
        total_rounds: config.total_rounds,
        config,
        kendall_tau,
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{json}"),
        Err(e) => crate::bail(format!("Failed to serialize results: {e}")),
    }
}
