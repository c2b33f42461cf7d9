use std::cmp::Ordering;

use tracing::debug;

use crate::models::{RankedRow, RankedTable, ScoreMap, UniverseTable};

/// Merges scores into the universe and orders it by F-Score.
///
/// Rows are sorted by score (highest first), then by quote (cheapest first).
/// The sort is stable, so rows tied on both keys keep their universe order.
/// Tickers absent from `scores` are ranked with the default, all-false result.
pub fn rank(universe: &UniverseTable, scores: &ScoreMap) -> RankedTable {
    let mut rows: Vec<RankedRow> = universe
        .rows()
        .iter()
        .map(|row| RankedRow {
            rank: 0,
            ticker: row.ticker.clone(),
            price: row.price,
            criteria: scores.get(&row.ticker).copied().unwrap_or_default(),
            attributes: row.attributes.clone(),
        })
        .collect();

    rows.sort_by(compare_rows);

    for (position, row) in rows.iter_mut().enumerate() {
        row.rank = position + 1;
    }

    debug!(rows = rows.len(), top = ?rows.first().map(|row| &row.ticker), "Ranked universe");
    RankedTable::new(universe.attribute_names().to_vec(), rows)
}

fn compare_rows(a: &RankedRow, b: &RankedRow) -> Ordering {
    b.score()
        .cmp(&a.score())
        .then_with(|| a.price.total_cmp(&b.price))
}
