//! Balancing category blocks across display columns

use crate::model::CategoryBlock;

/// Column count for the usage summary
pub const DEFAULT_COLUMNS: usize = 3;

/// Spread blocks over `column_count` columns, largest block first, each into
/// the currently shortest column (lowest index on ties).
///
/// This is a greedy approximation, not optimal packing. Blocks with equal
/// line counts keep their input order, so the result is deterministic for a
/// given input. A column count of zero is treated as one.
pub fn distribute(blocks: Vec<CategoryBlock>, column_count: usize) -> Vec<Vec<CategoryBlock>> {
    let column_count = column_count.max(1);
    let mut columns: Vec<Vec<CategoryBlock>> = (0..column_count).map(|_| Vec::new()).collect();
    let mut totals = vec![0usize; column_count];

    let mut sorted = blocks;
    // stable sort keeps input order between equal blocks
    sorted.sort_by(|a, b| b.line_count.cmp(&a.line_count));

    for block in sorted {
        let target = shortest_column(&totals);
        totals[target] += block.line_count;
        columns[target].push(block);
    }

    columns
}

fn shortest_column(totals: &[usize]) -> usize {
    let mut best = 0;
    for (i, &total) in totals.iter().enumerate().skip(1) {
        if total < totals[best] {
            best = i;
        }
    }
    best
}

/// Line count of each column
pub fn column_heights(columns: &[Vec<CategoryBlock>]) -> Vec<usize> {
    columns
        .iter()
        .map(|column| column.iter().map(|b| b.line_count).sum())
        .collect()
}
