//! Grid reconstruction
//!
//! Vote sheets rendered as visual tables carry their meaning in
//! geometry, not markup: the extractor hands back tokens in document
//! order (often the order the sheet was hand-edited in, not reading
//! order), and the grid has to be rebuilt from coordinates. Marks are
//! assigned to the header column whose right edge is nearest the
//! mark's own right edge.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rollcall_types::{HeaderColumn, ReconstructError, Token, VoteCategory};

use crate::adapters::LayoutAdapter;
use crate::patterns;

/// Raw (pre-normalization) result of grid reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridExtract {
    pub names_by_category: BTreeMap<VoteCategory, Vec<String>>,
    pub date: Option<NaiveDate>,
    /// Per-category counts parsed from the printed totals row, if one
    /// was found.
    pub table_totals: Option<BTreeMap<VoteCategory, usize>>,
}

/// Rebuild the vote table from positioned tokens.
pub fn reconstruct_grid(
    adapter: &dyn LayoutAdapter,
    tokens: &[Token],
) -> Result<GridExtract, ReconstructError> {
    let mut columns: Vec<HeaderColumn> = Vec::new();
    let mut rows: BTreeMap<i64, Vec<Token>> = BTreeMap::new();
    let mut table_start: Option<i64> = None;
    let mut table_stop: Option<i64> = None;
    let mut totals_top: Option<i64> = None;
    let mut date: Option<NaiveDate> = None;

    for token in tokens {
        let text = token.text.trim();
        if text.is_empty() {
            continue;
        }

        // Side observations. The terminator and totals rows are found
        // by label here, but their cells still land in the data rows
        // below so the totals row can be parsed positionally.
        if text.contains(adapter.table_stop()) {
            table_stop = Some(token.top);
        }
        if text.contains(adapter.totals_marker()) {
            totals_top = Some(token.top);
        }

        if let Some(found) = patterns::parse_date_marker(text) {
            date = Some(found);
        } else if adapter.is_header_label(text) {
            if let Some(category) = adapter.category_for_label(text) {
                columns.push(HeaderColumn {
                    category,
                    right_edge: token.right_edge(),
                });
                table_start.get_or_insert(token.top);
            }
        } else {
            // Rows are generated on a fixed grid, so exact top
            // equality is the correct row key.
            rows.entry(token.top).or_default().push(token.clone());
        }
    }

    let (Some(table_start), false) = (table_start, columns.is_empty()) else {
        return Err(ReconstructError::LayoutUnrecognized(
            "no header labels found".to_string(),
        ));
    };
    let Some(table_stop) = table_stop else {
        return Err(ReconstructError::LayoutUnrecognized(format!(
            "no {:?} table terminator found",
            adapter.table_stop()
        )));
    };

    // Header tokens are not guaranteed to appear in column order.
    columns.sort_by_key(|c| c.right_edge);

    let mut names: BTreeMap<VoteCategory, Vec<String>> = BTreeMap::new();
    // One lookup per distinct mark x-position; panes repeat the same
    // columns all the way down.
    let mut column_cache: HashMap<i64, usize> = HashMap::new();

    for (&top, cells) in rows.iter_mut() {
        // Rows outside the header/terminator band are titles and
        // footers. The totals row is handled separately below.
        if top <= table_start || top >= table_stop || Some(top) == totals_top {
            continue;
        }
        cells.sort_by_key(|t| t.left);

        // Each physical row holds side-by-side (name, mark) pairs,
        // one pair per table pane.
        for pair in cells.chunks(2) {
            let name_cell = &pair[0];
            if name_cell.text.contains(adapter.table_stop()) {
                break;
            }
            let Some(mark_cell) = pair.get(1) else {
                tracing::warn!(name = %name_cell.text, top, "name cell without a vote mark");
                continue;
            };
            let slot = match column_cache.get(&mark_cell.left) {
                Some(&slot) => slot,
                None => {
                    let slot = nearest_column(&columns, mark_cell.right_edge())?;
                    column_cache.insert(mark_cell.left, slot);
                    slot
                }
            };
            names
                .entry(columns[slot].category)
                .or_default()
                .push(name_cell.text.trim().to_string());
        }
    }

    let table_totals = totals_top
        .and_then(|top| rows.get(&top))
        .map(|cells| parse_totals_row(&columns, cells))
        .filter(|totals| !totals.is_empty());

    Ok(GridExtract {
        names_by_category: names,
        date,
        table_totals,
    })
}

/// Read the printed per-category counts off the totals row, assigning
/// each numeric cell to its column positionally. Label cells ("TOTAL",
/// "YEAS") carry their count as the last whitespace-separated token or
/// not at all.
fn parse_totals_row(
    columns: &[HeaderColumn],
    cells: &[Token],
) -> BTreeMap<VoteCategory, usize> {
    let mut sorted: Vec<&Token> = cells.iter().collect();
    sorted.sort_by_key(|t| t.left);

    let mut totals: BTreeMap<VoteCategory, usize> = BTreeMap::new();
    for cell in sorted {
        let value = cell
            .text
            .split_whitespace()
            .last()
            .and_then(|v| v.parse::<usize>().ok());
        let Some(value) = value else { continue };
        if let Ok(slot) = nearest_column(columns, cell.right_edge()) {
            // Shared columns (REC and friends) accumulate.
            *totals.entry(columns[slot].category).or_insert(0) += value;
        }
    }
    totals
}

/// Index of the header boundary nearest to a cell's effective x
/// position. Ties go to the earlier (leftmost) boundary.
pub(crate) fn nearest_column(
    columns: &[HeaderColumn],
    x: i64,
) -> Result<usize, ReconstructError> {
    if columns.is_empty() {
        return Err(ReconstructError::ColumnAmbiguous(x));
    }
    let idx = columns.partition_point(|c| c.right_edge < x);
    if idx == 0 {
        return Ok(0);
    }
    if idx == columns.len() {
        return Ok(columns.len() - 1);
    }
    let before = columns[idx - 1].right_edge;
    let after = columns[idx].right_edge;
    if after - x < x - before {
        Ok(idx)
    } else {
        Ok(idx - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::new_mexico::{NmHouse, NmSenate};
    use pretty_assertions::assert_eq;

    fn token(text: &str, top: i64, left: i64, width: i64) -> Token {
        Token {
            text: text.to_string(),
            top,
            left,
            width,
        }
    }

    fn boundaries(edges: &[i64]) -> Vec<HeaderColumn> {
        let categories = [
            VoteCategory::Yes,
            VoteCategory::No,
            VoteCategory::Excused,
            VoteCategory::Absent,
        ];
        edges
            .iter()
            .zip(categories)
            .map(|(&right_edge, category)| HeaderColumn {
                category,
                right_edge,
            })
            .collect()
    }

    #[test]
    fn nearest_column_ties_resolve_to_earlier_boundary() {
        // Equidistant between 130 and 170: the earlier boundary wins.
        let columns = boundaries(&[130, 170]);
        assert_eq!(nearest_column(&columns, 150), Ok(0));
        assert_eq!(nearest_column(&columns, 151), Ok(1));
        assert_eq!(nearest_column(&columns, 149), Ok(0));
    }

    #[test]
    fn nearest_column_clamps_to_ends() {
        let columns = boundaries(&[130, 170]);
        assert_eq!(nearest_column(&columns, 40), Ok(0));
        assert_eq!(nearest_column(&columns, 400), Ok(1));
        assert_eq!(nearest_column(&columns, 130), Ok(0));
    }

    #[test]
    fn nearest_column_with_no_boundaries_is_ambiguous() {
        assert_eq!(
            nearest_column(&[], 150),
            Err(ReconstructError::ColumnAmbiguous(150))
        );
    }

    #[test]
    fn single_pair_lands_in_nearest_category() {
        // YES@130, NO@170, Smith's mark ends at 125: nearest is YES.
        let tokens = vec![
            token("YES", 20, 100, 30),
            token("NO", 20, 140, 30),
            token("Smith", 50, 80, 30),
            token("X", 50, 115, 10),
            token("TOTAL", 100, 80, 40),
        ];
        let extract = reconstruct_grid(&NmSenate, &tokens).unwrap();
        assert_eq!(
            extract.names_by_category.get(&VoteCategory::Yes),
            Some(&vec!["Smith".to_string()])
        );
        assert_eq!(extract.names_by_category.get(&VoteCategory::No), None);
    }

    #[test]
    fn header_tokens_out_of_stream_order_still_sort_into_columns() {
        let tokens = vec![
            // NO arrives before YES in the raw stream.
            token("NO", 20, 140, 30),
            token("YES", 20, 100, 30),
            token("Smith", 50, 80, 30),
            token("X", 50, 155, 10), // right edge 165, nearest NO@170
            token("TOTAL", 100, 80, 40),
        ];
        let extract = reconstruct_grid(&NmSenate, &tokens).unwrap();
        assert_eq!(
            extract.names_by_category.get(&VoteCategory::No),
            Some(&vec!["Smith".to_string()])
        );
    }

    #[test]
    fn rows_outside_the_band_are_ignored() {
        let tokens = vec![
            token("SENATE VOTE SHEET", 5, 10, 200),
            token("YES", 20, 100, 30),
            token("NO", 20, 140, 30),
            token("Smith", 50, 80, 30),
            token("X", 50, 115, 10),
            token("TOTAL", 100, 80, 40),
            token("CERTIFIED BELOW THE TABLE", 150, 80, 200),
        ];
        let extract = reconstruct_grid(&NmSenate, &tokens).unwrap();
        let total: usize = extract.names_by_category.values().map(Vec::len).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn every_in_band_pair_is_assigned() {
        // Two panes per row, three rows: all six ballots come out.
        let mut tokens = vec![
            token("YES", 20, 100, 30),
            token("NO", 20, 240, 30),
        ];
        for (i, top) in [50, 60, 70].into_iter().enumerate() {
            tokens.push(token(&format!("Left{i}"), top, 60, 30));
            tokens.push(token("X", top, 115, 10));
            tokens.push(token(&format!("Right{i}"), top, 200, 30));
            tokens.push(token("X", top, 255, 10));
        }
        tokens.push(token("TOTAL", 100, 60, 40));

        let extract = reconstruct_grid(&NmSenate, &tokens).unwrap();
        let total: usize = extract.names_by_category.values().map(Vec::len).sum();
        assert_eq!(total, 6);
        assert_eq!(
            extract.names_by_category[&VoteCategory::Yes],
            vec!["Left0", "Left1", "Left2"]
        );
        assert_eq!(
            extract.names_by_category[&VoteCategory::No],
            vec!["Right0", "Right1", "Right2"]
        );
    }

    #[test]
    fn totals_row_is_parsed_positionally_not_as_ballots() {
        let tokens = vec![
            token("YES", 20, 100, 30),
            token("NO", 20, 140, 30),
            token("Smith", 50, 80, 30),
            token("X", 50, 115, 10),
            token("TOTAL", 100, 40, 30),
            token("1", 100, 120, 10),
            token("0", 100, 160, 10),
        ];
        let extract = reconstruct_grid(&NmSenate, &tokens).unwrap();
        assert_eq!(
            extract.table_totals,
            Some(BTreeMap::from([
                (VoteCategory::Yes, 1),
                (VoteCategory::No, 0),
            ]))
        );
        let total: usize = extract.names_by_category.values().map(Vec::len).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn house_totals_row_counts_come_from_label_cells() {
        let tokens = vec![
            token("YEA", 20, 100, 30),
            token("NAY", 20, 200, 30),
            token("Smith", 50, 80, 30),
            token("X", 50, 120, 10),
            token("YEAS: 1", 90, 100, 30),
            token("NAYS: 0", 90, 200, 30),
            token("CERTIFIED CORRECT", 120, 40, 100),
        ];
        let extract = reconstruct_grid(&NmHouse, &tokens).unwrap();
        assert_eq!(
            extract.table_totals,
            Some(BTreeMap::from([
                (VoteCategory::Yes, 1),
                (VoteCategory::No, 0),
            ]))
        );
    }

    #[test]
    fn date_marker_is_captured() {
        let tokens = vec![
            token("03/01/2016", 10, 300, 60),
            token("YES", 20, 100, 30),
            token("NO", 20, 140, 30),
            token("Smith", 50, 80, 30),
            token("X", 50, 115, 10),
            token("TOTAL", 100, 80, 40),
        ];
        let extract = reconstruct_grid(&NmSenate, &tokens).unwrap();
        assert_eq!(extract.date, NaiveDate::from_ymd_opt(2016, 3, 1));
    }

    #[test]
    fn missing_headers_are_a_layout_rejection() {
        let tokens = vec![token("Smith", 50, 80, 30), token("TOTAL", 100, 80, 40)];
        assert!(matches!(
            reconstruct_grid(&NmSenate, &tokens),
            Err(ReconstructError::LayoutUnrecognized(_))
        ));
    }

    #[test]
    fn missing_terminator_is_a_layout_rejection() {
        let tokens = vec![
            token("YES", 20, 100, 30),
            token("Smith", 50, 80, 30),
            token("X", 50, 115, 10),
        ];
        assert!(matches!(
            reconstruct_grid(&NmSenate, &tokens),
            Err(ReconstructError::LayoutUnrecognized(_))
        ));
    }
}
