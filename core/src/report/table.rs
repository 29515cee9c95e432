//! Sorting, grouping and baseline ratios for parsed result rows.

use super::parse::ResultRow;

/// Ratios of a row's statistics to its group's baseline row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratios {
    pub run_m: f64,
    pub min_m: f64,
    pub max_m: f64,
    pub mean_m: f64,
    pub med_m: f64,
}

impl Ratios {
    fn against(row: &ResultRow, base: &ResultRow) -> Self {
        Self {
            run_m: row.runs as f64 / base.runs as f64,
            min_m: row.minimum / base.minimum,
            max_m: row.maximum / base.maximum,
            mean_m: row.mean / base.mean,
            med_m: row.median / base.median,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRow {
    pub row: ResultRow,
    pub ratios: Ratios,
}

/// Rows sharing one benchmark key, baseline first.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    rows: Vec<EnrichedRow>,
}

impl ComparisonTable {
    /// Computes ratios for a non-empty group of rows sharing a key.
    ///
    /// With `baseline` set and present in the group, the first row carrying
    /// that label moves to the front; otherwise the group's first row is the
    /// baseline. The relative order of the remaining rows is kept.
    pub fn enrich(mut group: Vec<ResultRow>, baseline: Option<&str>) -> Self {
        assert!(!group.is_empty(), "comparison table needs at least one row");
        if let Some(label) = baseline
            && let Some(pos) = group.iter().position(|row| row.desc == label)
            && pos > 0
        {
            let row = group.remove(pos);
            group.insert(0, row);
        }

        let base = group[0].clone();
        let rows = group
            .into_iter()
            .map(|row| {
                let ratios = Ratios::against(&row, &base);
                EnrichedRow { row, ratios }
            })
            .collect();
        Self { rows }
    }

    pub fn key(&self) -> &str {
        &self.rows[0].row.key
    }

    pub fn baseline(&self) -> &EnrichedRow {
        &self.rows[0]
    }

    pub fn rows(&self) -> &[EnrichedRow] {
        &self.rows
    }
}

/// Stable ascending sort by `key`, then `sys`, then `desc` (byte order).
pub fn sort_rows(rows: &mut [ResultRow]) {
    rows.sort_by(|a, b| {
        a.key
            .cmp(&b.key)
            .then_with(|| a.sys.cmp(&b.sys))
            .then_with(|| a.desc.cmp(&b.desc))
    });
}

/// Splits sorted rows into contiguous runs sharing the same key.
pub fn group_by_key(rows: Vec<ResultRow>) -> Vec<Vec<ResultRow>> {
    let mut groups: Vec<Vec<ResultRow>> = Vec::new();
    for row in rows {
        match groups.last_mut() {
            Some(group) if group[0].key == row.key => group.push(row),
            _ => groups.push(vec![row]),
        }
    }
    groups
}

/// Sort, group and enrich in one pass.
pub fn build_tables(mut rows: Vec<ResultRow>, baseline: Option<&str>) -> Vec<ComparisonTable> {
    sort_rows(&mut rows);
    group_by_key(rows)
        .into_iter()
        .map(|group| ComparisonTable::enrich(group, baseline))
        .collect()
}
