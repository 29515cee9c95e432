//! Console table and combined CSV rendering.

use crate::summary::form;

use super::table::{ComparisonTable, EnrichedRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Key,
    Sys,
    Desc,
    Runs,
    RunM,
    Minimum,
    MinM,
    Maximum,
    MaxM,
    Mean,
    MeanM,
    Median,
    MedM,
}

/// Columns of the combined report file, in file order.
pub const FULL_COLUMNS: [Column; 13] = [
    Column::Key,
    Column::Sys,
    Column::Desc,
    Column::Runs,
    Column::RunM,
    Column::Minimum,
    Column::MinM,
    Column::Maximum,
    Column::MaxM,
    Column::Mean,
    Column::MeanM,
    Column::Median,
    Column::MedM,
];

/// Columns of the concise console table.
pub const RATIO_COLUMNS: [Column; 8] = [
    Column::Key,
    Column::Sys,
    Column::Desc,
    Column::RunM,
    Column::MinM,
    Column::MaxM,
    Column::MeanM,
    Column::MedM,
];

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::Key => "key",
            Column::Sys => "sys",
            Column::Desc => "desc",
            Column::Runs => "runs",
            Column::RunM => "run_m",
            Column::Minimum => "minimum",
            Column::MinM => "min_m",
            Column::Maximum => "maximum",
            Column::MaxM => "max_m",
            Column::Mean => "mean",
            Column::MeanM => "mean_m",
            Column::Median => "median",
            Column::MedM => "med_m",
        }
    }

    pub fn cell(self, enriched: &EnrichedRow) -> String {
        let EnrichedRow { row, ratios } = enriched;
        match self {
            Column::Key => row.key.clone(),
            Column::Sys => row.sys.clone(),
            Column::Desc => row.desc.clone(),
            Column::Runs => row.runs.to_string(),
            Column::RunM => form(ratios.run_m),
            Column::Minimum => form(row.minimum),
            Column::MinM => form(ratios.min_m),
            Column::Maximum => form(row.maximum),
            Column::MaxM => form(ratios.max_m),
            Column::Mean => form(row.mean),
            Column::MeanM => form(ratios.mean_m),
            Column::Median => form(row.median),
            Column::MedM => form(ratios.med_m),
        }
    }
}

/// Printable width per column; zero widths disable padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths([usize; FULL_COLUMNS.len()]);

impl ColumnWidths {
    pub fn unpadded() -> Self {
        Self([0; FULL_COLUMNS.len()])
    }

    /// Widest cell per column across every table, headers included.
    pub fn measure(tables: &[ComparisonTable]) -> Self {
        let mut widths = [0usize; FULL_COLUMNS.len()];
        for column in FULL_COLUMNS {
            widths[column as usize] = column.name().len();
        }
        for row in tables.iter().flat_map(|t| t.rows()) {
            for column in FULL_COLUMNS {
                let w = &mut widths[column as usize];
                *w = (*w).max(column.cell(row).chars().count());
            }
        }
        Self(widths)
    }

    pub fn get(&self, column: Column) -> usize {
        self.0[column as usize]
    }
}

pub fn delimited_headings(widths: &ColumnWidths, delimiter: &str, columns: &[Column]) -> String {
    columns
        .iter()
        .map(|&c| format!("{:>width$}", c.name(), width = widths.get(c)))
        .collect::<Vec<_>>()
        .join(delimiter)
}

pub fn delimited_table(table: &ComparisonTable, widths: &ColumnWidths, delimiter: &str, columns: &[Column]) -> String {
    table
        .rows()
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|&c| format!("{:>width$}", c.cell(row), width = widths.get(c)))
                .collect::<Vec<_>>()
                .join(delimiter)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Right-aligned ratio table, a blank line before each group.
pub fn console_table(tables: &[ComparisonTable]) -> String {
    let widths = ColumnWidths::measure(tables);
    let mut out = delimited_headings(&widths, " ", &RATIO_COLUMNS);
    out.push('\n');
    for table in tables {
        out.push('\n');
        out.push_str(&delimited_table(table, &widths, " ", &RATIO_COLUMNS));
        out.push('\n');
    }
    out
}

/// Combined report file: unquoted header plus every group's rows.
pub fn full_csv(tables: &[ComparisonTable]) -> String {
    let widths = ColumnWidths::unpadded();
    let mut out = delimited_headings(&widths, ",", &FULL_COLUMNS);
    out.push('\n');
    for table in tables {
        out.push_str(&delimited_table(table, &widths, ",", &FULL_COLUMNS));
        out.push('\n');
    }
    out
}
