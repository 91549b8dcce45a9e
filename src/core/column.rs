use serde_json::Value;

use super::record::Record;

/// A value found for a column, with the position of the record it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentValue {
    pub row: usize,
    pub value: Value,
}

/// What the encoder does with a column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    /// No record has the field: every row gets the default placeholder.
    Defaults,
    /// Values of the records that have the field, in record order.
    Present(Vec<PresentValue>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexedColumn {
    name: String,
    values: ColumnValues,
}

impl IndexedColumn {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    /// True when some, but not all, records carry the field.
    pub fn is_partial(&self, record_count: usize) -> bool {
        match &self.values {
            ColumnValues::Defaults => false,
            ColumnValues::Present(present) => present.len() < record_count,
        }
    }
}

/// Column-major view of the input: for each requested column, the values
/// found across the records.
///
/// Records lacking a field contribute nothing to that column, so a column can
/// hold fewer values than there are records.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnIndex {
    record_count: usize,
    columns: Vec<IndexedColumn>,
}

impl ColumnIndex {
    pub fn build(records: &[Record], columns: &[String]) -> Self {
        let columns = columns
            .iter()
            .map(|name| {
                let present: Vec<PresentValue> = records
                    .iter()
                    .enumerate()
                    .filter_map(|(row, record)| {
                        record.get(name).map(|value| PresentValue {
                            row,
                            value: value.clone(),
                        })
                    })
                    .collect();

                let values = if present.is_empty() {
                    ColumnValues::Defaults
                } else {
                    ColumnValues::Present(present)
                };

                IndexedColumn {
                    name: name.clone(),
                    values,
                }
            })
            .collect();

        ColumnIndex {
            record_count: records.len(),
            columns,
        }
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn columns(&self) -> &[IndexedColumn] {
        &self.columns
    }
}
