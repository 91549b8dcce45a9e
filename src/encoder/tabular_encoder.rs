use std::{convert::Infallible, future::Future};

use futures::{TryFutureExt, future::try_join_all};
use log::{debug, error, trace, warn};
use serde_json::Value;

use crate::{
    core::{
        column::{ColumnIndex, ColumnValues, PresentValue},
        record::{Cell, Records},
        transform::{AsyncFnTransform, FnTransform, Transform, Transforms},
    },
    error::{BoxError, EncodeError},
};

use super::grid::Grid;

/// Placeholder written when no record carries a column.
pub const DEFAULT_VALUE: &str = "N/A";

/// Field separator used unless configured otherwise.
pub const DEFAULT_DELIMITER: &str = ",";

/// Line terminator used unless configured otherwise.
pub const DEFAULT_EOL: &str = "\n";

/// How values of a column are matched to output rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// The k-th value found for a column goes to row k.
    ///
    /// When a record lacks the field, later values of that column move up one
    /// row and the trailing rows of the column are left empty.
    #[default]
    Positional,
    /// Every value stays on the row of the record it came from.
    ///
    /// A record lacking the field gets the default placeholder in that cell.
    PerRecord,
}

/// Converts records into delimited text.
///
/// Built with [`TabularEncoderBuilder`]; immutable once built and reusable
/// across calls.
#[derive(Debug, Clone)]
pub struct TabularEncoder {
    columns: Vec<String>,
    default_value: String,
    delimiter: String,
    eol: String,
    alignment: Alignment,
    transforms: Transforms,
}

impl TabularEncoder {
    /// Encodes `records` into a header line followed by one line per record.
    ///
    /// Transforms of a column all run concurrently and are awaited before the
    /// next column starts. The first failing transform aborts the call.
    ///
    /// # Errors
    ///
    /// A failing transform is returned as [`EncodeError::Transform`], naming
    /// the column. The error the transform produced is its `source`, untouched;
    /// [`EncodeError::into_transform_error`] hands it back for downcasting.
    ///
    /// # Examples
    ///
    /// ```
    /// # futures::executor::block_on(async {
    /// use serde_json::json;
    /// use tabular_encoder::{Records, TabularEncoderBuilder};
    ///
    /// let records = Records::try_from(json!([
    ///     {"name": "John", "age": 30},
    ///     {"name": "Jane", "age": 31}
    /// ]))
    /// .unwrap();
    ///
    /// let encoder = TabularEncoderBuilder::new()
    ///     .columns(["name", "age"])
    ///     .build();
    ///
    /// let text = encoder.encode(records).await.unwrap();
    /// assert_eq!(text, "name,age\nJohn,30\nJane,31\n");
    /// # });
    /// ```
    pub async fn encode(&self, records: impl Into<Records>) -> Result<String, EncodeError> {
        let records: Records = records.into();
        let records = records.as_slice();

        debug!(
            "Start encoding {} records into {} columns",
            records.len(),
            self.columns.len()
        );

        let index = ColumnIndex::build(records, &self.columns);
        let mut grid = Grid::new(index.record_count(), self.columns.len());

        for (position, column) in index.columns().iter().enumerate() {
            trace!("Encoding column `{}`", column.name());

            match column.values() {
                ColumnValues::Defaults => {
                    debug!(
                        "Column `{}` is absent from every record, using `{}`",
                        column.name(),
                        self.default_value
                    );
                    grid.fill_column(position, &self.default_value);
                }
                ColumnValues::Present(present) => {
                    if self.alignment == Alignment::Positional
                        && column.is_partial(index.record_count())
                    {
                        warn!(
                            "Column `{}` is missing from {} of {} records, its values shift to the first rows",
                            column.name(),
                            index.record_count() - present.len(),
                            index.record_count()
                        );
                    }

                    let cells = self.transform_column(column.name(), present).await?;

                    for (slot, (found, cell)) in present.iter().zip(cells).enumerate() {
                        let row = match self.alignment {
                            Alignment::Positional => slot,
                            Alignment::PerRecord => found.row,
                        };
                        grid.place(row, position, cell.render());
                    }
                }
            }
        }

        let vacant = match self.alignment {
            Alignment::Positional => "",
            Alignment::PerRecord => self.default_value.as_str(),
        };
        let text = grid.render(&self.columns, &self.delimiter, &self.eol, vacant);

        debug!("End encoding: {} bytes", text.len());

        Ok(text)
    }

    /// Runs [`TabularEncoder::encode`] to completion on a fresh current-thread
    /// runtime.
    ///
    /// # Panics
    /// Panics when called from within an asynchronous runtime.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use tabular_encoder::{Records, TabularEncoderBuilder};
    ///
    /// let records = Records::try_from(json!({"id": 7})).unwrap();
    /// let encoder = TabularEncoderBuilder::new()
    ///     .columns(["id", "label"])
    ///     .transform("id", |id| json!(id.as_i64().unwrap_or_default() * 10))
    ///     .build();
    ///
    /// assert_eq!(encoder.encode_blocking(records).unwrap(), "id,label\n70,N/A\n");
    /// ```
    #[cfg(feature = "blocking")]
    pub fn encode_blocking(&self, records: impl Into<Records>) -> Result<String, EncodeError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.encode(records))
    }

    async fn transform_column(
        &self,
        column: &str,
        present: &[PresentValue],
    ) -> Result<Vec<Cell>, EncodeError> {
        let Some(transform) = self.transforms.get(column) else {
            return Ok(present
                .iter()
                .map(|found| Cell::from(found.value.clone()))
                .collect());
        };

        let pending = present.iter().map(|found| {
            let raw = found.value.clone();
            transform.apply(found.value.clone()).map_ok(move |value| {
                // null keeps the raw value
                if value.is_null() { raw } else { value }
            })
        });

        let values = try_join_all(pending).await.map_err(|source| {
            error!("Transform for column `{}` failed: {}", column, source);
            EncodeError::Transform {
                column: column.to_string(),
                source,
            }
        })?;

        Ok(values.into_iter().map(Cell::from).collect())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn eol(&self) -> &str {
        &self.eol
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }
}

/// Builder for [`TabularEncoder`].
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tabular_encoder::{Alignment, TabularEncoderBuilder};
///
/// let encoder = TabularEncoderBuilder::new()
///     .columns(["name", "contact"])
///     .default_value("<empty>")
///     .delimiter(";")
///     .eol("\r\n")
///     .alignment(Alignment::PerRecord)
///     .transform("name", |name| json!(name.as_str().unwrap_or_default().to_uppercase()))
///     .build();
///
/// assert_eq!(encoder.delimiter(), ";");
/// assert_eq!(encoder.default_value(), "<empty>");
/// ```
#[derive(Debug)]
pub struct TabularEncoderBuilder {
    columns: Vec<String>,
    default_value: String,
    delimiter: String,
    eol: String,
    alignment: Alignment,
    transforms: Transforms,
}

impl Default for TabularEncoderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TabularEncoderBuilder {
    pub fn new() -> TabularEncoderBuilder {
        TabularEncoderBuilder {
            columns: Vec::new(),
            default_value: DEFAULT_VALUE.to_string(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            eol: DEFAULT_EOL.to_string(),
            alignment: Alignment::default(),
            transforms: Transforms::new(),
        }
    }

    /// Sets the output columns, in order. Duplicates are kept.
    pub fn columns<I, S>(mut self, columns: I) -> TabularEncoderBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Appends one column.
    pub fn column(mut self, column: impl Into<String>) -> TabularEncoderBuilder {
        self.columns.push(column.into());
        self
    }

    pub fn default_value(mut self, default_value: impl Into<String>) -> TabularEncoderBuilder {
        self.default_value = default_value.into();
        self
    }

    pub fn delimiter(mut self, delimiter: impl Into<String>) -> TabularEncoderBuilder {
        self.delimiter = delimiter.into();
        self
    }

    pub fn eol(mut self, eol: impl Into<String>) -> TabularEncoderBuilder {
        self.eol = eol.into();
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> TabularEncoderBuilder {
        self.alignment = alignment;
        self
    }

    /// Sets a synchronous transform for `column`.
    ///
    /// Returning `Value::Null` keeps the raw value.
    pub fn transform<F>(self, column: impl Into<String>, transform: F) -> TabularEncoderBuilder
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.transform_with(
            column,
            FnTransform(move |value| Ok::<Value, Infallible>(transform(value))),
        )
    }

    /// Sets a synchronous transform for `column` that may fail.
    pub fn try_transform<F, E>(self, column: impl Into<String>, transform: F) -> TabularEncoderBuilder
    where
        F: Fn(Value) -> Result<Value, E> + Send + Sync + 'static,
        E: Into<BoxError> + 'static,
    {
        self.transform_with(column, FnTransform(transform))
    }

    /// Sets an asynchronous transform for `column`.
    ///
    /// ```
    /// # futures::executor::block_on(async {
    /// use serde_json::{Value, json};
    /// use tabular_encoder::{Records, TabularEncoderBuilder};
    ///
    /// let encoder = TabularEncoderBuilder::new()
    ///     .columns(["id"])
    ///     .async_transform("id", |id: Value| async move {
    ///         Ok::<_, std::io::Error>(json!(format!("#{}", id)))
    ///     })
    ///     .build();
    ///
    /// let records = Records::try_from(json!([{"id": 1}, {"id": 2}])).unwrap();
    /// assert_eq!(encoder.encode(records).await.unwrap(), "id\n#1\n#2\n");
    /// # });
    /// ```
    pub fn async_transform<F, Fut, E>(
        self,
        column: impl Into<String>,
        transform: F,
    ) -> TabularEncoderBuilder
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        self.transform_with(column, AsyncFnTransform(transform))
    }

    /// Sets any [`Transform`] implementation for `column`, replacing the
    /// previous one.
    pub fn transform_with<T>(mut self, column: impl Into<String>, transform: T) -> TabularEncoderBuilder
    where
        T: Transform + 'static,
    {
        self.transforms.insert(column, transform);
        self
    }

    pub fn build(self) -> TabularEncoder {
        TabularEncoder {
            columns: self.columns,
            default_value: self.default_value,
            delimiter: self.delimiter,
            eol: self.eol,
            alignment: self.alignment,
            transforms: self.transforms,
        }
    }
}
