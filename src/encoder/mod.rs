/// Tabular encoding of in-memory records.
///
/// # Module Architecture
///
/// Encoding happens in four steps:
///
/// 1. **Column index**: for every requested column, the values found across the
///    records are collected in record order. Records lacking the field add
///    nothing to that column.
///
/// 2. **Transforms**: a column found in no record is filled with the default
///    placeholder and its transform is never called. Otherwise the column's
///    transform, if any, runs on every present value. All invocations of one
///    column run concurrently; columns are handled one after the other.
///
/// 3. **Cell encoding**: objects and arrays are written as compact JSON with
///    sorted keys, strings verbatim, numbers in decimal, booleans as
///    `true`/`false` and null as an empty cell.
///
/// 4. **Assembly**: a header line, then one line per record, every line
///    followed by the line terminator.
///
/// Values are not quoted or escaped. A delimiter or line terminator inside a
/// value ends up in the output as is.
///
/// # Row alignment
///
/// With [`Alignment::Positional`] (the default), the k-th value found for a
/// column is written on row k. This only matches the record order when every
/// record carries every column. [`Alignment::PerRecord`] keeps each value on its
/// record's row and writes the default placeholder for records lacking the
/// field.
///
/// # Examples
///
/// ```
/// # futures::executor::block_on(async {
/// use serde_json::json;
/// use tabular_encoder::encoder::{Alignment, TabularEncoderBuilder};
/// use tabular_encoder::core::record::Records;
///
/// let records = Records::try_from(json!([
///     {"id": 1},
///     {"id": 2, "email": "b@test.com"}
/// ]))
/// .unwrap();
///
/// let positional = TabularEncoderBuilder::new()
///     .columns(["id", "email"])
///     .build();
/// assert_eq!(
///     positional.encode(records.clone()).await.unwrap(),
///     "id,email\n1,b@test.com\n2,\n"
/// );
///
/// let per_record = TabularEncoderBuilder::new()
///     .columns(["id", "email"])
///     .alignment(Alignment::PerRecord)
///     .build();
/// assert_eq!(
///     per_record.encode(records).await.unwrap(),
///     "id,email\n1,N/A\n2,b@test.com\n"
/// );
/// # });
/// ```
pub mod tabular_encoder;

mod grid;

// Re-export the main types for easier access
pub use tabular_encoder::{Alignment, TabularEncoder, TabularEncoderBuilder};
