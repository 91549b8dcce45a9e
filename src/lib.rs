#![cfg_attr(docsrs, feature(doc_cfg))]
//#![warn(missing_docs)]

/*!
 # Tabular Encoder

 Turns in-memory structured records (JSON objects, possibly nested) into flat
 delimited text: a header line, then one line per record.

 ## Core Concepts

- **Record:** a JSON object mapping field names to values. Nested objects and
  arrays are written as compact JSON in a single cell.
- **Column:** a requested top-level field. The column list fixes both the
  header and the order of the cells on each line.
- **Transform:** a per-column function, synchronous or asynchronous, that maps a
  raw value to the value written out.
- **Default placeholder:** the text written for a column that no record carries
  (`N/A` unless configured).

 ## Features

| **Feature**   | **Description**                                               |
|---------------|---------------------------------------------------------------|
| blocking      | Enables `TabularEncoder::encode_blocking` on a private tokio runtime |
| full          | Enables all available features                                |

 ## Getting Started

```rust
# futures::executor::block_on(async {
use serde_json::json;
use tabular_encoder::{EncodeError, Records, TabularEncoderBuilder};

let records = Records::try_from(json!([
    {"name": "John", "age": 30, "contact": {"email": "test@test.com", "phone": "1234567890"}},
    {"name": "John", "age": 30, "contact": {"email": "test@test.com", "phone": "1234567890"}}
]))?;

let encoder = TabularEncoderBuilder::new()
    .columns(["name", "age", "contact", "hobbies"])
    .default_value("<empty>")
    .transform("name", |name| json!(name.as_str().unwrap_or_default().to_uppercase()))
    .build();

let csv = encoder.encode(records).await?;

assert_eq!(
    csv,
    "name,age,contact,hobbies\n\
     JOHN,30,{\"email\":\"test@test.com\",\"phone\":\"1234567890\"},<empty>\n\
     JOHN,30,{\"email\":\"test@test.com\",\"phone\":\"1234567890\"},<empty>\n"
);
# Ok::<(), EncodeError>(())
# }).unwrap();
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Records, column index and transforms
pub mod core;

/// Error types for encoding
pub mod error;

#[doc(inline)]
pub use error::*;

/// The tabular encoder and its builder
pub mod encoder;

#[doc(inline)]
pub use crate::core::record::{Record, Records};

#[doc(inline)]
pub use encoder::{Alignment, TabularEncoder, TabularEncoderBuilder};
