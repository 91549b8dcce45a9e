/// Input records and the tagged cell values written to the output.
pub mod record;

/// Column-major index of the requested fields.
pub mod column;

/// Caller-supplied per-column value transforms.
pub mod transform;
