use std::{collections::HashMap, future::Future, sync::Arc};

use futures::{
    FutureExt, TryFutureExt,
    future::{self, BoxFuture},
};
use serde_json::Value;

use crate::error::BoxError;

/// Future produced by a [`Transform`].
pub type TransformFuture = BoxFuture<'static, Result<Value, BoxError>>;

/// Maps a raw field value to the value written for that column.
///
/// Invoked once per present occurrence of the field. Implementations may do
/// asynchronous work; the encoder awaits every invocation of a column before
/// moving to the next one.
pub trait Transform: Send + Sync {
    fn apply(&self, value: Value) -> TransformFuture;
}

/// Adapter for synchronous closures.
pub struct FnTransform<F>(pub F);

impl<F, E> Transform for FnTransform<F>
where
    F: Fn(Value) -> Result<Value, E> + Send + Sync,
    E: Into<BoxError>,
{
    fn apply(&self, value: Value) -> TransformFuture {
        future::ready((self.0)(value).map_err(Into::<BoxError>::into)).boxed()
    }
}

/// Adapter for closures returning a future.
pub struct AsyncFnTransform<F>(pub F);

impl<F, Fut, E> Transform for AsyncFnTransform<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, E>> + Send + 'static,
    E: Into<BoxError> + 'static,
{
    fn apply(&self, value: Value) -> TransformFuture {
        (self.0)(value).map_err(Into::<BoxError>::into).boxed()
    }
}

/// Transforms keyed by column name, at most one per column.
#[derive(Clone, Default)]
pub struct Transforms {
    by_column: HashMap<String, Arc<dyn Transform>>,
}

impl Transforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `transform` for `column`, replacing any previous one.
    pub fn insert<T>(&mut self, column: impl Into<String>, transform: T)
    where
        T: Transform + 'static,
    {
        self.by_column.insert(column.into(), Arc::new(transform));
    }

    pub fn get(&self, column: &str) -> Option<&Arc<dyn Transform>> {
        self.by_column.get(column)
    }
}

impl std::fmt::Debug for Transforms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut columns: Vec<&String> = self.by_column.keys().collect();
        columns.sort();
        f.debug_struct("Transforms")
            .field("columns", &columns)
            .finish()
    }
}
