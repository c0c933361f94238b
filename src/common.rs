use crate::Executor;
use std::collections::HashMap;
use std::sync::Arc;

pub(crate) use aniwatch_rs_internal::Request;

/// Helper trait for [`crate::AniWatch`] api results.
/// Must be implemented for every struct which is returned from an api action, so that it can
/// issue further requests on its own (e.g. [`crate::Anime::episodes`]).
#[doc(hidden)]
pub trait Request {
    /// Set a usable [`Executor`] instance to the struct if required
    fn __set_executor(&mut self, _: Arc<Executor>) {}
}

/// Implement [`Request`] for cases where only the request must be done without needing an
/// explicit result.
impl Request for () {}

impl Request for bool {}

impl<K, V> Request for HashMap<K, V> {}

impl Request for serde_json::Value {}

impl<T: Request> Request for Vec<T> {
    fn __set_executor(&mut self, executor: Arc<Executor>) {
        for item in self.iter_mut() {
            item.__set_executor(executor.clone())
        }
    }
}
