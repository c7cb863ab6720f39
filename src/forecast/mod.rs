//! Forecasting on top of the sales store.
//!
//! Every query refits the trend from the store's current contents, so answers
//! always reflect the latest ingest.

pub mod engine;

pub use engine::*;
