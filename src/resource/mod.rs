//! Custom resource layer for the build waiter
//!
//! - TriggerEvent / ResourceResponse wire types
//! - ResultSink trait and HTTP PUT implementation
//! - CustomResourceHandler tying the waiter to the sink

pub mod event;
pub mod handler;
pub mod sink;

pub use event::{RequestType, ResourceProperties, ResourceResponse, ResponseStatus, TriggerEvent};
pub use handler::{CustomResourceHandler, reject_event};
pub use sink::{HttpResultSink, ResultSink};
