//! Placement of outbound phone calls whose audio is bridged to a voice agent.
//!
//! Each provider client turns a [`call::CallRequest`] into exactly one HTTP
//! request and classifies the answer into a [`call::CallResult`].

pub mod call;
pub mod error;
pub mod stream_url;
pub mod telnyx;
pub mod transport;
pub mod twilio;
pub mod twiml;

pub use call::{CallOutcome, CallPlacer, CallRequest, CallResult};
pub use error::CallError;
pub use stream_url::{StreamScheme, StreamUrl};
