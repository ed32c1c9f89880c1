//! Jobscout engine: HTTP gateway, event-stream plumbing and the controller that runs core effects.
mod alert;
mod controller;
mod endpoints;
mod gateway;
mod render;
mod sse;
mod status;
mod stream;

pub use alert::{AlertPanel, AlertSurface};
pub use controller::{ControllerHandle, StreamController, Surfaces};
pub use endpoints::{EndpointError, Endpoints, DEFAULT_CHECK_PATH, DEFAULT_STREAM_PATH};
pub use gateway::{GatewayError, GatewaySettings, RequestGateway, RequestOptions, ReqwestGateway};
pub use render::{JobList, JobRenderer, ListRenderer};
pub use sse::{SseDecoder, SseEvent};
pub use status::{StatusBoard, StatusSurface};
pub use stream::{Connection, Inbox, ReqwestConnector, StreamConnector, StreamError, StreamSettings};
