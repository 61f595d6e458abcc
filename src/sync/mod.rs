pub mod api;
pub mod requests;
pub mod sync_engine;

pub use api::{ApiError, HttpSchedulingClient, SchedulingApi};
pub use requests::{FetchMessage, FetchOutcome, Request, RequestKind, RequestTicket, RequestTracker};
pub use sync_engine::{AppointmentDetails, SyncEngine, SyncError};
