pub mod monitor;
pub mod session;

pub use session::{HubSession, Notices, LIVE_NOTICE_CAPACITY};
