//! Request and response types for the trade API.

mod requests;
mod responses;

pub use requests::*;
pub use responses::*;
