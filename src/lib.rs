//! Client for the MyFantasyLeague export API and the HTML trigger that
//! serves league and live-scoring pages from it.

pub mod config;
pub mod error;
pub mod mfl;
pub mod table;
pub mod trigger;

pub use error::{MflError, Result};
