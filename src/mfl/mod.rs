pub mod auth;
pub mod client;
pub mod models;
pub mod normalize;
pub mod resource;
pub mod transport;

pub use auth::{Credentials, SessionCookie};
pub use client::{Endpoints, MflClient, RawResponse};
pub use models::{Franchise, FranchiseMap, FranchiseScoring, LivePlayer, PlayerMap, PlayerRecord};
pub use normalize::parse_unix_timestamp;
pub use resource::{Resource, Week};
pub use transport::{GetRequest, HttpTransport, Transport};
