pub mod account;
pub mod auth;
pub mod channel;
pub mod config;
pub mod errors;
pub mod hls;
pub mod mediainfo;
pub mod resolver;

pub use account::Credentials;
pub use auth::{AuthSession, UserAssertion};
pub use channel::{Channel, ChannelAddress};
pub use config::Endpoints;
pub use errors::ResolverError;
pub use hls::HlsVariant;
pub use mediainfo::Delivery;
pub use resolver::StreamResolver;
