pub mod body;
pub mod client;
pub mod request;
pub mod response;
pub mod tls;

// Re-export commonly used types for convenient access
pub use body::{BodyEncoder, EncodedBody};
pub use client::{ClientSettings, HttpClient};
pub use request::TransportBuilder;
pub use response::Response;
pub use tls::load_client_identity;
