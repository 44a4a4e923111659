pub mod loader;
pub mod macros;
pub mod types;

pub use loader::ConfigLoader;
pub use macros::MacroResolver;
pub use types::{EnvConfig, LikConfig, NamespaceConfig, RequestConfig, ResponseOptions};
