pub mod access;
pub mod adapter;
pub mod error;
pub mod settings;

pub use access::AccessCredentials;
pub use adapter::{HomeboxAdapter, PageAdapter};
pub use error::BoxdockError;
pub use settings::Settings;
