//! Application services built on top of the ports.

mod credentials;
mod gate;
mod posts;

pub use credentials::CredentialStore;
pub use gate::AuthGate;
pub use posts::PostService;
