/// Entries of the identity provider's discovery document.
pub mod provider;
