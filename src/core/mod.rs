pub mod authorization_request;
pub mod claims;
pub mod metadata;
pub mod object;
pub mod scope;
pub mod version;
