pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::Principal;
pub use claims::SignedToken;
pub use claims::TokenClaims;
pub use claims::TokenClass;
pub use claims::TokenPair;
pub use codec::TokenCodec;
pub use errors::DecodeError;
pub use errors::EncodeError;
