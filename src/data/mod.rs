pub mod codec;
pub mod json;

pub use codec::{DecodedEvent, EventCodec};
pub use json::{renderer, JsonRenderer};
