pub mod mime;
pub mod transport;

pub use mime::{detect_mime_type, is_image};
pub use transport::{decode_image, encode_image, TransportError};
