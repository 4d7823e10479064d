// Domain layer: card content, host sessions, and the ports the use cases depend on.

pub mod entities;
pub mod errors;
pub mod ports;

pub use entities::{HostSession, StoredImage, Term, TermInput};
pub use errors::{HostError, TermError, UploadError};
pub use ports::{Clock, ImageSink, SessionStore, TermStore};
