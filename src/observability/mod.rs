pub mod logger;
pub mod tracing;

pub use logger::ClientLogger;
pub use self::tracing::init_tracing;
