pub mod memory;

#[cfg(feature = "sns")]
pub mod sns;

#[cfg(feature = "sqs")]
pub mod sqs;

pub use memory::MemoryPublisher;

#[cfg(feature = "sns")]
pub use sns::SnsPublisher;

#[cfg(feature = "sqs")]
pub use sqs::SqsPublisher;

/// Message attribute carrying the retention hint, in seconds.
pub const TTL_ATTRIBUTE: &str = "TTL";
pub const TTL_DATA_TYPE: &str = "Number";
