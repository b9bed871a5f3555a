pub mod gnews;
pub mod newsapi;

/// Result-size limit requested from every provider, per call.
pub const PAGE_SIZE: u32 = 10;
