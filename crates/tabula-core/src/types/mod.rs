pub mod outcome;
pub mod timestamp;

pub use outcome::DeleteOutcome;
pub use timestamp::{decode_timestamp, encode_timestamp, unix_now, UnixTimestamp, TIMESTAMP_LEN};
