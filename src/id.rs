//! ID generation utilities
//!
//! Session identifiers correlate one gateway call with the agent runtime's
//! conversational context.

use rand::Rng;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of each random component of a session ID
const RANDOM_SEGMENT_LEN: usize = 13;

/// Get current timestamp in milliseconds since Unix epoch
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Encode a number in lowercase base36
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

fn random_segment<R: Rng>(rng: &mut R) -> String {
    (0..RANDOM_SEGMENT_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}

/// Generate a session ID for one agent invocation
///
/// Format: `session-{timestamp_base36}-{random13}-{random13}`
/// Example: `session-m2x8k1qz-4f9a0c2kd81bq-z0p3n7s1v5w2e`
///
/// Always longer than the 33 characters the agent runtime requires.
pub fn generate_session_id() -> String {
    let mut rng = rand::rng();
    format!(
        "session-{}-{}-{}",
        to_base36(now_ms()),
        random_segment(&mut rng),
        random_segment(&mut rng)
    )
}
