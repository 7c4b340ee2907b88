//! Timestamp helpers.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as Unix millis.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_after_2020() {
        // 2020-01-01 in millis
        assert!(now_millis() > 1_577_836_800_000);
    }
}
