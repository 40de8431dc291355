// tests/admission/bucket_tests.rs

#[cfg(test)]
mod tests {
    use gatelimit::TokenBucket;

    const SECOND: u64 = 1_000_000_000;

    #[test]
    fn snapshot_reflects_current_state() {
        let mut bucket = TokenBucket::new(10, 6, 0);
        bucket.consume();
        bucket.consume();

        let snapshot = bucket.snapshot();
        assert_eq!(snapshot.tokens, 8);
        assert_eq!(snapshot.burst, 10);
        assert_eq!(snapshot.sustained, 6);
        assert_eq!(snapshot.last_refill_nanos, 0);
    }

    #[test]
    fn snapshot_serializes_for_introspection() {
        let bucket = TokenBucket::new(3, 12, 5 * SECOND);
        let json = serde_json::to_value(bucket.snapshot()).unwrap();

        assert_eq!(json["tokens"], 3);
        assert_eq!(json["burst"], 3);
        assert_eq!(json["sustained"], 12);
        assert_eq!(json["last_refill_nanos"], 5 * SECOND);
    }

    #[test]
    fn snapshot_is_detached_from_the_bucket() {
        let mut bucket = TokenBucket::new(5, 6, 0);
        let before = bucket.snapshot();

        assert!(bucket.consume());

        // the earlier view is a copy, not a handle
        assert_eq!(before.tokens, 5);
        assert_eq!(bucket.snapshot().tokens, 4);
    }

    #[test]
    fn interleaved_refill_and_consume_stay_within_bounds() {
        // burst 4, sustained 60/min: one token per second
        let mut bucket = TokenBucket::new(4, 60, 0);
        let mut now = 0;

        for _ in 0..50 {
            while bucket.consume() {}
            assert_eq!(bucket.tokens(), 0);

            now += 2 * SECOND + SECOND / 2; // 2.5s: two tokens plus carry
            bucket.refill(now);
            let tokens = bucket.tokens();
            assert!(tokens >= 2 && tokens <= 4, "tokens out of range: {tokens}");
        }
    }
}
