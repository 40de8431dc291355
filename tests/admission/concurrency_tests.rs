// tests/admission/concurrency_tests.rs

#[cfg(test)]
mod tests {
    use crate::fixtures::test_clock::TestClock;
    use gatelimit::{AdmissionConfig, AdmissionGate, BucketRegistry};
    use std::sync::{Arc, Barrier};
    use std::thread;

    fn shared_gate(config: AdmissionConfig) -> Arc<AdmissionGate<TestClock>> {
        // frozen clock: no refill can sneak extra tokens into the race
        let clock = TestClock::new(0.0);
        let registry = Arc::new(BucketRegistry::from_config(&config, 0).unwrap());
        Arc::new(AdmissionGate::with_registry(registry, clock))
    }

    #[test]
    fn last_token_is_granted_exactly_once() {
        // repeat the two-thread race; a lost update would eventually show up
        for _ in 0..100 {
            let config = AdmissionConfig::new().route("GET /user/:id", 1, 6);
            let gate = shared_gate(config);
            let barrier = Arc::new(Barrier::new(2));

            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let gate = Arc::clone(&gate);
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        gate.admit("GET /user/:id").unwrap().admitted
                    })
                })
                .collect();

            let admitted = handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .filter(|&was_admitted| was_admitted)
                .count();
            assert_eq!(admitted, 1);
        }
    }

    #[test]
    fn total_admissions_never_exceed_burst() {
        let config = AdmissionConfig::new().route("GET /user/:id", 10, 6);
        let gate = shared_gate(config);
        let barrier = Arc::new(Barrier::new(4));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let gate = Arc::clone(&gate);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let mut admitted = 0;
                    for _ in 0..25 {
                        if gate.admit("GET /user/:id").unwrap().admitted {
                            admitted += 1;
                        }
                    }
                    admitted
                })
            })
            .collect();

        let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn contention_on_one_route_leaves_others_correct() {
        let config = AdmissionConfig::new()
            .route("GET /hot", 5, 6)
            .route("GET /cold", 2, 6);
        let gate = shared_gate(config);
        let barrier = Arc::new(Barrier::new(3));

        let hot_handles: Vec<_> = (0..2)
            .map(|_| {
                let gate = Arc::clone(&gate);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    (0..20)
                        .filter(|_| gate.admit("GET /hot").unwrap().admitted)
                        .count()
                })
            })
            .collect();

        let cold_gate = Arc::clone(&gate);
        let cold_barrier = Arc::clone(&barrier);
        let cold = thread::spawn(move || {
            cold_barrier.wait();
            (0..20)
                .filter(|_| cold_gate.admit("GET /cold").unwrap().admitted)
                .count()
        });

        let hot_total: usize = hot_handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(hot_total, 5);
        assert_eq!(cold.join().unwrap(), 2);
    }
}
