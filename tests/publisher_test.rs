//! Concurrency tests for the frame publisher

use hand_actuator::publisher::FramePublisher;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
};

#[test]
fn test_reader_sees_monotonic_sequences() {
    let publisher = FramePublisher::new();
    let writer = publisher.clone();
    let done = Arc::new(AtomicBool::new(false));
    let writer_done = Arc::clone(&done);

    let handle = thread::spawn(move || {
        for frame in 1..=10_000u64 {
            let sequence = writer.publish(frame);
            assert_eq!(sequence, frame);
        }
        writer_done.store(true, Ordering::SeqCst);
    });

    let mut last = 0;
    while !done.load(Ordering::SeqCst) {
        if let Some((sequence, frame)) = publisher.read_with_sequence() {
            assert_eq!(sequence, frame);
            assert!(sequence >= last, "sequence went backwards: {sequence} < {last}");
            last = sequence;
        }
    }

    handle.join().unwrap();
    assert_eq!(publisher.read_with_sequence(), Some((10_000, 10_000)));
}

#[test]
fn test_slow_reader_only_gets_latest() {
    let publisher = FramePublisher::new();
    let writer = publisher.clone();

    thread::spawn(move || {
        for frame in 0..100u32 {
            writer.publish(vec![frame; 16]);
        }
    })
    .join()
    .unwrap();

    assert_eq!(publisher.read(), Some(vec![99; 16]));
    assert_eq!(publisher.sequence(), 100);
}

#[derive(Debug, PartialEq)]
struct Fragile(u32);

// Cloning frame 0 panics while the reader holds the slot lock
impl Clone for Fragile {
    fn clone(&self) -> Self {
        assert_ne!(self.0, 0, "clone failed");
        Self(self.0)
    }
}

#[test]
fn test_panicking_reader_leaves_slot_usable() {
    let publisher = FramePublisher::new();
    publisher.publish(Fragile(0));

    let reader = publisher.clone();
    let result = thread::spawn(move || reader.read()).join();
    assert!(result.is_err());

    publisher.publish(Fragile(3));
    assert_eq!(publisher.read(), Some(Fragile(3)));
    assert_eq!(publisher.sequence(), 2);
}

#[test]
fn test_many_readers() {
    let publisher = FramePublisher::new();
    publisher.publish(String::from("frame"));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let reader = publisher.clone();
            thread::spawn(move || reader.read())
        })
        .collect();

    for reader in readers {
        assert_eq!(reader.join().unwrap().as_deref(), Some("frame"));
    }
}
