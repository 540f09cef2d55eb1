use marketpipe_rs::concurrency::SpscRingBuffer;
use std::thread;

#[test]
fn pop_on_an_empty_buffer_returns_none() {
    let (_, mut consumer) = SpscRingBuffer::<i32, 128>::new().split();
    let mut items = [0; 128];

    assert_eq!(None, consumer.pop());
    assert_eq!(0, consumer.pop_many(&mut items));
}

#[test]
fn push_then_pop_one_by_one() {
    let (mut producer, mut consumer) = SpscRingBuffer::<i32, 128>::new().split();

    assert!(producer.push(1));
    assert!(producer.push(2));
    assert!(producer.push(3));

    assert_eq!(Some(1), consumer.pop());
    assert_eq!(Some(2), consumer.pop());
    assert_eq!(Some(3), consumer.pop());
    assert_eq!(None, consumer.pop());
}

#[test]
fn pop_many_drains_in_fifo_order() {
    let (mut producer, mut consumer) = SpscRingBuffer::<i32, 128>::new().split();
    let mut items = [0; 1000];

    assert!(producer.push(1));
    assert!(producer.push(2));
    assert!(producer.push(3));

    assert_eq!(3, consumer.pop_many(&mut items));
    assert_eq!([1, 2, 3], items[..3]);
    assert_eq!(0, consumer.pop_many(&mut items));
}

#[test]
fn pop_many_respects_the_output_length() {
    let (mut producer, mut consumer) = SpscRingBuffer::<i32, 128>::new().split();
    let mut items = [0; 2];

    for i in 0..5 {
        assert!(producer.push(i));
    }

    assert_eq!(2, consumer.pop_many(&mut items));
    assert_eq!([0, 1], items);
    assert_eq!(2, consumer.pop_many(&mut items));
    assert_eq!([2, 3], items);
    assert_eq!(1, consumer.pop_many(&mut items));
    assert_eq!(4, items[0]);
}

#[test]
fn buffer_holds_exactly_capacity_minus_one_items() {
    let (mut producer, mut consumer) = SpscRingBuffer::<i32, 128>::new().split();
    assert_eq!(127, producer.capacity());

    for i in 0..127 {
        assert!(producer.push(i));
    }
    assert!(!producer.push(999));

    for i in 0..127 {
        assert_eq!(Some(i), consumer.pop());
    }
    assert_eq!(None, consumer.pop());
}

#[test]
fn pop_many_is_correct_across_the_wrap_point() {
    let (mut producer, mut consumer) = SpscRingBuffer::<i32, 128>::new().split();
    let mut items = [0; 9999];

    // Walk the indices close to the end of the backing storage.
    for i in 1..=127 {
        assert!(producer.push(i));
        assert_eq!(Some(i), consumer.pop());
    }

    // Fill the buffer so the occupied region crosses the wrap point.
    for i in 0..127 {
        assert!(producer.push(i));
    }
    assert!(!producer.push(999));

    assert_eq!(127, consumer.pop_many(&mut items));
    assert_eq!(None, consumer.pop());

    for (i, item) in items[..127].iter().enumerate() {
        assert_eq!(i as i32, *item);
    }
}

#[test]
fn concurrent_stress_pop() {
    let (mut producer, mut consumer) = SpscRingBuffer::<i32, 64>::new().split();

    let writer = thread::spawn(move || {
        for i in 0..10_000 {
            while !producer.push(i) {}
        }
    });

    let mut read_count = 0;
    while read_count < 10_000 {
        if let Some(value) = consumer.pop() {
            assert_eq!(read_count, value);
            read_count += 1;
        }
    }

    writer.join().unwrap();
    assert_eq!(10_000, read_count);
}

#[test]
fn concurrent_stress_pop_many() {
    let (mut producer, mut consumer) = SpscRingBuffer::<i32, 64>::new().split();

    let writer = thread::spawn(move || {
        for i in 0..10_000 {
            while !producer.push(i) {}
        }
    });

    let mut values = [0; 10];
    let mut read_count = 0;
    while read_count < 10_000 {
        let amount_popped = consumer.pop_many(&mut values);
        for value in &values[..amount_popped] {
            assert_eq!(read_count, *value);
            read_count += 1;
        }
    }

    writer.join().unwrap();
    assert_eq!(10_000, read_count);
}
