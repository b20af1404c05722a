#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn buffer_handler_captures_lines() {
    let handler = buffer_handler();
    handler.println("hello");
    handler.println("world");
    assert_eq!(handler.get_output(), "hello\nworld\n");
}

#[test]
fn buffer_handler_clear_empties_buffer() {
    let handler = buffer_handler();
    handler.println("hello");
    handler.clear();
    assert!(handler.get_output().is_empty());
}

#[test]
fn silent_and_stdout_capture_nothing() {
    let silent = silent_handler();
    silent.println("dropped");
    assert_eq!(silent.get_output(), "");
    assert_eq!(stdout_handler().get_output(), "");
}

#[test]
fn buffer_handler_is_thread_safe() {
    use std::thread;

    let handler = buffer_handler();
    let other = Arc::clone(&handler);
    let worker = thread::spawn(move || {
        for _ in 0..50 {
            other.println("a");
        }
    });
    for _ in 0..50 {
        handler.println("b");
    }
    worker.join().unwrap();
    assert_eq!(handler.get_output().lines().count(), 100);
}
