// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn short_text_is_one_chunk() {
    assert_eq!(chunk_message("hello", MESSAGE_LIMIT), vec!["hello"]);
}

#[test]
fn empty_text_has_no_chunks() {
    assert!(chunk_message("", MESSAGE_LIMIT).is_empty());
}

#[test]
fn exact_limit_is_one_chunk() {
    let text = "a".repeat(MESSAGE_LIMIT);
    assert_eq!(chunk_message(&text, MESSAGE_LIMIT).len(), 1);
}

#[test]
fn long_text_splits_in_order() {
    let text = format!("{}{}{}", "a".repeat(2000), "b".repeat(2000), "c".repeat(10));
    let chunks = chunk_message(&text, MESSAGE_LIMIT);
    assert_eq!(chunks.len(), 3);
    assert!(chunks[0].chars().all(|c| c == 'a'));
    assert!(chunks[1].chars().all(|c| c == 'b'));
    assert_eq!(chunks[2], "c".repeat(10));
    assert_eq!(chunks.concat(), text);
}

#[test]
fn counts_characters_not_bytes() {
    let text = "é".repeat(3);
    assert_eq!(chunk_message(&text, 2), vec!["éé", "é"]);
}

#[tokio::test]
async fn noop_accepts_everything() {
    assert!(NoOpNotifier::new().send("any", "text").await.is_ok());
}
