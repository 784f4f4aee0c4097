// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn collect_concatenates_in_order() {
    let stream = ChunkStream::from_chunks(vec![Ok("a".into()), Ok("b".into()), Ok("c".into())]);
    assert_eq!(stream.collect().await.unwrap(), "abc");
}

#[tokio::test]
async fn collect_stops_at_first_error() {
    let stream = ChunkStream::from_chunks(vec![
        Ok("partial".into()),
        Err(AgentError::Failed("cut off".into())),
        Ok("never".into()),
    ]);
    assert_eq!(stream.collect().await.unwrap_err().to_string(), "cut off");
}

#[tokio::test]
async fn empty_stream_collects_to_empty_text() {
    let stream = ChunkStream::from_chunks(Vec::new());
    assert_eq!(stream.collect().await.unwrap(), "");
}

#[tokio::test]
async fn producer_sees_consumer_drop() {
    let (tx, stream) = ChunkStream::channel(1);
    drop(stream);
    assert!(tx.send(Ok("late".into())).await.is_err());
}
