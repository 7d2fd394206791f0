//! End-to-end recovery through the public pipeline.

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, Local, TimeZone as _};
use tempfile::TempDir;
use voxpack::prelude::*;

/// Clock pinned to a known second so output paths are exact.
#[derive(Debug, Clone, Copy)]
struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap()
    }
}

#[tokio::test]
async fn recovers_payload_behind_sidecar_indirection() {
    let temp = TempDir::new().unwrap();

    // Sidecar file carrying the real descriptor for the bytes 01 02 03 04.
    let payload = encode(&[0x01, 0x02, 0x03, 0x04]).unwrap();
    std::fs::write(
        temp.path().join("side.json"),
        format!(r#"{{"compressedData":"{payload}"}}"#),
    )
    .unwrap();

    // Response document referencing the sidecar from a serialized text
    // element, the way the tool server emits large payloads.
    let response = temp.path().join("response.json");
    std::fs::write(
        &response,
        r#"{"content":[{"text":"{\"compressedAudioInfo\":{\"compressedFilepath\":\"side.json\"}}"}]}"#,
    )
    .unwrap();

    let out = temp.path().join("out");
    let writer = AudioWriter::with_clock(FixedClock);
    let path = recover(&response, &out, &writer).await.unwrap();

    assert_eq!(path, out.join("decompressed_2024-03-01_12-30-45.mp3"));
    assert_eq!(std::fs::read(&path).unwrap(), [0x01, 0x02, 0x03, 0x04]);

    // Exactly one file was produced.
    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 1);
}

#[tokio::test]
async fn recovers_inline_payload_from_response_document() {
    let temp = TempDir::new().unwrap();
    let payload = encode(b"inline audio bytes").unwrap();

    let response = temp.path().join("response.json");
    std::fs::write(
        &response,
        format!(r#"{{"compressedAudio":{{"compressedData":"{payload}"}}}}"#),
    )
    .unwrap();

    let writer = AudioWriter::with_clock(FixedClock);
    let path = recover(&response, &temp.path().join("out"), &writer)
        .await
        .unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"inline audio bytes");
}

#[tokio::test]
async fn falls_back_to_raw_base64_when_input_is_not_json() {
    let temp = TempDir::new().unwrap();
    let payload = encode(b"raw-mode bytes").unwrap();

    // Not JSON: the whole file is the payload string, trailing newline and all.
    let input = temp.path().join("payload.txt");
    std::fs::write(&input, format!("{payload}\n")).unwrap();

    let writer = AudioWriter::with_clock(FixedClock);
    let path = recover(&input, &temp.path().join("out"), &writer)
        .await
        .unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"raw-mode bytes");
}

#[tokio::test]
async fn locate_failure_leaves_no_output_behind() {
    let temp = TempDir::new().unwrap();

    let response = temp.path().join("response.json");
    std::fs::write(&response, r#"{"content":[{"text":"no payload here"}]}"#).unwrap();

    let out = temp.path().join("out");
    let writer = AudioWriter::with_clock(FixedClock);
    let err = recover(&response, &out, &writer).await.unwrap_err();

    assert!(matches!(err, Error::Locate(LocateError::NotFound(_))));
    assert!(!out.exists());
}

#[tokio::test]
async fn decode_failure_leaves_no_output_behind() {
    let temp = TempDir::new().unwrap();

    let input = temp.path().join("payload.txt");
    std::fs::write(&input, "definitely not base64 ***").unwrap();

    let out = temp.path().join("out");
    let writer = AudioWriter::with_clock(FixedClock);
    let err = recover(&input, &out, &writer).await.unwrap_err();

    assert!(matches!(err, Error::Decode(DecodeError::Base64(_))));
    assert!(!out.exists());
}

#[tokio::test]
async fn compressed_file_descriptor_round_trips_through_recovery() {
    let temp = TempDir::new().unwrap();

    // Producer side: pack a clip the way the tool server does.
    let clip = temp.path().join("clip.mp3");
    std::fs::write(&clip, b"pretend mp3 frames").unwrap();
    let descriptor = compress_file(&clip).await.unwrap();

    // Consumer side: sidecar + response referencing it.
    std::fs::write(
        temp.path().join("side.json"),
        serde_json::to_string(&descriptor).unwrap(),
    )
    .unwrap();
    let response = temp.path().join("response.json");
    std::fs::write(
        &response,
        r#"{"content":[{"text":"{\"compressedAudioInfo\":{\"compressedFilepath\":\"side.json\"}}"}]}"#,
    )
    .unwrap();

    let writer = AudioWriter::with_clock(FixedClock);
    let path = recover(&response, &temp.path().join("out"), &writer)
        .await
        .unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"pretend mp3 frames");
}
