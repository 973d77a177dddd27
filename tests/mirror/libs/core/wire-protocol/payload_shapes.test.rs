// [tests/mirror/libs/core/wire-protocol/payload_shapes.test.rs]
#[cfg(test)]
mod tests {
    use chrono::Utc;
    use iris_core_wire_protocol::{Frame, FrameBody, RegisterAckPayload, TaskStreamPayload};
    use uuid::Uuid;

    #[test]
    fn task_stream_carries_a_monotonic_chunk_index_field() {
        let frame = Frame::new(FrameBody::TaskStream(TaskStreamPayload {
            subtask_id: Uuid::new_v4(),
            task_id: Uuid::new_v4(),
            enc_chunk: "ciphertext".into(),
            chunk_index: 3,
        }));

        let value = serde_json::to_value(&frame).unwrap();
        assert_eq!(value["payload"]["chunk_index"], 3);
    }

    #[test]
    fn register_ack_omits_optional_fields_when_absent() {
        let frame = Frame { body: FrameBody::RegisterAck(RegisterAckPayload {
            success: false,
            coordinator_public_key: None,
            message: Some("account key rejected".into()),
        }), ts: Utc::now(), signature: None };

        let value = serde_json::to_value(&frame).unwrap();
        assert_eq!(value["payload"]["success"], false);
        assert_eq!(value["payload"]["message"], "account key rejected");
        assert!(value.get("signature").is_none());
    }
}
