// [tests/mirror/libs/core/wire-protocol/frame_codec.test.rs]
#[cfg(test)]
mod tests {
    use chrono::Utc;
    use iris_core_wire_protocol::{decode, encode, Frame, FrameBody, MessageType, TaskAssignPayload};
    use uuid::Uuid;

    #[test]
    fn task_assign_round_trips_with_subtask_and_task_ids_intact() {
        let frame = Frame::new(FrameBody::TaskAssign(TaskAssignPayload {
            subtask_id: Uuid::new_v4(),
            task_id: Uuid::new_v4(),
            enc_prompt: "base64-ciphertext".into(),
            timeout_s: 60,
            enable_streaming: false,
            files: None,
        }));

        let encoded = encode(&frame).unwrap();
        let decoded = decode(&encoded).unwrap();

        match (&frame.body, &decoded.body) {
            (FrameBody::TaskAssign(original), FrameBody::TaskAssign(round_tripped)) => {
                assert_eq!(original.subtask_id, round_tripped.subtask_id);
                assert_eq!(original.task_id, round_tripped.task_id);
            }
            _ => panic!("expected TaskAssign on both sides"),
        }
        assert_eq!(decoded.body.message_type(), MessageType::TaskAssign);
    }

    #[test]
    fn wire_tag_matches_the_documented_snake_case_names() {
        let frame = Frame { body: FrameBody::Heartbeat(iris_core_wire_protocol::HeartbeatPayload {
            current_load: 2,
            uptime_s: 120,
            sent_at: Utc::now(),
            tokens_per_second: Some(12.5),
        }), ts: Utc::now(), signature: None };

        let value: serde_json::Value = serde_json::from_str(&encode(&frame).unwrap()).unwrap();
        assert_eq!(value["type"], "heartbeat");
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(decode("not json").is_err());
    }
}
