use serde_json::{Value, json};

use crate::{DecryptionKey, NetworkError, OutboundMessage, P2PMessage};

fn to_json<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).expect("failed to serialize")
}

#[test]
fn decryption_key_wire_fields() {
    let message = DecryptionKey {
        instance_id: 42,
        eon: 7,
        epoch_id: vec![0x01, 0x02],
        key: vec![0xab],
    };

    assert_eq!(
        to_json(&message),
        json!({
            "instanceID": 42,
            "eon": 7,
            "epochID": "0102",
            "key": "ab",
        })
    );
}

#[test]
fn outbound_message_is_tagged_with_topic() {
    let message = DecryptionKey {
        instance_id: 1,
        eon: 0,
        epoch_id: vec![0; 32],
        key: vec![1; 32],
    };
    let outbound = OutboundMessage::new(&message).expect("encodes");

    assert_eq!(outbound.topic, "decryptionKey");
    assert_eq!(
        DecryptionKey::decode(&outbound.payload).expect("decodes"),
        message
    );
}

#[test]
fn non_hex_key_fails_to_decode() {
    let payload = br#"{"instanceID":1,"eon":0,"epochID":"00","key":"zz"}"#;
    assert!(matches!(
        DecryptionKey::decode(payload),
        Err(NetworkError::Decode {
            topic: "decryptionKey",
            ..
        })
    ));
}
