//! Assertions for exercising a [`MessageHandler`] directly in tests.

use crate::{
    handler::{MessageHandler, ValidationResult},
    message::OutboundMessage,
};

/// Asserts that `handler` judges `message` as `expected`.
pub async fn must_validate_message_result<H: MessageHandler>(
    handler: &H,
    message: &H::Message,
    expected: ValidationResult,
) {
    let result = handler.validate(message).await;
    assert_eq!(
        result, expected,
        "unexpected validation result for {message:?}"
    );
}

/// Validates `message`, asserts it is accepted, handles it and returns the
/// messages the handler produced.
pub async fn must_handle_message<H: MessageHandler>(
    handler: &H,
    message: H::Message,
) -> Vec<OutboundMessage> {
    must_validate_message_result(handler, &message, ValidationResult::Accept).await;
    match handler.handle(message).await {
        Ok(outbound) => outbound,
        Err(error) => panic!("handling accepted message failed: {error}"),
    }
}
