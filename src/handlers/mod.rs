mod decryption_key_handler;

use decryption_key_handler::DecryptionKeyHandler;
use shutter_network::MessageRouter;
use shutter_repository::RepositoryManager;

/// Router with a handler for every inbound topic this node consumes.
pub(crate) fn build_message_router(
    instance_id: u64,
    repository: RepositoryManager,
) -> MessageRouter {
    let mut router = MessageRouter::new();
    router.register(DecryptionKeyHandler::new(instance_id, repository));
    router
}
