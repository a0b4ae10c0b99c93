#![allow(clippy::unwrap_used)]

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use shutter_blockchain::{
    Address, AddressSet, AddressSetReader, BlockchainError, Bytes, ChainEvent, EventSource,
    EventSyncUpdate, MonitoredContracts, NewDecryptorConfig, NewKeyperConfig, Registration,
    SyncCursor,
};
use shutter_crypto::BlsSecretKey;
use shutter_repository::{
    DecryptorSetMemberEntry, EventSyncProgress, KeyperSetEntry, RepositoryManager,
    RepositoryManagerConfig, RepositoryScope,
};
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;

use super::{
    applier::EventApplier,
    error::SyncError,
    pipeline::{load_cursor, run_pipeline},
    reconciler::{ReconcileOutcome, reconcile_signature},
};

/// Address sets served from memory; unknown indices fail like an unreachable RPC.
#[derive(Default)]
struct StaticAddressSets {
    sets: HashMap<(AddressSet, u64), Vec<Address>>,
}

impl StaticAddressSets {
    fn with(mut self, set: AddressSet, index: u64, addresses: Vec<Address>) -> Self {
        self.sets.insert((set, index), addresses);
        self
    }
}

#[async_trait]
impl AddressSetReader for StaticAddressSets {
    async fn get_addresses_at_index(
        &self,
        set: AddressSet,
        index: u64,
    ) -> Result<Vec<Address>, BlockchainError> {
        self.sets
            .get(&(set, index))
            .cloned()
            .ok_or(BlockchainError::Timeout {
                operation: "getAddrs",
                timeout: Duration::from_secs(1),
            })
    }
}

/// Event source fed through a channel. `run` idles until cancelled unless it
/// was told to fail.
struct ChannelEventSource {
    receiver: Mutex<mpsc::UnboundedReceiver<EventSyncUpdate>>,
    fail_run: bool,
}

impl ChannelEventSource {
    fn new(fail_run: bool) -> (mpsc::UnboundedSender<EventSyncUpdate>, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let source = Self {
            receiver: Mutex::new(receiver),
            fail_run,
        };
        (sender, source)
    }
}

#[async_trait]
impl EventSource for ChannelEventSource {
    async fn run(&self, shutdown: CancellationToken) -> Result<(), BlockchainError> {
        if self.fail_run {
            return Err(BlockchainError::GetBlockNumber {
                reason: "connection refused".to_string(),
                source: None,
            });
        }
        shutdown.cancelled().await;
        Ok(())
    }

    async fn next(&self, shutdown: &CancellationToken) -> Result<EventSyncUpdate, BlockchainError> {
        let mut receiver = self.receiver.lock().await;
        tokio::select! {
            _ = shutdown.cancelled() => Err(BlockchainError::Cancelled),
            update = receiver.recv() => update.ok_or(BlockchainError::ChannelClosed),
        }
    }
}

fn contracts() -> MonitoredContracts {
    MonitoredContracts {
        keypers_config_list: Address::with_last_byte(1),
        decryptors_config_list: Address::with_last_byte(2),
        bls_public_key_registry: Address::with_last_byte(5),
        bls_signature_registry: Address::with_last_byte(6),
    }
}

fn account(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

async fn repository() -> RepositoryManager {
    RepositoryManager::connect(&RepositoryManagerConfig::sqlite_in_memory())
        .await
        .unwrap()
}

fn applier(repository: &RepositoryManager, address_sets: StaticAddressSets) -> EventApplier {
    EventApplier::new(repository.clone(), Arc::new(address_sets), &contracts())
}

fn event(event: ChainEvent, block_number: u64, log_index: u64) -> EventSyncUpdate {
    EventSyncUpdate {
        event: Some(event),
        block_number,
        log_index,
    }
}

fn unknown_event(block_number: u64, log_index: u64) -> EventSyncUpdate {
    event(
        ChainEvent::Unknown {
            contract: Address::with_last_byte(9),
            topic0: None,
        },
        block_number,
        log_index,
    )
}

fn registration(registry: Address, account: Address, data: Vec<u8>) -> ChainEvent {
    ChainEvent::Registered(Registration {
        registry,
        account,
        data: Bytes::from(data),
    })
}

/// Public key and signature over the account address, as a decryptor registers them.
fn bls_credentials(seed: u8, account: &Address) -> (Vec<u8>, Vec<u8>) {
    let secret = BlsSecretKey::from_bytes(&[seed; 32]).unwrap();
    let public_key = secret.public_key().to_bytes().unwrap();
    let signature = secret.sign(account.as_slice()).to_bytes().unwrap();
    (public_key, signature)
}

async fn stored_cursor(repository: &RepositoryManager) -> Option<EventSyncProgress> {
    repository
        .event_sync_progress_repository()
        .get()
        .await
        .unwrap()
}

fn progress(next_block_number: u64, next_log_index: u64) -> Option<EventSyncProgress> {
    Some(EventSyncProgress {
        next_block_number,
        next_log_index,
    })
}

#[tokio::test]
async fn test_cursor_follows_event_and_absent_rules() {
    let repository = repository().await;
    let applier = applier(&repository, StaticAddressSets::default());

    let cursor = applier.apply(&unknown_event(10, 3)).await.unwrap();
    assert_eq!(cursor, SyncCursor::new(10, 4));
    assert_eq!(stored_cursor(&repository).await, progress(10, 4));

    let cursor = applier.apply(&EventSyncUpdate::absent(10)).await.unwrap();
    assert_eq!(cursor, SyncCursor::new(11, 0));
    assert_eq!(stored_cursor(&repository).await, progress(11, 0));
}

#[tokio::test]
async fn test_unknown_event_advances_cursor_without_domain_writes() {
    let repository = repository().await;
    let applier = applier(&repository, StaticAddressSets::default());

    applier.apply(&unknown_event(4, 0)).await.unwrap();

    assert_eq!(stored_cursor(&repository).await, progress(4, 1));
    assert_eq!(
        repository.keyper_set_repository().get(4).await.unwrap(),
        None
    );
}

#[tokio::test]
async fn test_keyper_set_is_stored_with_cursor() {
    let repository = repository().await;
    let keypers = vec![account(0xaa), account(0xbb), account(0xcc)];
    let applier = applier(
        &repository,
        StaticAddressSets::default().with(AddressSet::Keypers, 1, keypers.clone()),
    );

    let update = event(
        ChainEvent::KeypersConfigsListNewConfig(NewKeyperConfig {
            activation_block_number: 100,
            index: 1,
            threshold: 2,
        }),
        20,
        0,
    );
    applier.apply(&update).await.unwrap();

    assert_eq!(
        repository.keyper_set_repository().get(100).await.unwrap(),
        Some(KeyperSetEntry {
            activation_block_number: 100,
            keypers: keypers.iter().map(|a| a.to_checksum(None)).collect(),
            threshold: 2,
        })
    );
    assert_eq!(stored_cursor(&repository).await, progress(20, 1));
}

#[tokio::test]
async fn test_decryptor_set_members_follow_set_order() {
    let repository = repository().await;
    let decryptors = vec![account(0x03), account(0x01), account(0x02)];
    let applier = applier(
        &repository,
        StaticAddressSets::default().with(AddressSet::Decryptors, 0, decryptors.clone()),
    );

    let update = event(
        ChainEvent::DecryptorsConfigsListNewConfig(NewDecryptorConfig {
            activation_block_number: 64,
            index: 0,
        }),
        30,
        2,
    );
    applier.apply(&update).await.unwrap();

    let members = repository
        .decryptor_set_repository()
        .get_members(64)
        .await
        .unwrap();
    let addresses: Vec<_> = members.iter().map(|m| m.address.clone()).collect();
    let expected: Vec<_> = decryptors.iter().map(|a| a.to_checksum(None)).collect();
    assert_eq!(addresses, expected);
    assert_eq!(
        members.iter().map(|m| m.index).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[tokio::test]
async fn test_activation_overflow_leaves_state_and_cursor_untouched() {
    let repository = repository().await;
    let applier = applier(
        &repository,
        StaticAddressSets::default().with(AddressSet::Keypers, 0, vec![account(0xaa)]),
    );
    applier.apply(&unknown_event(5, 0)).await.unwrap();

    let overflow = i64::MAX as u64 + 1;
    let update = event(
        ChainEvent::KeypersConfigsListNewConfig(NewKeyperConfig {
            activation_block_number: overflow,
            index: 0,
            threshold: 1,
        }),
        6,
        0,
    );
    let error = applier.apply(&update).await.unwrap_err();

    assert!(matches!(error, SyncError::ActivationBlockOverflow(value) if value == overflow));
    assert_eq!(stored_cursor(&repository).await, progress(5, 1));
    assert_eq!(
        repository.keyper_set_repository().get(i64::MAX).await.unwrap(),
        None
    );
}

#[tokio::test]
async fn test_failed_event_rolls_back_partial_writes() {
    let repository = repository().await;
    // Occupies index 1 so the second member insert of the event conflicts.
    repository
        .decryptor_set_repository()
        .insert_member(&DecryptorSetMemberEntry {
            activation_block_number: 50,
            index: 1,
            address: account(0xee).to_checksum(None),
        })
        .await
        .unwrap();

    let applier = applier(
        &repository,
        StaticAddressSets::default().with(
            AddressSet::Decryptors,
            3,
            vec![account(0x01), account(0x02), account(0x03)],
        ),
    );
    applier.apply(&unknown_event(8, 0)).await.unwrap();

    let update = event(
        ChainEvent::DecryptorsConfigsListNewConfig(NewDecryptorConfig {
            activation_block_number: 50,
            index: 3,
        }),
        9,
        0,
    );
    let error = applier.apply(&update).await.unwrap_err();
    assert!(matches!(error, SyncError::Repository(_)));

    let members = repository
        .decryptor_set_repository()
        .get_members(50)
        .await
        .unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].address, account(0xee).to_checksum(None));
    assert_eq!(stored_cursor(&repository).await, progress(8, 1));
}

#[tokio::test]
async fn test_address_set_failure_aborts_event() {
    let repository = repository().await;
    let applier = applier(&repository, StaticAddressSets::default());

    let update = event(
        ChainEvent::KeypersConfigsListNewConfig(NewKeyperConfig {
            activation_block_number: 10,
            index: 7,
            threshold: 1,
        }),
        3,
        1,
    );
    let error = applier.apply(&update).await.unwrap_err();

    assert!(matches!(
        error,
        SyncError::Blockchain(BlockchainError::Timeout { .. })
    ));
    assert_eq!(stored_cursor(&repository).await, None);
}

#[tokio::test]
async fn test_credentials_verify_in_either_order() {
    let repository = repository().await;
    let applier = applier(&repository, StaticAddressSets::default());
    let contracts = contracts();

    let first = account(0x11);
    let (first_key, first_signature) = bls_credentials(7, &first);
    let second = account(0x22);
    let (second_key, second_signature) = bls_credentials(8, &second);

    let updates = [
        registration(contracts.bls_public_key_registry, first, first_key),
        registration(contracts.bls_signature_registry, second, second_signature),
        registration(contracts.bls_signature_registry, first, first_signature),
        registration(contracts.bls_public_key_registry, second, second_key),
    ];
    for (log_index, update) in updates.into_iter().enumerate() {
        applier
            .apply(&event(update, 40, log_index as u64))
            .await
            .unwrap();
    }

    let identities = repository.decryptor_identity_repository();
    for address in [first, second] {
        let identity = identities
            .get(&address.to_checksum(None))
            .await
            .unwrap()
            .unwrap();
        assert!(identity.signature_verified, "{address} not verified");
    }
    assert_eq!(stored_cursor(&repository).await, progress(40, 4));
}

#[tokio::test]
async fn test_single_credential_waits_for_the_other() {
    let repository = repository().await;
    let applier = applier(&repository, StaticAddressSets::default());
    let decryptor = account(0x33);
    let (public_key, _) = bls_credentials(3, &decryptor);

    applier
        .apply(&event(
            registration(contracts().bls_public_key_registry, decryptor, public_key.clone()),
            12,
            0,
        ))
        .await
        .unwrap();

    let identity = repository
        .decryptor_identity_repository()
        .get(&decryptor.to_checksum(None))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(identity.bls_public_key, Some(public_key));
    assert_eq!(identity.bls_signature, None);
    assert!(!identity.signature_verified);
}

#[tokio::test]
async fn test_invalid_signature_is_recorded_but_not_fatal() {
    let repository = repository().await;
    let applier = applier(&repository, StaticAddressSets::default());
    let contracts = contracts();
    let decryptor = account(0x44);
    let (public_key, _) = bls_credentials(1, &decryptor);
    let (_, foreign_signature) = bls_credentials(2, &decryptor);

    applier
        .apply(&event(
            registration(contracts.bls_public_key_registry, decryptor, public_key),
            15,
            0,
        ))
        .await
        .unwrap();
    applier
        .apply(&event(
            registration(contracts.bls_signature_registry, decryptor, foreign_signature),
            15,
            1,
        ))
        .await
        .unwrap();

    let identity = repository
        .decryptor_identity_repository()
        .get(&decryptor.to_checksum(None))
        .await
        .unwrap()
        .unwrap();
    assert!(!identity.signature_verified);
    assert_eq!(stored_cursor(&repository).await, progress(15, 2));
    assert_eq!(
        reconcile_signature(&repository, &decryptor).await.unwrap(),
        ReconcileOutcome::Invalid
    );
}

#[tokio::test]
async fn test_reconciliation_of_verified_identity_is_a_no_op() {
    let repository = repository().await;
    let decryptor = account(0x55);
    let (public_key, signature) = bls_credentials(9, &decryptor);
    let address = decryptor.to_checksum(None);

    let identities = repository.decryptor_identity_repository();
    identities
        .upsert_bls_public_key(&address, &public_key)
        .await
        .unwrap();
    identities
        .upsert_bls_signature(&address, &signature)
        .await
        .unwrap();

    assert_eq!(
        reconcile_signature(&repository, &decryptor).await.unwrap(),
        ReconcileOutcome::Verified
    );
    assert_eq!(
        reconcile_signature(&repository, &decryptor).await.unwrap(),
        ReconcileOutcome::AlreadyVerified
    );
    assert_eq!(
        reconcile_signature(&repository, &decryptor).await.unwrap(),
        ReconcileOutcome::AlreadyVerified
    );
    assert_eq!(identities.mark_signature_verified(&address).await.unwrap(), 0);
}

#[tokio::test]
async fn test_registration_from_unknown_registry_is_ignored() {
    let repository = repository().await;
    let applier = applier(&repository, StaticAddressSets::default());
    let decryptor = account(0x66);

    applier
        .apply(&event(
            registration(Address::with_last_byte(0x77), decryptor, vec![1, 2, 3]),
            18,
            4,
        ))
        .await
        .unwrap();

    assert_eq!(
        repository
            .decryptor_identity_repository()
            .get(&decryptor.to_checksum(None))
            .await
            .unwrap(),
        None
    );
    assert_eq!(stored_cursor(&repository).await, progress(18, 5));
}

#[tokio::test]
async fn test_restart_resumes_after_last_committed_event() {
    let repository = repository().await;
    let applier = applier(&repository, StaticAddressSets::default());
    let (sender, source) = ChannelEventSource::new(false);

    sender.send(unknown_event(3, 0)).unwrap();
    sender.send(EventSyncUpdate::absent(3)).unwrap();
    // Index 7 is unknown to the address reader, so this event fails.
    sender
        .send(event(
            ChainEvent::KeypersConfigsListNewConfig(NewKeyperConfig {
                activation_block_number: 10,
                index: 7,
                threshold: 1,
            }),
            4,
            2,
        ))
        .unwrap();
    sender.send(unknown_event(4, 3)).unwrap();

    let shutdown = CancellationToken::new();
    let result = tokio::time::timeout(
        Duration::from_secs(5),
        run_pipeline(&source, &applier, &shutdown),
    )
    .await
    .unwrap();

    assert!(matches!(
        result,
        Err(SyncError::Blockchain(BlockchainError::Timeout { .. }))
    ));
    assert_eq!(load_cursor(&repository).await.unwrap(), SyncCursor::new(4, 0));
    assert!(!shutdown.is_cancelled());
}

#[tokio::test]
async fn test_source_failure_stops_consumer() {
    let repository = repository().await;
    let applier = applier(&repository, StaticAddressSets::default());
    let (_sender, source) = ChannelEventSource::new(true);

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        run_pipeline(&source, &applier, &CancellationToken::new()),
    )
    .await
    .unwrap();

    assert!(matches!(
        result,
        Err(SyncError::Blockchain(BlockchainError::GetBlockNumber { .. }))
    ));
    assert_eq!(load_cursor(&repository).await.unwrap(), SyncCursor::default());
}

#[tokio::test]
async fn test_shutdown_ends_pipeline_cleanly() {
    let repository = repository().await;
    let applier = applier(&repository, StaticAddressSets::default());
    let (sender, source) = ChannelEventSource::new(false);
    sender.send(unknown_event(1, 0)).unwrap();

    let shutdown = CancellationToken::new();
    let pipeline = run_pipeline(&source, &applier, &shutdown);
    let cancel = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        shutdown.cancel();
    };
    let (result, ()) = tokio::time::timeout(Duration::from_secs(5), async {
        tokio::join!(pipeline, cancel)
    })
    .await
    .unwrap();

    result.unwrap();
    assert_eq!(load_cursor(&repository).await.unwrap(), SyncCursor::new(1, 1));
}
