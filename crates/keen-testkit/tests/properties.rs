//! Property tests across the scoped key codec and the batch dispatcher.

use keen_batch::{BatchConfig, BatchDispatcher, MemoryTransport};
use keen_scoped_key::{
    decode, encode, FixedIv, MasterSecret, PermissionDescriptor, ScopedKey, BLOCK_SIZE, IV_LEN,
};
use keen_testkit::generators::{
    chunk_size, collection_name, descriptor, events, iv, master_secret,
};
use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn roundtrip_any_descriptor(
        secret in master_secret(),
        descriptor in descriptor(),
        iv in iv(),
    ) {
        let token = encode(&secret, &descriptor, &mut FixedIv(iv)).unwrap();
        prop_assert_eq!(decode(&secret, &token).unwrap(), descriptor);
    }

    #[test]
    fn token_structure(
        secret in master_secret(),
        descriptor in descriptor(),
        iv in iv(),
    ) {
        let token = encode(&secret, &descriptor, &mut FixedIv(iv)).unwrap();
        let plaintext_len = descriptor.to_json_bytes().unwrap().len();
        let padded_len = (plaintext_len / BLOCK_SIZE + 1) * BLOCK_SIZE;

        prop_assert_eq!(token.len(), 2 * (IV_LEN + padded_len));
        prop_assert!(token
            .as_str()
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
        prop_assert_eq!(&token.as_str()[..2 * IV_LEN], hex::encode(iv));
    }

    #[test]
    fn iv_changes_ciphertext(
        secret in master_secret(),
        descriptor in descriptor(),
        iv1 in iv(),
        iv2 in iv(),
    ) {
        prop_assume!(iv1 != iv2);

        let t1 = encode(&secret, &descriptor, &mut FixedIv(iv1)).unwrap();
        let t2 = encode(&secret, &descriptor, &mut FixedIv(iv2)).unwrap();

        prop_assert_ne!(&t1.as_str()[2 * IV_LEN..], &t2.as_str()[2 * IV_LEN..]);
        prop_assert_eq!(decode(&secret, &t1).unwrap(), decode(&secret, &t2).unwrap());
    }

    #[test]
    fn wrong_secret_never_yields_descriptor(
        secret in master_secret(),
        other in master_secret(),
        descriptor in descriptor(),
        iv in iv(),
    ) {
        prop_assume!(secret != other);

        let token = encode(&secret, &descriptor, &mut FixedIv(iv)).unwrap();
        match decode(&other, &token) {
            Err(_) => {}
            Ok(decoded) => prop_assert_ne!(decoded, descriptor),
        }
    }

    #[test]
    fn uppercase_token_decodes(
        secret in master_secret(),
        descriptor in descriptor(),
        iv in iv(),
    ) {
        let token = encode(&secret, &descriptor, &mut FixedIv(iv)).unwrap();
        let upper = ScopedKey::parse(&token.as_str().to_uppercase()).unwrap();

        prop_assert_eq!(decode(&secret, &upper).unwrap(), descriptor);
    }

    #[test]
    fn truncated_token_rejected(
        secret in master_secret(),
        iv in iv(),
        cut in 1usize..32,
    ) {
        let token = encode(&secret, &PermissionDescriptor::new(), &mut FixedIv(iv)).unwrap();
        let truncated = &token.as_str()[..token.len() - cut];

        prop_assert!(ScopedKey::parse(truncated)
            .and_then(|t| decode(&secret, &t))
            .is_err());
    }

    #[test]
    fn dispatcher_sends_every_event_once(
        collection in collection_name(),
        batch in events(200),
        size in chunk_size(),
    ) {
        let dispatcher = BatchDispatcher::new(MemoryTransport::new(), BatchConfig::default());
        let expected_chunks = batch.len().div_ceil(size);

        let (result, executed) = runtime().block_on(async {
            let result = dispatcher.submit(&collection, batch.clone(), size).await.unwrap();
            (result, dispatcher.transport().executed().await)
        });

        prop_assert_eq!(result.total_chunks, expected_chunks);
        prop_assert!(result.is_success());

        let sent: Vec<_> = executed
            .iter()
            .flat_map(|op| op.payload[collection.as_str()].as_array().cloned().unwrap_or_default())
            .collect();
        prop_assert_eq!(sent, batch);
    }

    #[test]
    fn dispatcher_counts_add_up(
        batch in events(200),
        size in chunk_size(),
        failing in prop::collection::btree_set(0usize..20, 0..5),
    ) {
        let transport = MemoryTransport::failing(failing.iter().copied());
        let dispatcher = BatchDispatcher::new(transport, BatchConfig::default());

        let result = runtime()
            .block_on(dispatcher.submit("events", batch.clone(), size))
            .unwrap();

        let expected_failed: Vec<usize> = failing
            .iter()
            .copied()
            .filter(|&i| i < result.total_chunks)
            .collect();

        prop_assert_eq!(result.total_chunks, batch.len().div_ceil(size));
        prop_assert_eq!(result.succeeded_chunks + result.failed_chunks, result.total_chunks);
        prop_assert_eq!(result.failed_chunk_indices, expected_failed);
    }
}

#[test]
fn each_key_size_decodes_only_its_own_tokens() {
    let descriptor = keen_testkit::rich_descriptor();
    let secrets: Vec<MasterSecret> = [16usize, 24, 32]
        .iter()
        .map(|&len| MasterSecret::new(vec![7u8; len]).unwrap())
        .collect();

    for (i, secret) in secrets.iter().enumerate() {
        let token = encode(secret, &descriptor, &mut FixedIv([9; IV_LEN])).unwrap();
        assert_eq!(decode(secret, &token).unwrap(), descriptor);

        for other in secrets.iter().skip(i + 1) {
            match decode(other, &token) {
                Err(_) => {}
                Ok(decoded) => assert_ne!(decoded, descriptor),
            }
        }
    }
}
