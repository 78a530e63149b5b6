use rewards_sdk::ledger::{build_statement, load_transactions};
use rewards_sdk::privacy::{
    blind_tokens, build_credential, generate_tokens, parse_verify_and_unblind_tokens,
    verify_credential, BatchDLEQProof, CredentialBatch, PublicKey, SignedToken,
    SignedTokensResponse, SigningKey, UnblindedTokenPool,
};
use rewards_sdk::LedgerConfig;
use serde_json::{json, Value};

fn sign_batch(signing_key: &SigningKey, blinded_tokens: &[rewards_sdk::BlindedToken]) -> Value {
    let signed_tokens: Vec<SignedToken> = blinded_tokens
        .iter()
        .map(|blinded_token| signing_key.sign(blinded_token).unwrap())
        .collect();
    let batch_proof = BatchDLEQProof::create(blinded_tokens, &signed_tokens, signing_key);

    SignedTokensResponse::new(&signing_key.public_key(), &signed_tokens, &batch_proof)
        .unwrap()
        .to_value()
}

#[test]
fn test_issue_unblind_and_redeem() {
    let signing_key = SigningKey::random();
    let public_key = signing_key.public_key();

    let tokens = generate_tokens(10);
    let blinded_tokens = blind_tokens(&tokens);
    let response = sign_batch(&signing_key, &blinded_tokens);

    let unblinded_tokens =
        parse_verify_and_unblind_tokens(&response, &tokens, &blinded_tokens, &public_key)
            .expect("batch should verify");
    assert_eq!(unblinded_tokens.len(), tokens.len());

    for (token, unblinded_token) in tokens.iter().zip(&unblinded_tokens) {
        assert_eq!(token.preimage(), unblinded_token.preimage());
    }

    let payload = r#"{"creativeInstanceId":"546fe7b0-5047-4f28-a11c-81f14edcf0f6"}"#;
    let credential = build_credential(&unblinded_tokens[0], payload).unwrap();
    assert!(verify_credential(&credential, &unblinded_tokens[0], payload));
    assert!(!verify_credential(&credential, &unblinded_tokens[1], payload));
    assert!(!verify_credential(&credential, &unblinded_tokens[0], "{}"));
}

#[test]
fn test_response_from_other_issuer_is_rejected() {
    let signing_key = SigningKey::random();
    let other_key = SigningKey::random();

    let batch = CredentialBatch::generate(3);
    let response = sign_batch(&signing_key, &batch.blinded_tokens());

    assert!(batch.verify_and_unblind(&response, &other_key.public_key()).is_none());
}

#[test]
fn test_tampered_response_is_rejected() {
    let signing_key = SigningKey::random();
    let public_key = signing_key.public_key();

    let tokens = generate_tokens(3);
    let blinded_tokens = blind_tokens(&tokens);
    let mut response = sign_batch(&signing_key, &blinded_tokens);

    response["signedTokens"][1] = json!(response["signedTokens"][0].clone());
    assert!(
        parse_verify_and_unblind_tokens(&response, &tokens, &blinded_tokens, &public_key)
            .is_none()
    );

    let empty_key = PublicKey::decode_base64("not a key");
    assert!(!empty_key.has_value());
    let response = sign_batch(&signing_key, &blinded_tokens);
    assert!(
        parse_verify_and_unblind_tokens(&response, &tokens, &blinded_tokens, &empty_key)
            .is_none()
    );
}

#[tokio::test]
async fn test_unblinded_tokens_feed_the_pool() {
    let signing_key = SigningKey::random();
    let batch = CredentialBatch::generate(5);
    let response = sign_batch(&signing_key, &batch.blinded_tokens());
    let unblinded_tokens = batch
        .verify_and_unblind(&response, &signing_key.public_key())
        .unwrap();

    let (pool, _events) = UnblindedTokenPool::with_channel();
    pool.add_tokens(unblinded_tokens).await;
    assert_eq!(pool.count().await, 5);
    assert!(pool.take_token().await.is_some());
    assert_eq!(pool.count().await, 4);
}

#[test]
fn test_statement_from_snapshot() {
    let snapshot = br#"[
        {"id": "a", "created_at": "2020-10-12T09:00:00Z", "value": 0.05,
         "confirmation_type": "view", "ad_type": "notification_ad",
         "reconciled_at": "2020-10-20T00:00:00Z"},
        {"id": "b", "created_at": "2020-11-02T09:00:00Z", "value": 0.04,
         "confirmation_type": "click", "ad_type": "notification_ad"},
        {"id": "c", "created_at": "2020-11-03T09:00:00Z", "value": 0.10,
         "confirmation_type": "view", "ad_type": "new_tab_page_ad"}
    ]"#;
    let transactions = load_transactions(snapshot).unwrap();
    let now: chrono::DateTime<chrono::Utc> = "2020-11-18T12:00:00Z".parse().unwrap();

    let statement = build_statement(
        &transactions,
        chrono::DateTime::<chrono::Utc>::MIN_UTC,
        &LedgerConfig::default(),
        &now,
    );

    assert!((statement.earnings_last_month - 0.05).abs() < 1e-9);
    assert!((statement.estimated_earnings_this_month.high - 0.14).abs() < 1e-9);
    assert!((statement.estimated_earnings_this_month.low - 0.04 * 0.8).abs() < 1e-9);
    assert_eq!(statement.ads_received_this_month, 2);
}
