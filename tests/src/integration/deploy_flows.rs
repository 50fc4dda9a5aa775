//! # Deploy Flows
//!
//! Configuration file -> identity registry -> transaction builder ->
//! rendered command, the path the shell takes for every write.

#[cfg(test)]
mod tests {
    use std::io::Write;

    use ndpc_client::transactions::ArgValue;
    use ndpc_client::{
        BuyRequest, ClientConfig, IdentityRegistry, MarketplaceError, MintRequest,
        PublishRequest, TokenMetadata, TransactionBuilder,
    };

    const CONFIG: &str = r#"
chain_name = "casper-net-1"
contract_hash = "hash-0101010101010101010101010101010101010101010101010101010101010101"

[node]
address = "http://10.0.0.5:7777"

[payments]
mint = 6000000000

[[identities]]
name = "alice"
account_hash = "95dcc50ad49351dd97aab4678d9926de18981ab611903c145341df252300e88a"
secret_key = "/keys/alice.pem"

[[identities]]
name = "bob"
account_hash = "account-hash-8e11ebbcdf47ecc0fcdf190882a1c25502a4ee17b1ebf49df0c076478bbcaf7d"
secret_key = "/keys/bob.pem"
"#;

    fn load() -> ClientConfig {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();
        let config = ClientConfig::load(file.path()).unwrap();
        config.validate().unwrap();
        config
    }

    #[test]
    fn test_mint_from_config_file() {
        let config = load();
        let registry = IdentityRegistry::from_config(&config);
        let builder = TransactionBuilder::new(&config);

        let alice = registry.select("alice").unwrap();
        let bob = registry.select("2").unwrap();
        let metadata = TokenMetadata::from_json_str(
            r#"{"name": "song", "token_uri": "ipfs://Qm123", "checksum": "c0ffee"}"#,
        )
        .unwrap();
        let request = MintRequest {
            metadata,
            price: "2500".into(),
            amount: "10".into(),
            recipient: bob.account_hash,
        };
        let deploy = builder.mint(&alice.secret_key, &request).unwrap();

        assert_eq!(deploy.payment, 6_000_000_000);
        let argv = deploy.to_casper_client_args();
        assert!(argv.windows(2).any(|w| w == ["--node-address", "http://10.0.0.5:7777"]));
        assert!(argv.windows(2).any(|w| w == ["--chain-name", "casper-net-1"]));
        assert!(argv.windows(2).any(|w| w == ["--secret-key", "/keys/alice.pem"]));
        assert!(argv
            .windows(2)
            .any(|w| w[0] == "--session-hash" && w[1] == format!("hash-{}", "01".repeat(32))));
        assert!(argv.contains(&format!(
            "recipient:key='{}'",
            bob.account_hash.to_formatted_string()
        )));
    }

    #[test]
    fn test_publish_then_approve() {
        let config = load();
        let registry = IdentityRegistry::from_config(&config);
        let builder = TransactionBuilder::new(&config);
        let alice = registry.select("1").unwrap();
        let bob = registry.select("2").unwrap();

        // bob asks alice for units of her holder 0
        let publish = builder
            .publish_request(
                &bob.secret_key,
                &PublishRequest {
                    producer: alice.account_hash.to_formatted_string(),
                    amount: "5".into(),
                    holder_id: "0".into(),
                    commission: "20".into(),
                },
            )
            .unwrap();
        assert_eq!(
            publish.args.get("producer-account"),
            Some(&ArgValue::AccountKey(alice.account_hash))
        );

        let approve = builder.approve_request(&alice.secret_key, "0").unwrap();
        assert_eq!(approve.signer, alice.secret_key);
        assert!(approve.render_command().contains("--session-entry-point approve"));
    }

    #[test]
    fn test_invalid_inputs_never_build() {
        let config = load();
        let builder = TransactionBuilder::new(&config);
        let signer = &config.identities[0].secret_key;

        let buy = builder.buy(
            signer,
            &BuyRequest {
                amount: "1".into(),
                approved_id: "-1".into(),
                price: "10".into(),
            },
        );
        assert!(matches!(
            buy,
            Err(MarketplaceError::InvalidArgument { argument: "approved_id", .. })
        ));

        let cancel = builder.cancel_request(signer, "99999999999999999999");
        assert!(matches!(
            cancel,
            Err(MarketplaceError::ArgumentOutOfRange { argument: "request_id", .. })
        ));
    }

    #[test]
    fn test_deploy_json_for_submitter() {
        let config = load();
        let builder = TransactionBuilder::new(&config);
        let deploy = builder
            .buy(
                &config.identities[1].secret_key,
                &BuyRequest {
                    amount: "2".into(),
                    approved_id: "0".into(),
                    price: "2500".into(),
                },
            )
            .unwrap();

        let json = serde_json::to_value(&deploy).unwrap();
        assert_eq!(json["chain_name"], "casper-net-1");
        assert_eq!(json["payment"], 15_013_050_000u64);
        assert_eq!(json["args"][0]["value"], "5000");
        assert_eq!(json["args"][2]["value"], format!("hash-{}", "01".repeat(32)));
    }
}
