//! # Read Flows
//!
//! A small marketplace seeded into the in-memory node: one producer (acc1)
//! holding a minted token, one publisher (acc2) with an outgoing request and
//! an approved holding.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use primitive_types::U256;

    use ndpc_client::codec::encode_holder;
    use ndpc_client::domain::dictionaries::*;
    use ndpc_client::ports::MockCall;
    use ndpc_client::{
        AccountHash, ClientConfig, IdentityRegistry, MarketplaceError, MarketplaceReader,
        MarketplaceRepository, MockStateNode,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const PRODUCER: &str = "95dcc50ad49351dd97aab4678d9926de18981ab611903c145341df252300e88a";
    const PUBLISHER: &str = "8e11ebbcdf47ecc0fcdf190882a1c25502a4ee17b1ebf49df0c076478bbcaf7d";

    /// Approved record: holder 0, amount 50, owner acc2, publisher acc1,
    /// token 1, percentage 10.
    fn approved_hex() -> String {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0u64.to_le_bytes());
        bytes.extend_from_slice(&50u64.to_le_bytes());
        bytes.extend_from_slice(&hex::decode(PUBLISHER).unwrap());
        bytes.extend_from_slice(&hex::decode(PRODUCER).unwrap());
        bytes.extend_from_slice(&1u64.to_le_bytes());
        bytes.push(10);
        hex::encode(bytes)
    }

    fn marketplace() -> MockStateNode {
        let mut node = MockStateNode::new();
        node.insert_text(METADATAS, "1", "good3,uri-abc,checksum-xyz,10000000000,5");
        node.insert_bytes(HOLDERS, "0", "e803000000000000100e0000000000000100000000000000");
        node.insert_bytes(HOLDERS, "1", &encode_holder(50, 50, 1));
        node.insert_id_list(OWNERS, PRODUCER, &[0]);
        node.insert_id_list(OWNERS, PUBLISHER, &[1]);

        node.insert_text(REQUEST_OBJECTS, "0", &format!("0,50,10,{PRODUCER},{PUBLISHER}"));
        node.insert_text(REQUEST_OBJECTS, "1", &format!("0,20,15,{PRODUCER},{PUBLISHER}"));
        node.insert_id_list(PRODUCER_REQUESTS, PRODUCER, &[0, 1]);
        node.insert_id_list(PUBLISHER_REQUESTS, PUBLISHER, &[0, 1]);

        node.insert_bytes(APPROVED, "0", &approved_hex());
        node.insert_id_list(PUBLISHERS_APPROVED, PUBLISHER, &[0]);
        node.insert_id_list(PRODUCERS_APPROVED, PRODUCER, &[0]);
        node
    }

    fn setup() -> (Arc<MockStateNode>, MarketplaceRepository<MockStateNode>) {
        let config = ClientConfig::default();
        let node = Arc::new(marketplace());
        let repo = MarketplaceRepository::new(node.clone(), config.contract_hash);
        (node, repo)
    }

    fn account(hash: &str) -> AccountHash {
        hash.parse().unwrap()
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_producer_portfolio() {
        let (_, repo) = setup();
        let holdings = repo.holdings_of(&account(PRODUCER)).await.unwrap();

        assert_eq!(holdings.len(), 1);
        let (holder_id, holder) = &holdings[0];
        assert_eq!(*holder_id, 0);
        assert_eq!(holder.remaining_amount, 1000);
        assert_eq!(holder.amount, 3600);
        assert_eq!(holder.token.price, U256::from(10_000_000_000u64));
        assert_eq!(holder.token.commission, 5);
    }

    #[tokio::test]
    async fn test_request_both_sides_agree() {
        let (_, repo) = setup();
        let incoming = repo.incoming_requests(&account(PRODUCER)).await.unwrap();
        let outgoing = repo.outgoing_requests(&account(PUBLISHER)).await.unwrap();

        assert_eq!(incoming, outgoing);
        let ids: Vec<u64> = incoming.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(incoming[1].1.commission, 15);
    }

    #[tokio::test]
    async fn test_approved_holding_flow() {
        let (_, repo) = setup();
        let publisher_ids = repo.list_publisher_approved(&account(PUBLISHER)).await.unwrap();
        let producer_ids = repo.list_producer_approved(&account(PRODUCER)).await.unwrap();
        assert_eq!(publisher_ids, producer_ids);

        let approved = repo.get_approved(publisher_ids[0]).await.unwrap();
        assert_eq!(approved.amount, 50);
        assert_eq!(approved.owner, account(PUBLISHER));
        assert_eq!(approved.publisher, account(PRODUCER));
        assert_eq!(approved.percentage, 10);

        // The approved holding points back at a readable token
        let token = repo.get_token(approved.token_id).await.unwrap();
        assert_eq!(token.name, "good3");
    }

    #[tokio::test]
    async fn test_portfolio_lookups_each_fetch_a_root() {
        let (node, repo) = setup();
        repo.holdings_of(&account(PRODUCER)).await.unwrap();

        // owners, holders, metadatas: three lookups, three roots
        let calls = node.calls();
        let roots = calls.iter().filter(|c| **c == MockCall::Root).count();
        let lookup_roots: Vec<&str> = calls
            .iter()
            .filter_map(|c| match c {
                MockCall::Lookup { root, .. } => Some(root.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(roots, 3);
        assert_eq!(lookup_roots, vec!["root-1", "root-2", "root-3"]);
    }

    #[tokio::test]
    async fn test_broken_holder_stops_portfolio() {
        let mut node = marketplace();
        node.insert_id_list(OWNERS, PRODUCER, &[0, 9]);
        node.insert_bytes(HOLDERS, "9", "e80300");
        let repo = MarketplaceRepository::new(Arc::new(node), ClientConfig::default().contract_hash);

        let err = repo.holdings_of(&account(PRODUCER)).await.unwrap_err();
        assert!(matches!(
            err,
            MarketplaceError::TruncatedRecord { expected: 24, got: 3, .. }
        ));
    }

    #[tokio::test]
    async fn test_account_without_entries() {
        let (_, repo) = setup();
        let stranger = AccountHash([0x42; 32]);
        let err = repo.list_holder_ids(&stranger).await.unwrap_err();
        assert_eq!(err, MarketplaceError::not_found(OWNERS, stranger.to_hex()));
    }

    #[tokio::test]
    async fn test_identities_name_request_parties() {
        let (_, repo) = setup();
        let registry = IdentityRegistry::from_config(&ClientConfig::default());
        let request = repo.get_request(0).await.unwrap();

        assert_eq!(registry.by_hash(&request.producer).unwrap().name, "acc1");
        assert_eq!(registry.by_hash(&request.publisher).unwrap().name, "acc2");
    }
}
