//! # RPC Flows
//!
//! Repository reads through `CasperRpcNode` against a mock HTTP node that
//! answers the two JSON-RPC methods the client uses.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Value};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use ndpc_client::config::NodeConfig;
    use ndpc_client::{
        AccountHash, CasperRpcNode, ContractHash, MarketplaceError, MarketplaceReader,
        MarketplaceRepository,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const PRODUCER: &str = "95dcc50ad49351dd97aab4678d9926de18981ab611903c145341df252300e88a";

    fn contract() -> ContractHash {
        ContractHash([0x7f; 32])
    }

    fn ok(result: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": result,
        }))
    }

    fn cl_value(parsed: Value, bytes: &str) -> Value {
        json!({
            "api_version": "1.5.6",
            "dictionary_key": "dictionary-00",
            "stored_value": {
                "CLValue": { "cl_type": "Any", "bytes": bytes, "parsed": parsed }
            },
            "merkle_proof": ""
        })
    }

    async fn mount_root(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/rpc"))
            .and(body_partial_json(json!({"method": "chain_get_state_root_hash"})))
            .respond_with(ok(json!({"api_version": "1.5.6", "state_root_hash": "ab".repeat(32)})))
            .mount(server)
            .await;
    }

    async fn mount_item(server: &MockServer, dictionary: &str, key: &str, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/rpc"))
            .and(body_partial_json(json!({
                "method": "state_get_dictionary_item",
                "params": {
                    "state_root_hash": "ab".repeat(32),
                    "dictionary_identifier": {
                        "ContractNamedKey": {
                            "key": contract().to_formatted_string(),
                            "dictionary_name": dictionary,
                            "dictionary_item_key": key,
                        }
                    }
                }
            })))
            .respond_with(response)
            .mount(server)
            .await;
    }

    fn repository(server: &MockServer) -> MarketplaceRepository<CasperRpcNode> {
        let config = NodeConfig {
            address: server.uri(),
            request_timeout_ms: 2_000,
            connect_timeout_ms: 1_000,
        };
        let node = CasperRpcNode::new(&config).unwrap();
        MarketplaceRepository::new(Arc::new(node), contract())
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_holder_over_rpc() {
        let server = MockServer::start().await;
        mount_root(&server).await;
        mount_item(
            &server,
            "holders",
            "0",
            ok(cl_value(Value::Null, "e803000000000000100e0000000000000100000000000000")),
        )
        .await;
        mount_item(
            &server,
            "metadatas",
            "1",
            ok(cl_value(json!("good3,uri-abc,checksum-xyz,10000000000,5"), "")),
        )
        .await;

        let holder = repository(&server).get_holder(0).await.unwrap();
        assert_eq!(holder.remaining_amount, 1000);
        assert_eq!(holder.token.name, "good3");

        // Two root fetches, two lookups
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 4);
    }

    #[tokio::test]
    async fn test_missing_holder_over_rpc() {
        let server = MockServer::start().await;
        mount_root(&server).await;
        mount_item(
            &server,
            "holders",
            "5",
            ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": -32003, "message": "state query failed: ValueNotFound"}
            })),
        )
        .await;

        let err = repository(&server).get_holder(5).await.unwrap_err();
        assert_eq!(err, MarketplaceError::not_found("holders", "5"));

        // No metadatas lookup was attempted
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
    }

    #[tokio::test]
    async fn test_owner_list_over_rpc() {
        let server = MockServer::start().await;
        mount_root(&server).await;
        mount_item(&server, "owners", PRODUCER, ok(cl_value(json!([0, 3, 7]), ""))).await;

        let producer: AccountHash = PRODUCER.parse().unwrap();
        let ids = repository(&server).list_holder_ids(&producer).await.unwrap();
        assert_eq!(ids, vec![0, 3, 7]);
    }

    #[tokio::test]
    async fn test_node_down_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let err = repository(&server).get_token(1).await.unwrap_err();
        assert_eq!(err.kind(), "NodeUnavailable");
    }
}
