//! # Delimited-Text Decoding
//!
//! Token and request records are stored on-chain as comma-joined strings in
//! a fixed field order. The format has no escaping: a comma inside a string
//! field shifts every following field and the record is rejected with
//! `FieldCountMismatch`. The builder refuses to mint metadata containing a
//! comma so that records written through this client always decode.

use std::str::FromStr;

use primitive_types::U256;

use crate::domain::{AccountHash, MarketplaceError, RequestObject, Result, Token};

/// Field separator of delimited records.
pub const DELIMITER: char = ',';

/// Token record arity: name, token_uri, checksum, price, commission.
pub const TOKEN_FIELDS: usize = 5;

/// Request record arity: holder_id, amount, commission, producer, publisher.
pub const REQUEST_FIELDS: usize = 5;

fn split_fields<'a>(record: &'static str, text: &'a str, expected: usize) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = text.split(DELIMITER).collect();
    if fields.len() != expected {
        return Err(MarketplaceError::FieldCountMismatch {
            record,
            expected,
            got: fields.len(),
        });
    }
    Ok(fields)
}

fn parse_field<T: FromStr>(record: &'static str, field: &'static str, value: &str) -> Result<T> {
    value.parse().map_err(|_| MarketplaceError::InvalidField {
        record,
        field,
        value: value.to_string(),
    })
}

fn parse_u256(record: &'static str, field: &'static str, value: &str) -> Result<U256> {
    U256::from_dec_str(value).map_err(|_| MarketplaceError::InvalidField {
        record,
        field,
        value: value.to_string(),
    })
}

/// Decode `name,token_uri,checksum,price,commission`.
pub fn decode_token(text: &str) -> Result<Token> {
    let f = split_fields("token", text, TOKEN_FIELDS)?;
    Ok(Token {
        name: f[0].to_string(),
        token_uri: f[1].to_string(),
        checksum: f[2].to_string(),
        price: parse_u256("token", "price", f[3])?,
        commission: parse_field("token", "commission", f[4])?,
    })
}

/// Decode `holder_id,amount,commission,producer,publisher`.
pub fn decode_request(text: &str) -> Result<RequestObject> {
    let f = split_fields("request", text, REQUEST_FIELDS)?;
    Ok(RequestObject {
        holder_id: parse_field("request", "holder_id", f[0])?,
        amount: parse_field("request", "amount", f[1])?,
        commission: parse_field("request", "commission", f[2])?,
        producer: parse_field::<AccountHash>("request", "producer", f[3])?,
        publisher: parse_field::<AccountHash>("request", "publisher", f[4])?,
    })
}

/// Decode the parsed form of a `List<U64>` value, keeping node order.
pub fn decode_id_list(parsed: &serde_json::Value) -> Result<Vec<u64>> {
    let invalid = |value: &serde_json::Value| MarketplaceError::InvalidField {
        record: "id list",
        field: "parsed",
        value: value.to_string(),
    };

    let items = parsed.as_array().ok_or_else(|| invalid(parsed))?;
    items
        .iter()
        .map(|item| match item {
            serde_json::Value::Number(n) => n.as_u64().ok_or_else(|| invalid(item)),
            serde_json::Value::String(s) => s.parse().map_err(|_| invalid(item)),
            _ => Err(invalid(item)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    const PRODUCER: &str = "95dcc50ad49351dd97aab4678d9926de18981ab611903c145341df252300e88a";
    const PUBLISHER: &str = "8e11ebbcdf47ecc0fcdf190882a1c25502a4ee17b1ebf49df0c076478bbcaf7d";

    #[test]
    fn test_decode_token() {
        let token = decode_token("good3,uri-abc,checksum-xyz,10000000000,5").unwrap();
        assert_eq!(token.name, "good3");
        assert_eq!(token.token_uri, "uri-abc");
        assert_eq!(token.checksum, "checksum-xyz");
        assert_eq!(token.price, U256::from(10_000_000_000u64));
        assert_eq!(token.commission, 5);
    }

    #[test]
    fn test_decode_token_wrong_arity() {
        // Four fields: a record written without commission
        let err = decode_token("good3,uri-abc,checksum-xyz,10000000000").unwrap_err();
        assert_eq!(
            err,
            MarketplaceError::FieldCountMismatch {
                record: "token",
                expected: 5,
                got: 4,
            }
        );

        // Embedded comma in the name
        let err = decode_token("good,3,uri-abc,checksum-xyz,10000000000,5").unwrap_err();
        assert!(matches!(err, MarketplaceError::FieldCountMismatch { got: 6, .. }));
    }

    #[test]
    fn test_decode_token_bad_price() {
        let err = decode_token("good3,uri,sum,ten,5").unwrap_err();
        assert!(matches!(
            err,
            MarketplaceError::InvalidField { field: "price", .. }
        ));
    }

    #[test]
    fn test_decode_token_large_price() {
        let price = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        let token = decode_token(&format!("n,u,c,{price},0")).unwrap();
        assert_eq!(token.price, U256::MAX);
    }

    #[test]
    fn test_decode_request() {
        let text = format!("4,25,10,{PRODUCER},{PUBLISHER}");
        let request = decode_request(&text).unwrap();
        assert_eq!(request.holder_id, 4);
        assert_eq!(request.amount, 25);
        assert_eq!(request.commission, 10);
        assert_eq!(request.producer.to_hex(), PRODUCER);
        assert_eq!(request.publisher.to_hex(), PUBLISHER);
    }

    #[test]
    fn test_decode_request_bad_account() {
        let text = format!("4,25,10,nothex,{PUBLISHER}");
        let err = decode_request(&text).unwrap_err();
        assert!(matches!(
            err,
            MarketplaceError::InvalidField { field: "producer", .. }
        ));
    }

    #[test]
    fn test_decode_request_wrong_arity() {
        let err = decode_request("4,25,10").unwrap_err();
        assert!(matches!(err, MarketplaceError::FieldCountMismatch { got: 3, .. }));
    }

    #[test]
    fn test_decode_id_list_preserves_order() {
        assert_eq!(decode_id_list(&json!([7, 2, 9])).unwrap(), vec![7, 2, 9]);
        assert_eq!(decode_id_list(&json!(["3", 1])).unwrap(), vec![3, 1]);
        assert!(decode_id_list(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_decode_id_list_rejects_non_list() {
        assert!(decode_id_list(&json!("1,2")).is_err());
        assert!(decode_id_list(&json!([-1])).is_err());
    }

    proptest! {
        #[test]
        fn prop_token_wrong_arity_rejected(fields in prop::collection::vec("[a-z0-9]{0,8}", 1..12)) {
            prop_assume!(fields.len() != TOKEN_FIELDS);
            let err = decode_token(&fields.join(",")).unwrap_err();
            prop_assert_eq!(err, MarketplaceError::FieldCountMismatch {
                record: "token",
                expected: TOKEN_FIELDS,
                got: fields.len(),
            });
        }

        #[test]
        fn prop_request_wrong_arity_rejected(fields in prop::collection::vec("[a-z0-9]{0,8}", 1..12)) {
            prop_assume!(fields.len() != REQUEST_FIELDS);
            let err = decode_request(&fields.join(",")).unwrap_err();
            prop_assert_eq!(err, MarketplaceError::FieldCountMismatch {
                record: "request",
                expected: REQUEST_FIELDS,
                got: fields.len(),
            });
        }
    }
}
