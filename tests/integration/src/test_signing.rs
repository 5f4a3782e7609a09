//! Signing-key derivation driven by client configuration.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use ddbkit_auth::{
        AuthError, Encoding, SecretKey, build_string_to_sign, credential_scope, derive_signing_key,
        derive_signing_key_encoded, hash_payload,
    };
    use ddbkit_core::ClientConfig;
    use ddbkit_shape::ShapeOptions;

    use crate::dynamodb_context;

    const SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

    fn config() -> ClientConfig {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
            ("AWS_SECRET_ACCESS_KEY", SECRET),
            ("AWS_REGION", "us-east-1"),
        ]);
        ClientConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_owned()))
            .unwrap()
    }

    #[test]
    fn test_should_derive_key_for_dynamodb_scope() {
        let config = config();
        config.validate().unwrap();

        let ctx = dynamodb_context(ShapeOptions::default());
        let service = ctx.metadata().unwrap().signing_service().unwrap();

        let secret = SecretKey::from(config.secret_access_key.as_str());
        let key = derive_signing_key(&secret, "20150830", config.region.as_str(), service).unwrap();
        assert_eq!(
            key.encode(Encoding::Hex),
            "44a00bf61392567a12c8a1af3f6227f121fdd3ffabe98527663649f33cbff4aa"
        );
        assert_eq!(
            credential_scope("20150830", config.region.as_str(), service),
            "20150830/us-east-1/dynamodb/aws4_request"
        );
    }

    #[test]
    fn test_should_match_encoded_and_raw_derivation() {
        let raw =
            derive_signing_key(&SecretKey::from(SECRET), "20150830", "us-east-1", "iam").unwrap();
        let encoded = derive_signing_key_encoded(
            SECRET,
            None,
            "20150830",
            "us-east-1",
            "iam",
            Some(Encoding::Hex),
        )
        .unwrap();

        assert_eq!(
            encoded.as_text(),
            Some("c4afb1cc5771d871763a393e44b703571b55cc28424d1a5e86da6ed3c154a4b9")
        );
        assert_eq!(encoded.as_text(), Some(raw.encode(Encoding::Hex).as_str()));
    }

    #[test]
    fn test_should_sign_string_for_request() {
        let secret = SecretKey::from(SECRET);
        let key = derive_signing_key(&secret, "20150830", "us-east-1", "dynamodb").unwrap();
        let string_to_sign = build_string_to_sign(
            "20150830T123600Z",
            &credential_scope("20150830", "us-east-1", "dynamodb"),
            &hash_payload(br#"{"TableName":"Music"}"#),
        );

        let signature = key.sign(&string_to_sign);
        assert_eq!(signature.len(), 64);
        assert_eq!(signature, key.sign(&string_to_sign));
        assert!(string_to_sign.starts_with("AWS4-HMAC-SHA256\n20150830T123600Z\n"));
    }

    #[test]
    fn test_should_reject_malformed_date_stamp() {
        let result = derive_signing_key(
            &SecretKey::from(SECRET),
            "2015-08-30",
            "us-east-1",
            "dynamodb",
        );
        assert!(matches!(
            result,
            Err(AuthError::InvalidDateStampFormat(stamp)) if stamp == "2015-08-30"
        ));
    }

    #[test]
    fn test_should_refuse_incomplete_config() {
        let config = ClientConfig::from_lookup(|_| None).unwrap();
        assert!(config.validate().is_err());
        assert_eq!(config.endpoint(), "https://dynamodb.us-east-1.amazonaws.com:8000/");
    }
}
