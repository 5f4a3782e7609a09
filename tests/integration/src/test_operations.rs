//! Operation table and service metadata of the DynamoDB definition.

#[cfg(test)]
mod tests {
    use ddbkit_shape::{Protocol, ShapeError, ShapeKind, ShapeOptions};

    use crate::{dynamodb_context, dynamodb_definition};

    #[test]
    fn test_should_read_dynamodb_metadata() {
        let definition = dynamodb_definition();
        let metadata = &definition.metadata;

        assert_eq!(metadata.protocol, Protocol::Json);
        assert_eq!(metadata.api_version.as_deref(), Some("2012-08-10"));
        assert_eq!(metadata.json_version.as_deref(), Some("1.0"));
        assert_eq!(metadata.target_prefix.as_deref(), Some("DynamoDB_20120810"));
        assert_eq!(metadata.signing_service(), Some("dynamodb"));
    }

    #[test]
    fn test_should_list_operations_in_document_order() {
        let ctx = dynamodb_context(ShapeOptions::default());
        let names: Vec<&str> = ctx.operation_names().collect();
        assert_eq!(
            names,
            ["DescribeTable", "GetItem", "ListTables", "PutItem", "Query", "DescribeLimits"]
        );

        for name in names {
            let http = ctx.operation(name).unwrap().http().unwrap();
            assert_eq!(http.method, ddbkit_core::HTTP_METHOD);
            assert_eq!(http.request_uri, "/");
        }
    }

    #[test]
    fn test_should_build_operation_io_as_extensions() {
        let ctx = dynamodb_context(ShapeOptions::default());
        let get_item = ctx.operation("GetItem").unwrap();

        let input = get_item.input().unwrap();
        assert_eq!(input.attributes().reference.as_deref(), Some("GetItemInput"));
        assert!(input.is_required("TableName"));
        assert!(input.is_required("Key"));
        assert!(!input.is_required("ConsistentRead"));

        let output = get_item.output().unwrap();
        assert_eq!(output.attributes().reference.as_deref(), Some("GetItemOutput"));
        assert!(output.as_structure().unwrap().has_member("Item"));
    }

    #[test]
    fn test_should_default_missing_io_to_empty_structure() {
        let ctx = dynamodb_context(ShapeOptions::default());
        let limits = ctx.operation("DescribeLimits").unwrap();

        for shape in [limits.input().unwrap(), limits.output().unwrap()] {
            let ShapeKind::Structure(structure) = shape.kind() else {
                panic!("expected a structure, got {}", shape.shape_type());
            };
            assert!(structure.member_names().is_empty());
        }
    }

    #[test]
    fn test_should_keep_documentation_only_when_requested() {
        let plain = dynamodb_context(ShapeOptions::default());
        assert_eq!(plain.operation("DescribeTable").unwrap().documentation(), None);

        let documented = dynamodb_context(ShapeOptions { documentation: true });
        assert_eq!(
            documented.operation("DescribeTable").unwrap().documentation(),
            Some("<p>Returns information about the table.</p>")
        );
    }

    #[test]
    fn test_should_reject_unknown_operation() {
        let ctx = dynamodb_context(ShapeOptions::default());
        assert!(matches!(
            ctx.operation("Scan"),
            Err(ShapeError::UnknownOperation(name)) if name == "Scan"
        ));
    }
}
