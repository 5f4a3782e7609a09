//! Shape trees and value conversions over the DynamoDB definition.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use ddbkit_shape::{Shape, ShapeOptions, ShapeType, TimestampFormat, Value};

    use crate::dynamodb_context;

    fn member(shape: &Shape, name: &str) -> Arc<Shape> {
        shape.as_structure().unwrap().member(name).unwrap().unwrap()
    }

    #[test]
    fn test_should_resolve_recursive_attribute_value() {
        let ctx = dynamodb_context(ShapeOptions::default());
        let attribute_value = ctx.shape("AttributeValue").unwrap();
        let structure = attribute_value.as_structure().unwrap();
        assert_eq!(
            structure.member_names(),
            ["S", "N", "B", "SS", "NS", "BS", "M", "L", "NULL", "BOOL"]
        );

        let map = structure.member("M").unwrap().unwrap();
        let nested = map.as_map().unwrap().value().unwrap();
        assert_eq!(nested.attributes().reference.as_deref(), Some("AttributeValue"));
        assert_eq!(nested.shape_type(), ShapeType::Structure);

        let list = structure.member("L").unwrap().unwrap();
        let element = list.as_list().unwrap().member().unwrap().unwrap();
        assert_eq!(element.attributes().reference.as_deref(), Some("AttributeValue"));

        // Both recursive children extend the same shared member table.
        let through_map = member(&nested, "S");
        let through_list = member(&element, "S");
        assert!(Arc::ptr_eq(&through_map, &through_list));
    }

    #[test]
    fn test_should_type_attribute_value_members() {
        let ctx = dynamodb_context(ShapeOptions::default());
        let attribute_value = ctx.shape("AttributeValue").unwrap();
        let structure = attribute_value.as_structure().unwrap();
        let member_type = |name: &str| structure.member(name).unwrap().unwrap().shape_type();

        assert_eq!(member_type("S"), ShapeType::String);
        assert_eq!(member_type("N"), ShapeType::String);
        assert_eq!(member_type("B"), ShapeType::Binary);
        assert_eq!(member_type("SS"), ShapeType::List);
        assert_eq!(member_type("M"), ShapeType::Map);
        assert_eq!(member_type("NULL"), ShapeType::Boolean);
        assert_eq!(member_type("BOOL"), ShapeType::Boolean);

        let binary = structure.member("B").unwrap().unwrap();
        assert_eq!(
            binary.to_wire_format(&Value::from(b"dynamo".to_vec())).unwrap(),
            Value::from("ZHluYW1v")
        );
        assert_eq!(
            binary.to_type(&Value::from("ZHluYW1v")).unwrap(),
            Value::from(b"dynamo".to_vec())
        );
    }

    #[test]
    fn test_should_apply_shared_constraints_to_members() {
        let ctx = dynamodb_context(ShapeOptions::default());
        let put_item = ctx.operation("PutItem").unwrap().input().unwrap();
        let structure = put_item.as_structure().unwrap();

        let table_name = structure.member("TableName").unwrap().unwrap();
        assert_eq!(table_name.name(), Some("TableName"));
        assert_eq!(table_name.attributes().min, Some(3.0));
        assert_eq!(table_name.attributes().max, Some(255.0));
        assert_eq!(table_name.attributes().pattern.as_deref(), Some("[a-zA-Z0-9_.-]+"));

        let return_values = structure.member("ReturnValues").unwrap().unwrap();
        let expected = ["NONE", "ALL_OLD", "UPDATED_OLD", "ALL_NEW", "UPDATED_NEW"];
        assert_eq!(
            return_values.attributes().enum_values.as_deref(),
            Some(expected.map(String::from).as_slice())
        );
        assert_eq!(structure.required(), ["TableName", "Item"]);
    }

    #[test]
    fn test_should_convert_query_paging_members() {
        let ctx = dynamodb_context(ShapeOptions::default());
        let query = ctx.operation("Query").unwrap();

        let input = query.input().unwrap();
        let limit = member(&input, "Limit");
        assert_eq!(limit.shape_type(), ShapeType::Integer);
        assert_eq!(limit.to_type(&Value::from("25")).unwrap(), Value::Integer(25));

        let forward = member(&input, "ScanIndexForward");
        assert_eq!(forward.to_type(&Value::from("true")).unwrap(), Value::Bool(true));

        let output = query.output().unwrap();
        let items = member(&output, "Items");
        assert_eq!(items.default_value(), Value::List(Vec::new()));
        let item = items.as_list().unwrap().member().unwrap().unwrap();
        assert_eq!(item.shape_type(), ShapeType::Map);
        assert_eq!(item.default_value(), Value::Map(Vec::new()));
    }

    #[test]
    fn test_should_use_unix_timestamps_for_table_descriptions() {
        let ctx = dynamodb_context(ShapeOptions::default());
        let output = ctx.operation("DescribeTable").unwrap().output().unwrap();
        let table = member(&output, "Table");
        let created = member(&table, "CreationDateTime");

        assert_eq!(created.timestamp_format(), Some(TimestampFormat::UnixTimestamp));
        let at = Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap();
        assert_eq!(
            created.to_type(&Value::Float(1_440_938_160.0)).unwrap(),
            Value::Timestamp(at)
        );
        assert_eq!(
            created.to_wire_format(&Value::Timestamp(at)).unwrap(),
            Value::Integer(1_440_938_160)
        );
    }

    #[test]
    fn test_should_serialize_wire_items_as_json() {
        let ctx = dynamodb_context(ShapeOptions::default());
        let output = ctx.operation("Query").unwrap().output().unwrap();
        let count = member(&output, "Count");

        let item = Value::Map(vec![
            ("id".to_owned(), Value::from(json!({"S": "user-1"}))),
            ("Count".to_owned(), count.to_wire_format(&Value::from("3")).unwrap()),
        ]);
        assert_eq!(
            serde_json::to_string(&item).unwrap(),
            r#"{"id":{"S":"user-1"},"Count":3}"#
        );
    }
}
