#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use time::macros::datetime;
    use trove::{
        CLASS_FIELD, Document, Fields, Filter, ID_FIELD, Schema, Value, is_same_or_derived,
    };
    use uuid::Uuid;

    #[derive(Document, Debug, Clone, PartialEq)]
    #[trove(embedded)]
    struct Address {
        #[trove(max_length = 8)]
        city: String,
        zip: Option<i32>,
    }

    #[derive(Document, Debug, Clone, PartialEq)]
    struct CustomerAccount {
        /// Account number
        #[trove(primary_key, name = "number")]
        _number: i64,
        balance: Decimal,
        opened: time::PrimitiveDateTime,
        address: Address,
        previous: Vec<Address>,
        #[trove(ignore)]
        cache: Option<String>,
    }

    #[derive(Document, Debug, Clone, PartialEq)]
    #[trove(collection = "audit", class = "Event")]
    struct AuditEvent {
        message: Box<String>,
        tags: Vec<String>,
    }

    fn account() -> CustomerAccount {
        CustomerAccount {
            _number: 77,
            balance: Decimal::from_str("12.50").unwrap(),
            opened: datetime!(2024-01-31 09:00:00),
            address: Address {
                city: "Milan".into(),
                zip: Some(20121),
            },
            previous: vec![Address {
                city: "Turin".into(),
                zip: None,
            }],
            cache: Some("cached".into()),
        }
    }

    #[test]
    fn derive_metadata() {
        assert_eq!(CustomerAccount::collection(), "customer_account");
        assert_eq!(CustomerAccount::class_path(), "CustomerAccount");
        assert_eq!(AuditEvent::collection(), "audit");
        assert_eq!(AuditEvent::class_path(), "Event");
        assert_eq!(Address::class_name(), "Address");

        let defs = CustomerAccount::fields_defs();
        assert_eq!(
            defs.iter().map(|v| v.name()).collect::<Vec<_>>(),
            ["number", "balance", "opened", "address", "previous"]
        );
        assert!(defs[0].primary_key);
        assert_eq!(defs[0].comment, "Account number");
        assert!(matches!(defs[0].value, Value::Int64(None)));
        assert!(matches!(defs[1].value, Value::Decimal(None)));
        assert!(matches!(defs[2].value, Value::Timestamp(None)));
        assert!(matches!(defs[3].value, Value::Document(None)));
        assert!(defs[3].nested.is_some());
        assert!(defs[1].nested.is_none());
        assert_eq!(defs[3].nested.unwrap()()[0].max_length, Some(8));

        let defs = AuditEvent::fields_defs();
        assert!(matches!(defs[0].value, Value::Varchar(None)));
        assert!(!defs[0].nullable);
        assert!(AuditEvent::primary_key_def().is_none());
    }

    #[test]
    fn document_fields() {
        let account = account();
        assert_eq!(account.primary_key(), Some(Value::Int64(Some(77))));
        let document = account.to_document().expect("The account is valid");
        assert_eq!(
            document.names().collect::<Vec<_>>(),
            [
                ID_FIELD,
                CLASS_FIELD,
                "number",
                "balance",
                "opened",
                "address",
                "previous"
            ]
        );
        assert_eq!(document.get(ID_FIELD), Some(&Value::Int64(Some(77))));
        assert_eq!(
            document.get(CLASS_FIELD),
            Some(&Value::Varchar(Some("CustomerAccount".into())))
        );
        let decoded = CustomerAccount::from_fields(&document).expect("Could not decode");
        assert_eq!(decoded.cache, None);
        assert_eq!(
            decoded,
            CustomerAccount {
                cache: None,
                ..account
            }
        );
    }

    #[test]
    fn generated_identity() {
        let event = AuditEvent {
            message: Box::new("login".into()),
            tags: vec!["auth".into()],
        };
        let first = event.to_document().expect("The event is valid");
        let second = event.to_document().expect("The event is valid");
        let (Some(Value::Uuid(Some(first))), Some(Value::Uuid(Some(second)))) =
            (first.get(ID_FIELD), second.get(ID_FIELD))
        else {
            panic!("Documents without a primary key get a uuid identity");
        };
        assert_ne!(first, second);
        assert_ne!(*first, Uuid::nil());
        assert_eq!(event.primary_key(), None);
    }

    #[test]
    fn validation() {
        let mut invalid = account();
        invalid.address.city = "Rio de Janeiro".into();
        let message = format!("{:#}", invalid.validate().unwrap_err());
        assert!(
            message.contains("While validating field `address`"),
            "{message}"
        );
        assert!(
            message.contains("Field `city` has length 14 exceeding the maximum of 8"),
            "{message}"
        );

        let mut fields = account().to_fields();
        fields.remove("balance");
        let message = format!(
            "{:#}",
            trove::validate_fields(CustomerAccount::fields_defs(), &fields).unwrap_err()
        );
        assert_eq!(message, "Field `balance` is required but it is not set");

        let mut fields = Fields::new();
        fields.insert("message", Value::Varchar(None));
        fields.insert("tags", Vec::<String>::new().into());
        assert!(trove::validate_fields(AuditEvent::fields_defs(), &fields).is_err());
        fields.insert("message", "hello".into());
        assert!(trove::validate_fields(AuditEvent::fields_defs(), &fields).is_ok());
        fields.insert("tags", vec![1_i32].into());
        assert!(trove::validate_fields(AuditEvent::fields_defs(), &fields).is_err());
    }

    #[test]
    fn class_filter() {
        assert!(is_same_or_derived("WideTrade", "WideTrade"));
        assert!(is_same_or_derived("WideTrade.WideSwap", "WideTrade"));
        assert!(!is_same_or_derived("WideTradeX", "WideTrade"));
        assert!(!is_same_or_derived("WideTrade", "WideTrade.WideSwap"));
        assert_eq!(
            CustomerAccount::class_filter(),
            Filter::Class("CustomerAccount".into())
        );
        let document = account().to_document().unwrap();
        assert!(CustomerAccount::class_filter().matches(&document));
        assert!(!AuditEvent::class_filter().matches(&document));
        assert!(
            CustomerAccount::class_filter()
                .and(Filter::eq("number", 77_i64))
                .matches(&document)
        );
        assert!(
            !CustomerAccount::class_filter()
                .and(Filter::eq("number", 77_i32))
                .matches(&document)
        );
    }
}
