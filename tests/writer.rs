#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use time::macros::{date, datetime};
    use trove::{Command, DocumentWriter, Fields, Filter, GenericDocumentWriter, Value};
    use uuid::Uuid;

    const WRITER: GenericDocumentWriter = GenericDocumentWriter {};

    #[test]
    fn write_values() {
        let render = |value: Value| {
            let mut out = String::new();
            WRITER.write_value(&mut out, &value);
            out
        };
        assert_eq!(render(Value::Null), "null");
        assert_eq!(render(Value::Varchar(None)), "null");
        assert_eq!(render(Value::Boolean(Some(false))), "false");
        assert_eq!(render(Value::Int64(Some(-12))), "-12");
        assert_eq!(render(Value::Float64(Some(1.0))), "1.0");
        assert_eq!(render(Value::Float64(Some(f64::INFINITY))), "null");
        assert_eq!(
            render(Value::Decimal(Some(Decimal::from_str("0.10").unwrap()))),
            r#""0.10""#
        );
        assert_eq!(
            render(Value::Varchar(Some("say \"hi\"\n\tto C:\\".into()))),
            r#""say \"hi\"\n\tto C:\\""#
        );
        assert_eq!(render(Value::Varchar(Some("\u{1}".into()))), r#""\u0001""#);
        assert_eq!(render(Value::Date(Some(date!(2025 - 01 - 02)))), r#""2025-01-02""#);
        assert_eq!(
            render(Value::Timestamp(Some(datetime!(2025-01-02 03:04:05)))),
            r#""2025-01-02T03:04:05""#
        );
        assert_eq!(
            render(Value::Uuid(Some(
                Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap()
            ))),
            r#""550e8400-e29b-41d4-a716-446655440000""#
        );
        assert_eq!(
            render(Value::List(Some(vec![]), Box::new(Value::Int32(None)))),
            "[]"
        );
        assert_eq!(render(Value::Document(Some(Fields::new()))), "{}");
    }

    #[test]
    fn write_commands() {
        let leg = Fields::from_iter([
            ("leg_type", Value::Varchar(Some("Fixed".into()))),
            ("leg_ccy", Value::Varchar(None)),
        ]);
        let document = Fields::from_iter([
            ("_id", Value::Varchar(Some("T1".into()))),
            ("_cls", Value::Varchar(Some("DeepSwap".into()))),
            (
                "legs",
                Value::List(
                    Some(vec![Value::Document(Some(leg))]),
                    Box::new(Value::Document(None)),
                ),
            ),
        ]);
        let commands = [
            Command::Upsert {
                collection: "deep_swap".into(),
                document,
            },
            Command::Find {
                collection: "wide_trade".into(),
                filter: Filter::class("WideTrade.WideSwap").and(
                    Filter::eq("trade_id", "T1")
                        .or(Filter::eq("trade_id", "T2"))
                        .negate(),
                ),
                limit: Some(10),
            },
            Command::Find {
                collection: "wide_trade".into(),
                filter: Filter::All,
                limit: None,
            },
            Command::Delete {
                collection: "wide_trade".into(),
                filter: Filter::eq("bond_ccy", "JPY").and(Filter::eq("active", true)),
            },
            Command::DropCollection {
                collection: "wide_trade".into(),
            },
            Command::DropNamespace,
        ];
        assert_eq!(
            commands
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
            indoc! {r#"
                upsert deep_swap {"_id": "T1", "_cls": "DeepSwap", "legs": [{"leg_type": "Fixed", "leg_ccy": null}]}
                find wide_trade where (_cls is WideTrade.WideSwap and not (trade_id == "T1" or trade_id == "T2")) limit 10
                find wide_trade where true
                delete wide_trade where (bond_ccy == "JPY" and active == true)
                drop collection wide_trade
                drop namespace
            "#}
            .trim_end()
        );
    }

    #[test]
    fn write_display() {
        let document = Fields::from_iter([
            ("_id", Value::Int64(Some(1))),
            ("notional", Value::Decimal(Some(Decimal::from_str("1000000").unwrap()))),
            ("maturity", Value::Date(None)),
        ]);
        let mut out = String::new();
        WRITER.write_fields(&mut out, &document);
        assert_eq!(out, r#"{"_id": 1, "notional": "1000000", "maturity": null}"#);
        let command = Command::Upsert {
            collection: "wide_trade".into(),
            document,
        };
        assert_eq!(command.to_string(), format!("upsert wide_trade {out}"));
    }
}
