use time::Date;
use trove::Document;

/// Data nested inside [`DerivedRecordMock`].
#[derive(Document, Default, Debug, Clone, PartialEq)]
#[trove(embedded)]
pub struct SimpleDataMock {
    pub string_element: Option<String>,
    pub int_element: Option<i32>,
}

#[derive(Document, Default, Debug, Clone, PartialEq)]
pub struct SimpleRecordMock {
    #[trove(primary_key)]
    pub simple_id: String,
    pub string_element: Option<String>,
    pub int_element: Option<i32>,
    pub long_element: Option<i64>,
    pub bool_element: Option<bool>,
}

/// Record derived from [`SimpleRecordMock`].
#[derive(Document, Default, Debug, Clone, PartialEq)]
pub struct DerivedRecordMock {
    #[trove(extends)]
    pub base: SimpleRecordMock,
    /// Double element.
    pub float_element: Option<f64>,
    /// Date element.
    pub date_element: Option<Date>,
    /// Simple data element.
    pub data_element: Option<SimpleDataMock>,
}
