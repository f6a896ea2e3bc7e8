//! Order Sheet Common Library
//!
//! 工单行分类核心：地址拆分、回访解析、费用合计、派单标签，
//! 以及输出布局和销售记录SQL生成。均为无状态纯函数，不做任何I/O。

pub mod address;
pub mod classifier;
pub mod derived;
pub mod dispatcher;
pub mod error;
pub mod feedback;
pub mod fees;
pub mod layout;
pub mod row;
pub mod rules;
pub mod sales_sql;

pub use address::{parse_address, ParsedAddress};
pub use classifier::{Classifier, PaymentAction, RowAnnotation};
pub use derived::{Derived, Fallback};
pub use dispatcher::map_status;
pub use error::{Error, Result};
pub use feedback::{extract_commission, FeedbackSignals};
pub use fees::{classify_fees, FeeSummary, OrderStatus};
pub use layout::{DerivedColumn, OutputCell, OutputLayout, OutputValue};
pub use row::{Row, SourceColumns};
pub use rules::{ClassifierRules, DispatcherTable};
pub use sales_sql::{build_sales_sql, SalesCatalog, SkipReason, SkippedLine, SqlBatch};
