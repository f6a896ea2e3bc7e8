//! 输出表格布局
//!
//! 源表的列原样保留，在地址列之后插入地址拆分列，在订单状态列之后插入汇总列，
//! 并去掉 `SourceColumns::dropped` 指定的列。

use crate::classifier::{PaymentAction, RowAnnotation};
use crate::row::SourceColumns;

/// 插入的派生列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedColumn {
    Province,
    City,
    District,
    Detail,
    Total,
    Coupon,
    Review,
    Sticker,
    Commission,
}

impl DerivedColumn {
    pub const ADDRESS_BLOCK: [DerivedColumn; 4] = [
        DerivedColumn::Province,
        DerivedColumn::City,
        DerivedColumn::District,
        DerivedColumn::Detail,
    ];

    pub const SUMMARY_BLOCK: [DerivedColumn; 5] = [
        DerivedColumn::Total,
        DerivedColumn::Coupon,
        DerivedColumn::Review,
        DerivedColumn::Sticker,
        DerivedColumn::Commission,
    ];

    /// 表头文字
    pub fn title(&self) -> &'static str {
        match self {
            DerivedColumn::Province => "省",
            DerivedColumn::City => "市",
            DerivedColumn::District => "县/区",
            DerivedColumn::Detail => "详细地址",
            DerivedColumn::Total => "合计",
            DerivedColumn::Coupon => "美团券",
            DerivedColumn::Review => "好评",
            DerivedColumn::Sticker => "是否贴画",
            DerivedColumn::Commission => "线下交提成",
        }
    }
}

/// 输出列的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Source(usize),
    Derived(DerivedColumn),
}

/// 输出单元格的值
#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue {
    /// 照搬源表第n列
    Source(usize),
    Text(String),
    Number(f64),
    Blank,
}

/// 输出单元格
#[derive(Debug, Clone, PartialEq)]
pub struct OutputCell {
    pub value: OutputValue,
    /// 标红（未支付的费用列）
    pub highlight: bool,
}

impl OutputCell {
    fn plain(value: OutputValue) -> Self {
        Self { value, highlight: false }
    }

    fn text(text: &str) -> Self {
        if text.is_empty() {
            Self::plain(OutputValue::Blank)
        } else {
            Self::plain(OutputValue::Text(text.to_string()))
        }
    }

    fn flag(set: bool) -> Self {
        Self::plain(if set { OutputValue::Number(1.0) } else { OutputValue::Blank })
    }
}

/// 输出布局
#[derive(Debug, Clone)]
pub struct OutputLayout {
    columns: SourceColumns,
    slots: Vec<Slot>,
}

impl OutputLayout {
    /// `source_width` 为源表的最大列数
    pub fn new(columns: SourceColumns, source_width: usize) -> Self {
        let width = source_width
            .max(columns.address + 1)
            .max(columns.order_status + 1);

        let mut slots = Vec::with_capacity(width + 9);
        for index in 0..width {
            if !columns.dropped.contains(&index) {
                slots.push(Slot::Source(index));
            }
            if index == columns.address {
                slots.extend(DerivedColumn::ADDRESS_BLOCK.map(Slot::Derived));
            }
            if index == columns.order_status {
                slots.extend(DerivedColumn::SUMMARY_BLOCK.map(Slot::Derived));
            }
        }

        Self { columns, slots }
    }

    pub fn width(&self) -> usize {
        self.slots.len()
    }

    /// 派生列在输出中的位置
    pub fn position(&self, column: DerivedColumn) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Slot::Derived(column))
    }

    /// 源列在输出中的位置（被丢弃时为 `None`）
    pub fn source_position(&self, index: usize) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Slot::Source(index))
    }

    /// 表头行：源表头照搬，派生列写入标题
    pub fn header(&self) -> Vec<OutputCell> {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Source(index) => OutputCell::plain(OutputValue::Source(*index)),
                Slot::Derived(column) => OutputCell::text(column.title()),
            })
            .collect()
    }

    /// 数据行
    ///
    /// `annotation` 为 `None`（列数不足的行）时源列照搬、派生列留空。
    pub fn render(&self, annotation: Option<&RowAnnotation>) -> Vec<OutputCell> {
        self.slots
            .iter()
            .map(|slot| match (slot, annotation) {
                (Slot::Source(index), Some(annotation)) => self.render_source(*index, annotation),
                (Slot::Source(index), None) => OutputCell::plain(OutputValue::Source(*index)),
                (Slot::Derived(column), Some(annotation)) => render_derived(*column, annotation),
                (Slot::Derived(_), None) => OutputCell::plain(OutputValue::Blank),
            })
            .collect()
    }

    fn render_source(&self, index: usize, annotation: &RowAnnotation) -> OutputCell {
        let columns = &self.columns;
        let source = OutputCell::plain(OutputValue::Source(index));

        if index == columns.order_status {
            return OutputCell::text(annotation.fees.status.label());
        }

        if [columns.repair_fee, columns.material_fee, columns.payment_status].contains(&index) {
            return match annotation.payment {
                PaymentAction::ClearFees => OutputCell::plain(OutputValue::Blank),
                PaymentAction::HighlightFees => OutputCell { highlight: true, ..source },
                PaymentAction::Keep => source,
            };
        }

        if index == columns.dispatcher {
            if let Some(label) = &annotation.dispatch_label {
                return OutputCell::text(label);
            }
        }

        if index == columns.appointment {
            if let Some(date) = &annotation.appointment_date {
                return OutputCell::text(date);
            }
        }

        if index == columns.follow_up {
            if let Some(note) = &annotation.follow_up_note {
                return OutputCell::text(note);
            }
        }

        source
    }
}

fn render_derived(column: DerivedColumn, annotation: &RowAnnotation) -> OutputCell {
    let signals = annotation.feedback.as_ref();
    match column {
        DerivedColumn::Province => OutputCell::text(annotation.address.province_str()),
        DerivedColumn::City => OutputCell::text(annotation.address.city_str()),
        DerivedColumn::District => OutputCell::text(annotation.address.district_str()),
        DerivedColumn::Detail => OutputCell::text(&annotation.address.detail),
        DerivedColumn::Total => OutputCell::plain(OutputValue::Number(annotation.fees.total)),
        DerivedColumn::Coupon => OutputCell::plain(
            annotation
                .coupon_amount
                .map(OutputValue::Number)
                .unwrap_or(OutputValue::Blank),
        ),
        DerivedColumn::Review => OutputCell::flag(signals.is_some_and(|s| s.review)),
        DerivedColumn::Sticker => OutputCell::flag(signals.is_some_and(|s| s.sticker)),
        DerivedColumn::Commission => OutputCell::plain(
            annotation
                .commission()
                .map(OutputValue::Number)
                .unwrap_or(OutputValue::Blank),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classifier;
    use crate::row::Row;
    use crate::rules::ClassifierRules;

    fn column_letter(index: usize) -> char {
        (b'A' + index as u8) as char
    }

    #[test]
    fn test_default_layout_positions() {
        let layout = OutputLayout::new(SourceColumns::default(), 17);

        // E〜H: 地址拆分, K: 订单状态, L〜P: 汇总
        assert_eq!(layout.position(DerivedColumn::Province).map(column_letter), Some('E'));
        assert_eq!(layout.position(DerivedColumn::Detail).map(column_letter), Some('H'));
        assert_eq!(layout.source_position(6).map(column_letter), Some('K'));
        assert_eq!(layout.position(DerivedColumn::Total).map(column_letter), Some('L'));
        assert_eq!(layout.position(DerivedColumn::Commission).map(column_letter), Some('P'));

        // 第7、12、13列被去掉
        assert_eq!(layout.source_position(7), None);
        assert_eq!(layout.source_position(12), None);
        assert_eq!(layout.source_position(13), None);

        // 维修费 Q, 支付状态 S, 派单师傅 T, 预约 U, 跟单备注 V, 回访 W
        assert_eq!(layout.source_position(8).map(column_letter), Some('Q'));
        assert_eq!(layout.source_position(10).map(column_letter), Some('S'));
        assert_eq!(layout.source_position(11).map(column_letter), Some('T'));
        assert_eq!(layout.source_position(14).map(column_letter), Some('U'));
        assert_eq!(layout.source_position(16).map(column_letter), Some('W'));
        assert_eq!(layout.width(), 17 + 9 - 3);
    }

    #[test]
    fn test_narrow_sheet_still_has_blocks() {
        let layout = OutputLayout::new(SourceColumns::default(), 2);
        assert!(layout.position(DerivedColumn::Province).is_some());
        assert!(layout.position(DerivedColumn::Total).is_some());
    }

    #[test]
    fn test_header() {
        let layout = OutputLayout::new(SourceColumns::default(), 17);
        let header = layout.header();
        let province = layout.position(DerivedColumn::Province).unwrap();
        assert_eq!(header[province].value, OutputValue::Text("省".into()));
        assert_eq!(header[0].value, OutputValue::Source(0));
    }

    #[test]
    fn test_render_annotated_row() {
        let classifier =
            Classifier::new(ClassifierRules::default(), SourceColumns::default()).unwrap();
        let mut cells = vec![String::new(); 17];
        cells[3] = "广东省广州市天河区某某路1号".into();
        cells[8] = "30".into();
        cells[10] = "未支付".into();
        cells[11] = "测试1".into();
        cells[16] = "验券20，提50，好评".into();
        let annotation = classifier.classify_row(&Row::new(cells)).unwrap();

        let layout = OutputLayout::new(SourceColumns::default(), 17);
        let rendered = layout.render(Some(&annotation));
        let at = |column| &rendered[layout.position(column).unwrap()];

        assert_eq!(at(DerivedColumn::Province).value, OutputValue::Text("广东省".into()));
        assert_eq!(at(DerivedColumn::Total).value, OutputValue::Number(80.0));
        assert_eq!(at(DerivedColumn::Coupon).value, OutputValue::Number(50.0));
        assert_eq!(at(DerivedColumn::Review).value, OutputValue::Number(1.0));
        assert_eq!(at(DerivedColumn::Sticker).value, OutputValue::Blank);
        assert_eq!(at(DerivedColumn::Commission).value, OutputValue::Number(50.0));

        let status = &rendered[layout.source_position(6).unwrap()];
        assert_eq!(status.value, OutputValue::Text("成功订单".into()));

        let repair = &rendered[layout.source_position(8).unwrap()];
        assert_eq!(repair.value, OutputValue::Source(8));
        assert!(repair.highlight);

        let dispatcher = &rendered[layout.source_position(11).unwrap()];
        assert_eq!(dispatcher.value, OutputValue::Text("广州市-未派出".into()));
    }

    #[test]
    fn test_render_cleared_fees() {
        let classifier =
            Classifier::new(ClassifierRules::default(), SourceColumns::default()).unwrap();
        let mut cells = vec![String::new(); 12];
        cells[3] = "某小区".into();
        cells[8] = "30".into();
        cells[10] = "无需支付".into();
        let annotation = classifier.classify_row(&Row::new(cells)).unwrap();

        let layout = OutputLayout::new(SourceColumns::default(), 12);
        let rendered = layout.render(Some(&annotation));
        for index in [8, 9, 10] {
            assert_eq!(rendered[layout.source_position(index).unwrap()].value, OutputValue::Blank);
        }
        let detail = &rendered[layout.position(DerivedColumn::Detail).unwrap()];
        assert_eq!(detail.value, OutputValue::Text("某小区".into()));
        let total = &rendered[layout.position(DerivedColumn::Total).unwrap()];
        assert_eq!(total.value, OutputValue::Number(0.0));
    }

    #[test]
    fn test_render_without_annotation() {
        let layout = OutputLayout::new(SourceColumns::default(), 17);
        let rendered = layout.render(None);
        assert_eq!(rendered[1].value, OutputValue::Source(1));
        let total = &rendered[layout.position(DerivedColumn::Total).unwrap()];
        assert_eq!(total.value, OutputValue::Blank);
    }
}
