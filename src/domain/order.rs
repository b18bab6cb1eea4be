// ==========================================
// 电缆订单数据分类工具 - 订单记录与单元格值
// ==========================================
// 职责: 弱类型单元格标量 + 订单行记录 + 输出表头约定
// ==========================================

use calamine::{Data, DataType};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 输入文件中的总订单工作表名
pub const MASTER_SHEET_NAME: &str = "总订单";

/// 错误工作表追加在标准表头之后的错误说明列
pub const ERROR_REASON_HEADER: &str = "错误信息";

/// 输出工作表的标准表头（15 列，交期出现两次）
pub const OUTPUT_HEADERS: [&str; 15] = [
    "产品编码",
    "工单",
    "生产日期",
    "订单日期",
    "订单",
    "单位名称",
    "产品名称",
    "型号",
    "导体米数",
    "分排",
    "交期",
    "绝缘",
    "成缆",
    "外护",
    "交期",
];

/// 按 yyyy/mm/dd 显示的日期列表头
pub const DATE_HEADERS: [&str; 3] = ["生产日期", "订单日期", "交期"];

/// 数据工作表名：截面积 + "mm2" 后缀
pub fn data_sheet_name(cross_section: u32) -> String {
    format!("{}mm2", cross_section)
}

/// 数据工作表的表头行
pub fn output_headers() -> Vec<String> {
    OUTPUT_HEADERS.iter().map(|s| s.to_string()).collect()
}

/// 错误工作表的表头行（标准表头 + 错误说明列）
pub fn error_headers() -> Vec<String> {
    let mut headers = output_headers();
    headers.push(ERROR_REASON_HEADER.to_string());
    headers
}

/// 表头是否为日期列
pub fn is_date_header(header: &str) -> bool {
    DATE_HEADERS.contains(&header)
}

// ==========================================
// CellValue - 弱类型单元格标量
// ==========================================

/// 源表单元格的弱类型标量：文本 / 数值 / 日期 / 空。
///
/// 分类流程不解释除产品名称、导体米数与日期列之外的字段内容，
/// 只负责原样搬运到输出工作簿。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// 从 calamine 单元格转换（文本去除首尾空白，空白文本视为空）
    pub fn from_data(data: &Data) -> CellValue {
        match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(trimmed.to_string())
                }
            }
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Text(b.to_string()),
            Data::DateTime(_) | Data::DateTimeIso(_) => data
                .as_datetime()
                .map(CellValue::DateTime)
                .unwrap_or(CellValue::Empty),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(_) => CellValue::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 用于列宽计算与错误消息的显示字符串
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::DateTime(dt) => {
                if dt.time() == chrono::NaiveTime::MIN {
                    dt.format("%Y/%m/%d").to_string()
                } else {
                    dt.format("%Y/%m/%d %H:%M:%S").to_string()
                }
            }
        }
    }

    /// 显示宽度（字符数）
    pub fn display_width(&self) -> usize {
        self.to_display_string().chars().count()
    }
}

// ==========================================
// OrderRow - 订单行记录
// ==========================================

/// 一行订单的固定字段集合。
///
/// 除产品名称外所有字段均为弱类型标量且允许为空；产品名称为空的行
/// 只能进入错误工作表。交期在输出中重复写入第 11 列与第 15 列。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRow {
    /// 产品编码
    pub product_code: CellValue,
    /// 工单
    pub work_order: CellValue,
    /// 生产日期
    pub production_date: CellValue,
    /// 订单日期
    pub order_date: CellValue,
    /// 订单
    pub order_no: CellValue,
    /// 单位名称
    pub customer_name: CellValue,
    /// 产品名称（空单元格归一化为 None）
    pub product_name: Option<String>,
    /// 型号
    pub model: CellValue,
    /// 导体米数（兼容源列名"数量"）
    pub conductor_length: CellValue,
    /// 分排
    pub batching_group: CellValue,
    /// 交期
    pub delivery_date: CellValue,
    /// 绝缘
    pub insulation: CellValue,
    /// 成缆
    pub cabling: CellValue,
    /// 外护
    pub outer_sheath: CellValue,
}

impl OrderRow {
    /// 构造 15 列输出数据行（与 OUTPUT_HEADERS 同序）
    pub fn to_output_cells(&self) -> Vec<CellValue> {
        let name_cell = match &self.product_name {
            Some(name) => CellValue::Text(name.clone()),
            None => CellValue::Empty,
        };
        vec![
            self.product_code.clone(),
            self.work_order.clone(),
            self.production_date.clone(),
            self.order_date.clone(),
            self.order_no.clone(),
            self.customer_name.clone(),
            name_cell,
            self.model.clone(),
            self.conductor_length.clone(),
            self.batching_group.clone(),
            self.delivery_date.clone(),
            self.insulation.clone(),
            self.cabling.clone(),
            self.outer_sheath.clone(),
            self.delivery_date.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_cell_from_data_trims_text() {
        assert_eq!(
            CellValue::from_data(&Data::String("  ABC  ".to_string())),
            CellValue::Text("ABC".to_string())
        );
        assert_eq!(
            CellValue::from_data(&Data::String("   ".to_string())),
            CellValue::Empty
        );
    }

    #[test]
    fn test_cell_display_string() {
        assert_eq!(CellValue::Number(16.0).to_display_string(), "16");
        assert_eq!(CellValue::Number(2.5).to_display_string(), "2.5");
        let dt = NaiveDate::from_ymd_opt(2025, 1, 20)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(CellValue::DateTime(dt).to_display_string(), "2025/01/20");
    }

    #[test]
    fn test_data_sheet_name() {
        assert_eq!(data_sheet_name(16), "16mm2");
        assert_eq!(data_sheet_name(165), "165mm2");
    }

    #[test]
    fn test_output_cells_duplicate_delivery_date() {
        let row = OrderRow {
            product_code: CellValue::Text("P001".to_string()),
            work_order: CellValue::Empty,
            production_date: CellValue::Empty,
            order_date: CellValue::Empty,
            order_no: CellValue::Empty,
            customer_name: CellValue::Empty,
            product_name: Some("XLV-3×16".to_string()),
            model: CellValue::Empty,
            conductor_length: CellValue::Number(100.0),
            batching_group: CellValue::Empty,
            delivery_date: CellValue::Text("月底".to_string()),
            insulation: CellValue::Empty,
            cabling: CellValue::Empty,
            outer_sheath: CellValue::Empty,
        };

        let cells = row.to_output_cells();
        assert_eq!(cells.len(), OUTPUT_HEADERS.len());
        assert_eq!(cells[6], CellValue::Text("XLV-3×16".to_string()));
        assert_eq!(cells[10], cells[14]);
    }
}
