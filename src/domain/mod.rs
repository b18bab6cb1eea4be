// ==========================================
// 电缆订单数据分类工具 - 领域层
// ==========================================
// 职责: 订单记录、单元格标量与材质枚举
// ==========================================

pub mod order;
pub mod types;

pub use order::{
    data_sheet_name, error_headers, is_date_header, output_headers, CellValue, OrderRow,
    DATE_HEADERS, ERROR_REASON_HEADER, MASTER_SHEET_NAME, OUTPUT_HEADERS,
};
pub use types::ConductorType;
