// ==========================================
// 电缆订单数据分类工具 - 输出工作簿层
// ==========================================
// 职责: 输出工作簿聚合与 xlsx 序列化
// ==========================================

pub mod store;
pub mod writer;

pub use store::{OutputWorkbook, SheetData, DEFAULT_SHEET_NAME};
