// ==========================================
// 电缆订单数据分类工具 - 导入层
// ==========================================
// 职责: 读取总订单表，定位并映射必需列
// ==========================================

pub mod field_mapper;
pub mod file_parser;

pub use field_mapper::FieldMapper;
pub use file_parser::{OrderTableParser, RawTable};
