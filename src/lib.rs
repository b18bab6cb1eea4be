// ==========================================
// 电缆订单数据分类工具 - 核心库
// ==========================================
// 职责: 将总订单表按导体材质与截面积分拣到两个输出工作簿，
//       增量合并已有输出，异常行归入错误工作表并生成处理报告
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 订单记录与材质类型
pub mod domain;

// 导入层 - 总订单表读取与字段映射
pub mod importer;

// 引擎层 - 属性提取、行路由与运行编排
pub mod engine;

// 输出层 - 工作簿聚合与序列化
pub mod workbook;

// 错误类型
pub mod error;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{CellValue, ConductorType, OrderRow};

// 引擎
pub use engine::{classify_conductor, extract_cross_section, ClassifyOrchestrator, RunOutput};

// 输出工作簿
pub use workbook::OutputWorkbook;

// 错误
pub use error::{ClassifyError, ClassifyResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "电缆订单数据分类工具";
