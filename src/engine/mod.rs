// ==========================================
// 电缆订单数据分类工具 - 引擎层
// ==========================================
// 职责: 属性提取、行路由、运行编排
// ==========================================

pub mod attribute;
pub mod orchestrator;
pub mod router;

pub use attribute::{classify_conductor, extract_cross_section};
pub use orchestrator::{ClassifyOrchestrator, RunOutput};
pub use router::{RoutedRow, RowRouter, RowTarget};
