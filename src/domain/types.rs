// ==========================================
// 电缆订单数据分类工具 - 领域枚举类型
// ==========================================
// 职责: 导体材质分类与命名约定
// ==========================================

use serde::{Deserialize, Serialize};

/// 导体材质类型
///
/// 产品名称包含 "LV" 标记的为铝导体，其余一律视为铜导体。
/// 该枚举是全函数的值域：任何输入都能得到一个材质，不存在"未知"。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConductorType {
    /// 铝导体
    Aluminum,
    /// 铜导体
    Copper,
}

impl ConductorType {
    /// 中文材质名称
    pub fn label(&self) -> &'static str {
        match self {
            ConductorType::Aluminum => "铝导体",
            ConductorType::Copper => "铜导体",
        }
    }

    /// 该材质对应的错误数据工作表名
    pub fn error_sheet_name(&self) -> &'static str {
        match self {
            ConductorType::Aluminum => "铝导体错误数据",
            ConductorType::Copper => "铜导体错误数据",
        }
    }

    /// 该材质输出工作簿的固定文件名
    pub fn workbook_file_name(&self) -> &'static str {
        match self {
            ConductorType::Aluminum => "铝导体安排.xlsx",
            ConductorType::Copper => "铜导体安排.xlsx",
        }
    }
}

impl std::fmt::Display for ConductorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(ConductorType::Aluminum.label(), "铝导体");
        assert_eq!(ConductorType::Copper.label(), "铜导体");
    }

    #[test]
    fn test_sheet_and_file_names() {
        assert_eq!(ConductorType::Aluminum.error_sheet_name(), "铝导体错误数据");
        assert_eq!(ConductorType::Copper.error_sheet_name(), "铜导体错误数据");
        assert_eq!(
            ConductorType::Aluminum.workbook_file_name(),
            "铝导体安排.xlsx"
        );
        assert_eq!(ConductorType::Copper.workbook_file_name(), "铜导体安排.xlsx");
    }
}
