// ==========================================
// 电缆订单数据分类工具 - 属性提取
// ==========================================
// 职责: 从产品名称解码导体材质与截面积
// ==========================================

use crate::domain::ConductorType;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// 铝导体标记（区分大小写，不做归一化）
const ALUMINUM_MARKER: &str = "LV";

/// 截面积模式: "-<芯数>×<截面积>"，捕获组为完整的截面积数字段。
/// 贪婪匹配保证多位数不会被截断（如 165 不会只取 16）。
static CROSS_SECTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-\d+×(\d+)").expect("截面积正则表达式无效"));

/// 判断导体材质
///
/// 名称中出现 "LV" 即为铝导体，否则为铜导体。空名称同样落入
/// 铜导体分支——这是沿袭自源流程的默认值，调用方对空名称应
/// 先走错误分支，此处不将其视为错误。
pub fn classify_conductor(name: &str) -> ConductorType {
    if name.contains(ALUMINUM_MARKER) {
        ConductorType::Aluminum
    } else {
        ConductorType::Copper
    }
}

/// 从产品名称提取截面积（mm²）
///
/// 模式不匹配返回 None；数字段超出 u32 范围等内部故障记录日志后
/// 同样按"未匹配"处理，绝不中断调用方流程。
pub fn extract_cross_section(name: &str) -> Option<u32> {
    let captures = CROSS_SECTION_RE.captures(name)?;
    let digits = captures.get(1)?.as_str();

    match digits.parse::<u32>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(product_name = %name, digits = %digits, error = %e, "截面积数字段解析失败");
            None
        }
    }
}
