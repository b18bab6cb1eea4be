// ==========================================
// 电缆订单数据分类工具 - 行路由器
// ==========================================
// 职责: 每行的四分支决策（空名称/截面积缺失/行级故障/成功）
// 不变式: 每行恰好产生一条落入唯一工作表的记录，互斥且全覆盖
// ==========================================

use crate::domain::{data_sheet_name, CellValue, ConductorType};
use crate::engine::attribute::{classify_conductor, extract_cross_section};
use crate::importer::FieldMapper;
use tracing::warn;

/// 行的落点：某截面积的数据工作表，或材质对应的错误工作表
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowTarget {
    Data { sheet_name: String },
    Error { reason: String },
}

/// 一行的路由结果
///
/// `cells` 即待追加的输出行；错误分支已含末列错误说明。
/// `report_error` 是汇总到处理报告中的行级错误消息（成功分支为 None）。
#[derive(Debug, Clone)]
pub struct RoutedRow {
    pub conductor: ConductorType,
    pub target: RowTarget,
    pub cells: Vec<CellValue>,
    pub report_error: Option<String>,
}

// ==========================================
// RowRouter - 行路由器
// ==========================================
pub struct RowRouter<'a> {
    mapper: &'a FieldMapper,
}

impl<'a> RowRouter<'a> {
    pub fn new(mapper: &'a FieldMapper) -> Self {
        RowRouter { mapper }
    }

    /// 路由一行。任何行内故障都被折算进返回值，绝不向上抛出。
    ///
    /// 分支按序求值，先中先得：空名称先于映射故障判定，名称与
    /// 其他字段同时异常的行以"产品名称为空"为准。
    /// `row_number` 为从 1 开始的数据行号（不含表头）。
    pub fn route(&self, cells: &[CellValue], row_number: usize) -> RoutedRow {
        // 分支 1: 产品名称为空。直接看原始单元格，不经过完整映射，
        // 无名称可分类时沿袭默认铜导体落点。
        if self.mapper.raw_product_name(cells).is_none() {
            let conductor = classify_conductor("");
            let mut out = self.mapper.output_cells_lossy(cells);
            out.push(CellValue::Text("产品名称为空".to_string()));
            return RoutedRow {
                conductor,
                target: RowTarget::Error {
                    reason: "产品名称为空".to_string(),
                },
                cells: out,
                report_error: Some(format!("第 {} 行：产品名称为空，无法处理。", row_number)),
            };
        }

        // 分支 3 的入口：名称在场时字段映射失败即行级故障
        let order = match self.mapper.map_row(cells, row_number) {
            Ok(order) => order,
            Err(fault) => return self.route_fault(cells, row_number, fault.to_string()),
        };

        let name = order.product_name.clone().unwrap_or_default();
        let conductor = classify_conductor(&name);

        // 分支 2: 截面积无法解析
        let cross_section = match extract_cross_section(&name) {
            Some(value) => value,
            None => {
                let mut out = order.to_output_cells();
                out.push(CellValue::Text("无法提取横截面积".to_string()));
                return RoutedRow {
                    conductor,
                    target: RowTarget::Error {
                        reason: "无法提取横截面积".to_string(),
                    },
                    cells: out,
                    report_error: Some(format!(
                        "第 {} 行：无法提取横截面积，产品名称：{}",
                        row_number, name
                    )),
                };
            }
        };

        // 分支 4: 成功
        RoutedRow {
            conductor,
            target: RowTarget::Data {
                sheet_name: data_sheet_name(cross_section),
            },
            cells: order.to_output_cells(),
            report_error: None,
        }
    }

    /// 分支 3: 行级处理故障。材质按原始名称单元格尽力分类，
    /// 无名称时与分支 1 相同落入铜导体默认值。
    fn route_fault(&self, cells: &[CellValue], row_number: usize, fault: String) -> RoutedRow {
        let name = self.mapper.raw_product_name(cells).unwrap_or_default();
        let conductor = classify_conductor(&name);

        warn!(row_number, error = %fault, product_name = %name, "行处理失败");

        let mut out = self.mapper.output_cells_lossy(cells);
        out.push(CellValue::Text(format!("处理失败：{}", fault)));

        RoutedRow {
            conductor,
            target: RowTarget::Error {
                reason: format!("处理失败：{}", fault),
            },
            cells: out,
            report_error: Some(format!(
                "第 {} 行：处理失败，原因：{}，产品名称：{}",
                row_number, fault, name
            )),
        }
    }
}
