// ==========================================
// 电缆订单数据分类工具 - 输出工作簿聚合
// ==========================================
// 职责: 打开或新建输出工作簿，按名称查找/创建工作表，追加数据行
// 不变式: 工作表创建按名称幂等；行只增不改；历史数据跨运行保留
// ==========================================

use crate::domain::CellValue;
use crate::error::{ClassifyError, ClassifyResult};
use calamine::{open_workbook_auto, Reader};
use std::path::Path;
use tracing::debug;

/// 新建工作簿自带的占位工作表名（写出前由调用方删除）
pub const DEFAULT_SHEET_NAME: &str = "Sheet";

/// 一张输出工作表：名称 + 表头行 + 数据行
#[derive(Debug, Clone, PartialEq)]
pub struct SheetData {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetData {
    /// 追加一行（只增不改）
    pub fn append_row(&mut self, cells: Vec<CellValue>) {
        self.rows.push(cells);
    }
}

// ==========================================
// OutputWorkbook - 输出工作簿聚合
// ==========================================
//
// 整个运行期间由编排器独占持有，内存中完成全部修改后一次性
// 序列化为字节缓冲，避免对文件句柄的共享可变状态。
#[derive(Debug, Clone)]
pub struct OutputWorkbook {
    sheets: Vec<SheetData>,
}

impl OutputWorkbook {
    /// 新建空工作簿（含默认占位工作表，与 Excel 新建文件语义一致）
    pub fn new() -> Self {
        OutputWorkbook {
            sheets: vec![SheetData {
                name: DEFAULT_SHEET_NAME.to_string(),
                headers: Vec::new(),
                rows: Vec::new(),
            }],
        }
    }

    /// 打开已有输出文件，不存在则新建
    ///
    /// 已有文件逐表载入：首行作为表头，其余作为数据行，单元格类型
    /// 原样保留，保证上一次运行的结果在本次追加后不丢失。
    pub fn open_or_create<P: AsRef<Path>>(path: P) -> ClassifyResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "输出文件不存在，新建工作簿");
            return Ok(Self::new());
        }

        let mut workbook = open_workbook_auto(path)
            .map_err(|e| ClassifyError::ExcelParseError(e.to_string()))?;

        let mut sheets = Vec::new();
        let sheet_names = workbook.sheet_names().to_owned();
        for name in sheet_names {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| ClassifyError::ExcelParseError(e.to_string()))?;

            let mut rows_iter = range.rows();
            let headers: Vec<String> = rows_iter
                .next()
                .map(|row| {
                    row.iter()
                        .map(|cell| cell.to_string().trim().to_string())
                        .collect()
                })
                .unwrap_or_default();

            let rows: Vec<Vec<CellValue>> = rows_iter
                .map(|row| row.iter().map(CellValue::from_data).collect())
                .collect();

            sheets.push(SheetData {
                name,
                headers,
                rows,
            });
        }

        debug!(path = %path.display(), sheet_count = sheets.len(), "载入已有输出工作簿");
        Ok(OutputWorkbook { sheets })
    }

    /// 删除默认占位工作表（存在时）
    pub fn remove_default_sheet(&mut self) {
        self.sheets.retain(|s| s.name != DEFAULT_SHEET_NAME);
    }

    /// 按名称取工作表，不存在则以给定表头创建
    ///
    /// 按名称幂等：同名重复调用返回同一张表，绝不重复写表头。
    pub fn get_or_create_sheet(&mut self, name: &str, headers: &[String]) -> &mut SheetData {
        let idx = match self.sheets.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.sheets.push(SheetData {
                    name: name.to_string(),
                    headers: headers.to_vec(),
                    rows: Vec::new(),
                });
                self.sheets.len() - 1
            }
        };
        &mut self.sheets[idx]
    }

    /// 按名称查找工作表
    pub fn sheet(&self, name: &str) -> Option<&SheetData> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheets(&self) -> &[SheetData] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// 序列化为自包含的 xlsx 字节缓冲
    pub fn serialize(&self) -> ClassifyResult<Vec<u8>> {
        crate::workbook::writer::serialize(self)
    }
}

impl Default for OutputWorkbook {
    fn default() -> Self {
        Self::new()
    }
}
