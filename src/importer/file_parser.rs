// ==========================================
// 电缆订单数据分类工具 - 输入文件解析器
// ==========================================
// 支持: Excel (.xlsx/.xls)
// 约定: 数据位于名为"总订单"的工作表，首行为表头
// ==========================================

use crate::domain::{CellValue, MASTER_SHEET_NAME};
use crate::error::{ClassifyError, ClassifyResult};
use calamine::{open_workbook_auto, Reader};
use std::path::Path;

/// 解析后的原始表格：表头 + 按位置对齐的数据行
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

// ==========================================
// OrderTableParser - 总订单表解析器
// ==========================================
pub struct OrderTableParser;

impl OrderTableParser {
    /// 解析输入文件的总订单工作表
    ///
    /// 完全空白的数据行在此处被丢弃，后续流程只看到非空行。
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ClassifyResult<RawTable> {
        let path = file_path.as_ref();

        // 检查文件存在
        if !path.exists() {
            return Err(ClassifyError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(ClassifyError::UnsupportedFormat(ext));
        }

        // 打开 Excel 文件
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| ClassifyError::ExcelParseError(e.to_string()))?;

        // 总订单工作表必须存在
        if !workbook
            .sheet_names()
            .iter()
            .any(|name| name == MASTER_SHEET_NAME)
        {
            return Err(ClassifyError::SheetNotFound(MASTER_SHEET_NAME.to_string()));
        }

        let range = workbook
            .worksheet_range(MASTER_SHEET_NAME)
            .map_err(|e| ClassifyError::ExcelParseError(e.to_string()))?;

        // 提取表头（第一行）
        let mut rows_iter = range.rows();
        let header_row = rows_iter
            .next()
            .ok_or_else(|| ClassifyError::ExcelParseError("总订单工作表无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        // 读取数据行，跳过完全空白的行
        let mut rows = Vec::new();
        for data_row in rows_iter {
            let cells: Vec<CellValue> = data_row.iter().map(CellValue::from_data).collect();
            if cells.iter().all(CellValue::is_empty) {
                continue;
            }
            rows.push(cells);
        }

        Ok(RawTable { headers, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    fn write_fixture(dir: &TempDir, sheet: &str, rows: &[&[&str]]) -> std::path::PathBuf {
        let path = dir.path().join("input.xlsx");
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                worksheet
                    .write_string(r as u32, c as u16, *value)
                    .unwrap();
            }
        }
        workbook.save(&path).unwrap();
        path
    }

    #[test]
    fn test_parse_basic_table() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            MASTER_SHEET_NAME,
            &[&["产品名称", "型号"], &["XLV-3×16", "YJLV"]],
        );

        let table = OrderTableParser.parse(&path).unwrap();
        assert_eq!(table.headers, vec!["产品名称", "型号"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(
            table.rows[0][0],
            CellValue::Text("XLV-3×16".to_string())
        );
    }

    #[test]
    fn test_parse_skips_empty_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            MASTER_SHEET_NAME,
            &[
                &["产品名称", "型号"],
                &["XLV-3×16", "YJLV"],
                &["", ""],
                &["XLPE-3×25", "YJV"],
            ],
        );

        let table = OrderTableParser.parse(&path).unwrap();
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_parse_missing_master_sheet() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "别的表", &[&["产品名称"]]);

        let result = OrderTableParser.parse(&path);
        assert!(matches!(result, Err(ClassifyError::SheetNotFound(_))));
    }

    #[test]
    fn test_parse_file_not_found() {
        let result = OrderTableParser.parse(Path::new("不存在.xlsx"));
        assert!(matches!(result, Err(ClassifyError::FileNotFound(_))));
    }

    #[test]
    fn test_parse_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("input.csv");
        std::fs::write(&path, "产品名称\nXLV-3×16\n").unwrap();

        let result = OrderTableParser.parse(&path);
        assert!(matches!(result, Err(ClassifyError::UnsupportedFormat(_))));
    }
}
