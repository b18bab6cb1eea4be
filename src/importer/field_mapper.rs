// ==========================================
// 电缆订单数据分类工具 - 字段映射器
// ==========================================
// 职责: 表头列定位 + 原始行 → OrderRow 映射 + 类型收敛
// ==========================================

use crate::domain::{CellValue, OrderRow};
use crate::error::{ClassifyError, ClassifyResult};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// 必需列在表头中的位置索引
#[derive(Debug, Clone)]
struct ColumnIndexes {
    product_code: usize,
    work_order: usize,
    production_date: usize,
    order_date: usize,
    order_no: usize,
    customer_name: usize,
    product_name: usize,
    model: usize,
    conductor_length: usize,
    batching_group: usize,
    delivery_date: usize,
    insulation: usize,
    cabling: usize,
    outer_sheath: usize,
}

// ==========================================
// FieldMapper - 字段映射器
// ==========================================
pub struct FieldMapper {
    columns: ColumnIndexes,
}

impl FieldMapper {
    /// 从表头构造映射器；任一必需列缺失即为整个运行级错误
    pub fn from_headers(headers: &[String]) -> ClassifyResult<Self> {
        Ok(FieldMapper {
            columns: ColumnIndexes {
                product_code: Self::find_column(headers, "产品编码")?,
                work_order: Self::find_column(headers, "工单")?,
                production_date: Self::find_column(headers, "生产日期")?,
                order_date: Self::find_column(headers, "订单日期")?,
                order_no: Self::find_column(headers, "订单")?,
                customer_name: Self::find_column(headers, "单位名称")?,
                product_name: Self::find_column(headers, "产品名称")?,
                model: Self::find_column(headers, "型号")?,
                conductor_length: Self::find_column(headers, "导体米数")?,
                batching_group: Self::find_column(headers, "分排")?,
                delivery_date: Self::find_column(headers, "交期")?,
                insulation: Self::find_column(headers, "绝缘")?,
                cabling: Self::find_column(headers, "成缆")?,
                outer_sheath: Self::find_column(headers, "外护")?,
            },
        })
    }

    /// 定位列索引，支持列名别名；重复列名取首次出现的位置
    fn find_column(headers: &[String], key: &str) -> ClassifyResult<usize> {
        // 定义列名别名映射
        let aliases: Vec<&str> = match key {
            "导体米数" => vec!["导体米数", "数量"],
            "订单" => vec!["订单", "订单号"],
            _ => vec![key],
        };

        for alias in aliases {
            if let Some(idx) = headers.iter().position(|h| h == alias) {
                return Ok(idx);
            }
        }
        Err(ClassifyError::MissingColumn(key.to_string()))
    }

    /// 将一行原始单元格映射为 OrderRow
    ///
    /// 导体米数必须为数值（文本需可解析为数值）；日期列中的文本必须
    /// 可解析为日期。映射失败属于行级错误，由调用方归入错误工作表。
    pub fn map_row(&self, cells: &[CellValue], row_number: usize) -> ClassifyResult<OrderRow> {
        let c = &self.columns;
        Ok(OrderRow {
            product_code: self.cell(cells, c.product_code),
            work_order: self.cell(cells, c.work_order),
            production_date: self.date_cell(cells, c.production_date, "生产日期", row_number)?,
            order_date: self.date_cell(cells, c.order_date, "订单日期", row_number)?,
            order_no: self.cell(cells, c.order_no),
            customer_name: self.cell(cells, c.customer_name),
            product_name: self.product_name(cells),
            model: self.cell(cells, c.model),
            conductor_length: self.numeric_cell(
                cells,
                c.conductor_length,
                "导体米数",
                row_number,
            )?,
            batching_group: self.cell(cells, c.batching_group),
            delivery_date: self.date_cell(cells, c.delivery_date, "交期", row_number)?,
            insulation: self.cell(cells, c.insulation),
            cabling: self.cell(cells, c.cabling),
            outer_sheath: self.cell(cells, c.outer_sheath),
        })
    }

    /// 原始产品名称（不经过完整映射，供行级错误的兜底分类使用）
    pub fn raw_product_name(&self, cells: &[CellValue]) -> Option<String> {
        self.product_name(cells)
    }

    /// 不做类型收敛的 15 列输出行（供行级错误记录使用，绝不失败）
    pub fn output_cells_lossy(&self, cells: &[CellValue]) -> Vec<CellValue> {
        let c = &self.columns;
        vec![
            self.cell(cells, c.product_code),
            self.cell(cells, c.work_order),
            self.cell(cells, c.production_date),
            self.cell(cells, c.order_date),
            self.cell(cells, c.order_no),
            self.cell(cells, c.customer_name),
            self.cell(cells, c.product_name),
            self.cell(cells, c.model),
            self.cell(cells, c.conductor_length),
            self.cell(cells, c.batching_group),
            self.cell(cells, c.delivery_date),
            self.cell(cells, c.insulation),
            self.cell(cells, c.cabling),
            self.cell(cells, c.outer_sheath),
            self.cell(cells, c.delivery_date),
        ]
    }

    fn cell(&self, cells: &[CellValue], idx: usize) -> CellValue {
        cells.get(idx).cloned().unwrap_or(CellValue::Empty)
    }

    /// 产品名称：空单元格归一化为 None，非文本值按显示形式转为字符串
    fn product_name(&self, cells: &[CellValue]) -> Option<String> {
        match self.cell(cells, self.columns.product_name) {
            CellValue::Empty => None,
            CellValue::Text(s) => Some(s),
            other => Some(other.to_display_string()),
        }
    }

    /// 数值列：文本需可解析为数值，日期值视为类型错误
    fn numeric_cell(
        &self,
        cells: &[CellValue],
        idx: usize,
        field: &str,
        row_number: usize,
    ) -> ClassifyResult<CellValue> {
        match self.cell(cells, idx) {
            CellValue::Text(s) => {
                s.parse::<f64>()
                    .map(CellValue::Number)
                    .map_err(|_| ClassifyError::TypeConversionError {
                        row: row_number,
                        field: field.to_string(),
                        message: format!("无法解析为数值: {}", s),
                    })
            }
            CellValue::DateTime(dt) => Err(ClassifyError::TypeConversionError {
                row: row_number,
                field: field.to_string(),
                message: format!("无法解析为数值: {}", dt.format("%Y/%m/%d")),
            }),
            other => Ok(other),
        }
    }

    /// 日期列：文本需可解析为日期；数值与空值原样通过
    fn date_cell(
        &self,
        cells: &[CellValue],
        idx: usize,
        field: &str,
        row_number: usize,
    ) -> ClassifyResult<CellValue> {
        match self.cell(cells, idx) {
            CellValue::Text(s) => {
                Self::parse_date_text(&s)
                    .map(CellValue::DateTime)
                    .ok_or_else(|| ClassifyError::DateFormatError {
                        row: row_number,
                        field: field.to_string(),
                        value: s,
                    })
            }
            other => Ok(other),
        }
    }

    /// 解析常见日期文本格式
    fn parse_date_text(value: &str) -> Option<NaiveDateTime> {
        const DATE_FORMATS: [&str; 3] = ["%Y/%m/%d", "%Y-%m-%d", "%Y%m%d"];
        const DATETIME_FORMATS: [&str; 2] = ["%Y/%m/%d %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
                return Some(date.and_time(NaiveTime::MIN));
            }
        }
        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
                return Some(dt);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn full_headers() -> Vec<String> {
        headers(&[
            "产品编码",
            "工单",
            "生产日期",
            "订单日期",
            "订单",
            "单位名称",
            "产品名称",
            "型号",
            "数量",
            "分排",
            "交期",
            "绝缘",
            "成缆",
            "外护",
        ])
    }

    fn row_with_name(name: &str) -> Vec<CellValue> {
        let mut cells = vec![CellValue::Empty; 14];
        cells[0] = CellValue::Text("P001".to_string());
        cells[6] = CellValue::Text(name.to_string());
        cells[8] = CellValue::Number(100.0);
        cells
    }

    #[test]
    fn test_map_row_basic() {
        let mapper = FieldMapper::from_headers(&full_headers()).unwrap();
        let row = mapper.map_row(&row_with_name("XLV-3×16"), 1).unwrap();

        assert_eq!(row.product_code, CellValue::Text("P001".to_string()));
        assert_eq!(row.product_name, Some("XLV-3×16".to_string()));
        assert_eq!(row.conductor_length, CellValue::Number(100.0));
    }

    #[test]
    fn test_conductor_length_alias() {
        // 源表用"数量"列名时同样可定位导体米数
        let mapper = FieldMapper::from_headers(&full_headers()).unwrap();
        let row = mapper.map_row(&row_with_name("XLV-3×16"), 1).unwrap();
        assert_eq!(row.conductor_length, CellValue::Number(100.0));
    }

    #[test]
    fn test_missing_required_column() {
        let mut h = full_headers();
        h.retain(|name| name != "产品名称");

        let result = FieldMapper::from_headers(&h);
        assert!(matches!(result, Err(ClassifyError::MissingColumn(_))));
    }

    #[test]
    fn test_numeric_text_coerced() {
        let mapper = FieldMapper::from_headers(&full_headers()).unwrap();
        let mut cells = row_with_name("XLV-3×16");
        cells[8] = CellValue::Text("250.5".to_string());

        let row = mapper.map_row(&cells, 1).unwrap();
        assert_eq!(row.conductor_length, CellValue::Number(250.5));
    }

    #[test]
    fn test_invalid_conductor_length() {
        let mapper = FieldMapper::from_headers(&full_headers()).unwrap();
        let mut cells = row_with_name("XLV-3×16");
        cells[8] = CellValue::Text("一百米".to_string());

        let result = mapper.map_row(&cells, 3);
        assert!(matches!(
            result,
            Err(ClassifyError::TypeConversionError { row: 3, .. })
        ));
    }

    #[test]
    fn test_date_text_coerced() {
        let mapper = FieldMapper::from_headers(&full_headers()).unwrap();
        let mut cells = row_with_name("XLV-3×16");
        cells[10] = CellValue::Text("2025-01-20".to_string());

        let row = mapper.map_row(&cells, 1).unwrap();
        match row.delivery_date {
            CellValue::DateTime(dt) => assert_eq!(dt.format("%Y/%m/%d").to_string(), "2025/01/20"),
            other => panic!("期望日期值，实际 {:?}", other),
        }
    }

    #[test]
    fn test_invalid_date_text() {
        let mapper = FieldMapper::from_headers(&full_headers()).unwrap();
        let mut cells = row_with_name("XLV-3×16");
        cells[2] = CellValue::Text("月底".to_string());

        let result = mapper.map_row(&cells, 2);
        assert!(matches!(
            result,
            Err(ClassifyError::DateFormatError { row: 2, .. })
        ));
    }

    #[test]
    fn test_empty_product_name_is_none() {
        let mapper = FieldMapper::from_headers(&full_headers()).unwrap();
        let mut cells = row_with_name("XLV-3×16");
        cells[6] = CellValue::Empty;

        let row = mapper.map_row(&cells, 1).unwrap();
        assert_eq!(row.product_name, None);
    }

    #[test]
    fn test_lossy_output_row_never_fails() {
        let mapper = FieldMapper::from_headers(&full_headers()).unwrap();
        let mut cells = row_with_name("XLV-3×16");
        cells[8] = CellValue::Text("一百米".to_string()); // 映射会失败的值

        let output = mapper.output_cells_lossy(&cells);
        assert_eq!(output.len(), 15);
        assert_eq!(output[8], CellValue::Text("一百米".to_string()));
        // 交期重复写入首尾两个交期列
        assert_eq!(output[10], output[14]);
    }
}
