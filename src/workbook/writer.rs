// ==========================================
// 电缆订单数据分类工具 - 工作簿序列化
// ==========================================
// 工具: rust_xlsxwriter
// 样式: 全表居中对齐；日期列 yyyy/mm/dd；列宽按内容自适应
// ==========================================

use crate::domain::{is_date_header, CellValue};
use crate::error::ClassifyResult;
use crate::workbook::store::{OutputWorkbook, SheetData};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};

/// 列宽在最长内容之外的留白
const COLUMN_WIDTH_PADDING: usize = 2;

/// 将聚合渲染为自包含的 xlsx 字节缓冲
///
/// 缓冲可直接交给协作方落盘或下载，无残留的文件位置状态。
pub fn serialize(workbook: &OutputWorkbook) -> ClassifyResult<Vec<u8>> {
    let mut output = Workbook::new();

    let center = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let date = center.clone().set_num_format("yyyy/mm/dd");
    let datetime = center.clone().set_num_format("yyyy/mm/dd hh:mm:ss");

    for sheet in workbook.sheets() {
        let worksheet = output.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        write_sheet(worksheet, sheet, &center, &date, &datetime)?;
    }

    Ok(output.save_to_buffer()?)
}

fn write_sheet(
    worksheet: &mut Worksheet,
    sheet: &SheetData,
    center: &Format,
    date: &Format,
    datetime: &Format,
) -> ClassifyResult<()> {
    // 表头行
    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, center)?;
    }

    // 数据行
    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let excel_col = col as u16;
            match cell {
                CellValue::Empty => {
                    worksheet.write_blank(excel_row, excel_col, center)?;
                }
                CellValue::Text(s) => {
                    worksheet.write_string_with_format(excel_row, excel_col, s, center)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number_with_format(excel_row, excel_col, *n, center)?;
                }
                CellValue::DateTime(dt) => {
                    // 日期标注列按 yyyy/mm/dd 呈现，其余日期值保留时间部分
                    let format = if column_is_date(sheet, col) { date } else { datetime };
                    worksheet.write_datetime_with_format(excel_row, excel_col, dt, format)?;
                }
            }
        }
    }

    // 列宽: 该列最长显示内容 + 留白
    for col in 0..column_count(sheet) {
        let mut max_width = sheet.headers.get(col).map_or(0, |h| h.chars().count());
        for row in &sheet.rows {
            if let Some(cell) = row.get(col) {
                max_width = max_width.max(cell.display_width());
            }
        }
        worksheet.set_column_width(col as u16, (max_width + COLUMN_WIDTH_PADDING) as f64)?;
    }

    Ok(())
}

fn column_is_date(sheet: &SheetData, col: usize) -> bool {
    sheet
        .headers
        .get(col)
        .map(|h| is_date_header(h))
        .unwrap_or(false)
}

fn column_count(sheet: &SheetData) -> usize {
    let widest_row = sheet.rows.iter().map(Vec::len).max().unwrap_or(0);
    sheet.headers.len().max(widest_row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{output_headers, OUTPUT_HEADERS};
    use calamine::{Data, Reader, Xlsx};
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn read_back(bytes: Vec<u8>) -> Xlsx<Cursor<Vec<u8>>> {
        Xlsx::new(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn test_serialize_headers_and_values() {
        let mut workbook = OutputWorkbook::new();
        workbook.remove_default_sheet();
        let headers = output_headers();
        let mut row = vec![CellValue::Empty; headers.len()];
        row[0] = CellValue::Text("P001".to_string());
        row[8] = CellValue::Number(100.0);
        workbook.get_or_create_sheet("16mm2", &headers).append_row(row);

        let bytes = workbook.serialize().unwrap();
        let mut reloaded = read_back(bytes);
        let range = reloaded.worksheet_range("16mm2").unwrap();

        let cells: Vec<Vec<Data>> = range.rows().map(|r| r.to_vec()).collect();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0][0], Data::String(OUTPUT_HEADERS[0].to_string()));
        assert_eq!(cells[1][0], Data::String("P001".to_string()));
        assert_eq!(cells[1][8], Data::Float(100.0));
    }

    #[test]
    fn test_serialize_date_cells_survive_reload() {
        let mut workbook = OutputWorkbook::new();
        workbook.remove_default_sheet();
        let headers = output_headers();
        let dt = NaiveDate::from_ymd_opt(2025, 1, 20)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut row = vec![CellValue::Empty; headers.len()];
        row[2] = CellValue::DateTime(dt); // 生产日期
        workbook.get_or_create_sheet("25mm2", &headers).append_row(row);

        let bytes = workbook.serialize().unwrap();
        let mut reloaded = read_back(bytes);
        let range = reloaded.worksheet_range("25mm2").unwrap();
        let cell = &range.rows().nth(1).unwrap()[2];

        use calamine::DataType;
        assert_eq!(cell.as_datetime(), Some(dt));
    }

    #[test]
    fn test_serialize_multiple_sheets() {
        let mut workbook = OutputWorkbook::new();
        workbook.remove_default_sheet();
        let headers = output_headers();
        workbook.get_or_create_sheet("16mm2", &headers);
        workbook.get_or_create_sheet("铝导体错误数据", &headers);

        let bytes = workbook.serialize().unwrap();
        let reloaded = read_back(bytes);
        assert_eq!(
            reloaded.sheet_names(),
            vec!["16mm2".to_string(), "铝导体错误数据".to_string()]
        );
    }
}
