// ==========================================
// 电缆订单数据分类工具 - 错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 分类流程错误类型
#[derive(Error, Debug)]
pub enum ClassifyError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("输入文件缺少工作表: {0}")]
    SheetNotFound(String),

    // ===== 字段映射错误 =====
    #[error("输入表缺少必需列: {0}")]
    MissingColumn(String),

    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("日期格式错误 (行 {row}, 字段 {field}): 无法识别的值 {value}")]
    DateFormatError {
        row: usize,
        field: String,
        value: String,
    },

    // ===== 输出工作簿错误 =====
    #[error("工作簿写出失败: {0}")]
    WorkbookWriteError(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ClassifyError {
    fn from(err: std::io::Error) -> Self {
        ClassifyError::FileReadError(err.to_string())
    }
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for ClassifyError {
    fn from(err: calamine::XlsxError) -> Self {
        ClassifyError::ExcelParseError(err.to_string())
    }
}

// 实现 From<rust_xlsxwriter::XlsxError>
impl From<rust_xlsxwriter::XlsxError> for ClassifyError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ClassifyError::WorkbookWriteError(err.to_string())
    }
}

/// Result 类型别名
pub type ClassifyResult<T> = Result<T, ClassifyError>;
