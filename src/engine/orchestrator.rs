// ==========================================
// 电缆订单数据分类工具 - 运行编排器
// ==========================================
// 流程: 解析 → 列定位 → 载入输出工作簿 → 逐行路由 → 序列化
// 运行期间独占持有两个输出工作簿聚合与处理报告
// ==========================================

use crate::domain::{error_headers, output_headers, ConductorType};
use crate::engine::router::{RowRouter, RowTarget};
use crate::error::ClassifyResult;
use crate::importer::{FieldMapper, OrderTableParser};
use crate::workbook::OutputWorkbook;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 一次运行的产物：成功计数、按序错误列表、两份工作簿字节缓冲
#[derive(Debug)]
pub struct RunOutput {
    pub processed_count: usize,
    pub errors: Vec<String>,
    pub aluminum_bytes: Vec<u8>,
    pub copper_bytes: Vec<u8>,
}

// ==========================================
// ClassifyOrchestrator - 运行编排器
// ==========================================
//
// 两个输出路径上已有的工作簿会被载入并在末尾追加本次数据；
// 对同一输出路径并发执行两次运行不受支持（不加锁，由使用方保证）。
pub struct ClassifyOrchestrator {
    aluminum_path: PathBuf,
    copper_path: PathBuf,
}

impl ClassifyOrchestrator {
    /// 按固定文件名在输出目录下定位两个输出工作簿
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        let dir = output_dir.as_ref();
        ClassifyOrchestrator {
            aluminum_path: dir.join(ConductorType::Aluminum.workbook_file_name()),
            copper_path: dir.join(ConductorType::Copper.workbook_file_name()),
        }
    }

    /// 显式指定两个输出工作簿路径
    pub fn with_paths<P: Into<PathBuf>>(aluminum_path: P, copper_path: P) -> Self {
        ClassifyOrchestrator {
            aluminum_path: aluminum_path.into(),
            copper_path: copper_path.into(),
        }
    }

    /// 执行一次分类运行（无进度回调）
    pub fn run<P: AsRef<Path>>(&self, input_path: P) -> ClassifyResult<RunOutput> {
        self.run_with_progress(input_path, |_| {})
    }

    /// 执行一次分类运行，每处理一行回调一次进度
    ///
    /// 进度为 [0,1] 内单调不减的分数，封顶 1.0。回调只是通知，
    /// 核心流程不依赖其存在与行为。整文件级故障（输入不可读、
    /// 总订单表缺失、必需列缺失、工作簿写出失败）以 Err 返回，
    /// 行级故障只进入错误工作表与报告，绝不中断运行。
    pub fn run_with_progress<P: AsRef<Path>>(
        &self,
        input_path: P,
        mut on_progress: impl FnMut(f64),
    ) -> ClassifyResult<RunOutput> {
        let input_path = input_path.as_ref();
        info!(input = %input_path.display(), "开始分类运行");

        // === 步骤 1: 解析总订单表 ===
        debug!("步骤 1: 解析总订单表");
        let table = OrderTableParser.parse(input_path)?;
        let total_rows = table.rows.len();
        info!(total_rows, "总订单表解析完成");

        // === 步骤 2: 定位必需列 ===
        debug!("步骤 2: 定位必需列");
        let mapper = FieldMapper::from_headers(&table.headers)?;

        // === 步骤 3: 载入输出工作簿，准备错误工作表 ===
        debug!("步骤 3: 载入输出工作簿");
        let mut aluminum = OutputWorkbook::open_or_create(&self.aluminum_path)?;
        let mut copper = OutputWorkbook::open_or_create(&self.copper_path)?;
        aluminum.remove_default_sheet();
        copper.remove_default_sheet();

        let data_headers = output_headers();
        let err_headers = error_headers();
        // 错误工作表先行创建，零错误行时也存在
        aluminum.get_or_create_sheet(ConductorType::Aluminum.error_sheet_name(), &err_headers);
        copper.get_or_create_sheet(ConductorType::Copper.error_sheet_name(), &err_headers);

        // === 步骤 4: 逐行路由 ===
        debug!("步骤 4: 逐行路由");
        let router = RowRouter::new(&mapper);
        let mut processed_count = 0usize;
        let mut errors = Vec::new();

        for (idx, cells) in table.rows.iter().enumerate() {
            let routed = router.route(cells, idx + 1);

            let workbook = match routed.conductor {
                ConductorType::Aluminum => &mut aluminum,
                ConductorType::Copper => &mut copper,
            };
            let sheet = match &routed.target {
                RowTarget::Data { sheet_name } => {
                    workbook.get_or_create_sheet(sheet_name, &data_headers)
                }
                RowTarget::Error { .. } => {
                    workbook.get_or_create_sheet(routed.conductor.error_sheet_name(), &err_headers)
                }
            };
            sheet.append_row(routed.cells);

            if let Some(message) = routed.report_error {
                errors.push(message);
            }
            processed_count += 1;

            let progress = ((idx + 1) as f64 / total_rows as f64).min(1.0);
            on_progress(progress);
        }

        // === 步骤 5: 序列化输出 ===
        debug!("步骤 5: 序列化输出工作簿");
        let aluminum_bytes = aluminum.serialize()?;
        let copper_bytes = copper.serialize()?;

        info!(
            processed_count,
            error_count = errors.len(),
            "分类运行完成"
        );

        Ok(RunOutput {
            processed_count,
            errors,
            aluminum_bytes,
            copper_bytes,
        })
    }
}
