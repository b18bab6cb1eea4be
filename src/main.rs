// ==========================================
// 电缆订单数据分类工具 - 命令行入口
// ==========================================
// 用法: cable-order-classifier <输入文件.xlsx> [输出目录]
// 职责: 薄协作层——提供输入路径，落盘两个输出工作簿，呈现报告
// ==========================================

use cable_order_classifier::domain::ConductorType;
use cable_order_classifier::{logging, ClassifyOrchestrator, APP_NAME, VERSION};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", APP_NAME, VERSION);
    tracing::info!("==================================================");

    let mut args = std::env::args().skip(1);
    let input_path = match args.next() {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("用法: cable-order-classifier <输入文件.xlsx> [输出目录]");
            return ExitCode::FAILURE;
        }
    };
    let output_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    let orchestrator = ClassifyOrchestrator::new(&output_dir);

    // 进度按整十百分比记录一次
    let mut last_reported = 0u32;
    let result = orchestrator.run_with_progress(&input_path, |fraction| {
        let percent = (fraction * 100.0) as u32;
        if percent / 10 > last_reported / 10 {
            last_reported = percent;
            tracing::info!("处理进度: {}%", percent);
        }
    });

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            eprintln!("文件处理失败，原因：{}", e);
            return ExitCode::FAILURE;
        }
    };

    if !output.errors.is_empty() {
        eprintln!("处理过程中出现以下错误：");
        for error in &output.errors {
            eprintln!("{}", error);
        }
    }

    // 落盘两个输出工作簿（固定文件名，与下次运行的合并来源一致）
    let aluminum_path = output_dir.join(ConductorType::Aluminum.workbook_file_name());
    let copper_path = output_dir.join(ConductorType::Copper.workbook_file_name());
    if let Err(e) = std::fs::write(&aluminum_path, &output.aluminum_bytes) {
        eprintln!("写出 {} 失败：{}", aluminum_path.display(), e);
        return ExitCode::FAILURE;
    }
    if let Err(e) = std::fs::write(&copper_path, &output.copper_bytes) {
        eprintln!("写出 {} 失败：{}", copper_path.display(), e);
        return ExitCode::FAILURE;
    }

    println!("成功处理 {} 条记录！", output.processed_count);
    println!("数据分类完成：{}，{}", aluminum_path.display(), copper_path.display());
    ExitCode::SUCCESS
}
