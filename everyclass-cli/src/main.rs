mod commands;
mod config;
mod privacy_store;
mod render;
mod source;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{AppContext, AvailableRoomsParams, DailyParams};

#[derive(Parser)]
#[command(name = "everyclass")]
#[command(about = "EveryClass 课表查询工具")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 上游 API 地址
    #[arg(long, global = true, env = "EVERYCLASS_API_SERVER")]
    api_server: Option<String>,

    /// 本地数据目录，设置后不再请求 API
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// 请求超时（秒）
    #[arg(long, global = true, env = "EVERYCLASS_TIMEOUT")]
    timeout: Option<u64>,

    /// 隐私设置文件
    #[arg(long, global = true, env = "EVERYCLASS_PRIVACY_FILE")]
    privacy_file: Option<PathBuf>,

    /// 以 JSON 输出
    #[arg(long, global = true)]
    json: bool,

    /// 启用详细日志
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// 搜索学生、老师或教室，唯一结果时直接显示课表
    Query {
        /// 姓名、学号、教工号或教室名
        keyword: String,
    },

    /// 查看学生课表
    Student {
        sid: String,
        /// 学期，如 2023-2024-1
        semester: String,
    },

    /// 查看老师课表
    Teacher { tid: String, semester: String },

    /// 查看教室课表
    Room { rid: String, semester: String },

    /// 查看课程详情
    Course { cid: String, semester: String },

    /// 查看多人在某一天的日程
    People {
        /// 学号或教工号
        #[arg(required = true)]
        people: Vec<String>,

        #[arg(short, long)]
        semester: String,

        /// 学期开始日期（格式：YYYY-MM-DD）
        #[arg(long)]
        semester_start: String,

        /// 日期，默认今天
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// 查询某栋楼某个时间段的空闲教室
    Rooms {
        campus: String,
        building: String,

        /// 节次块，如 0102
        #[arg(short, long)]
        block: String,

        #[arg(short, long)]
        semester: String,

        /// 学期开始日期（格式：YYYY-MM-DD）
        #[arg(long)]
        semester_start: String,

        /// 日期，默认今天
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// 按类别浏览教学班
    Categories {
        /// 教学班列表 JSON 文件
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("everyclass_cli={},everyclass_core={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Cli {
        command,
        api_server,
        data_dir,
        timeout,
        privacy_file,
        json,
        ..
    } = cli;

    // 只有需要数据来源的命令才解析配置
    let context = move || -> Result<AppContext> {
        let config = config::Config::resolve(api_server, data_dir, timeout, privacy_file)?;
        let ctx = AppContext {
            source: config.build_source()?,
            privacy: config.build_privacy_store(),
            json,
        };
        tracing::debug!(source = ctx.source.name(), "数据来源已就绪");
        Ok(ctx)
    };
    let today = || chrono::Local::now().date_naive();

    match command {
        Commands::Categories { file } => commands::categories_command(&file, json).await,
        Commands::Query { keyword } => commands::query_command(&context()?, &keyword).await,
        Commands::Student { sid, semester } => {
            commands::student_command(&context()?, &sid, &semester).await
        }
        Commands::Teacher { tid, semester } => {
            commands::teacher_command(&context()?, &tid, &semester).await
        }
        Commands::Room { rid, semester } => {
            commands::room_command(&context()?, &rid, &semester).await
        }
        Commands::Course { cid, semester } => {
            commands::course_command(&context()?, &cid, &semester).await
        }
        Commands::People {
            people,
            semester,
            semester_start,
            date,
        } => {
            commands::daily_command(
                &context()?,
                DailyParams {
                    people,
                    date: date.unwrap_or_else(today),
                    semester,
                    semester_start,
                },
            )
            .await
        }
        Commands::Rooms {
            campus,
            building,
            block,
            semester,
            semester_start,
            date,
        } => {
            commands::available_rooms_command(
                &context()?,
                AvailableRoomsParams {
                    campus,
                    building,
                    date: date.unwrap_or_else(today),
                    block,
                    semester,
                    semester_start,
                },
            )
            .await
        }
    }
}
