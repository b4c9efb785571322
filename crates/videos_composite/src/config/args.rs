use std::borrow::Cow;
use std::sync::LazyLock;

use clap::Parser;

pub static ARGS: LazyLock<Args> = LazyLock::new(Args::parse);

#[derive(Parser, Debug)]
#[command(name = "Videos-Composite", version = detail_version(), about, long_about = None)]
pub struct Args {
    #[arg(short, long, default_value = "0.0.0.0:8000", env = "BIND_ADDRESS")]
    pub bind_address: String,

    #[arg(short, long, default_value = "warn,videos_composite=info", env = "RUST_LOG")]
    pub log_level: String,

    /// 完整的数据库连接串，设置后忽略下方的 DB_* 参数
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[arg(long, default_value = "127.0.0.1", env = "DB_HOST")]
    pub db_host: String,

    #[arg(long, default_value_t = 3306, env = "DB_PORT")]
    pub db_port: u16,

    #[arg(long, default_value = "root", env = "DB_USER")]
    pub db_user: String,

    #[arg(long, default_value = "", env = "DB_PASS", hide_env_values = true)]
    pub db_pass: String,

    #[arg(long, default_value = "videos", env = "DB_NAME")]
    pub db_name: String,

    #[arg(long, default_value_t = 10, env = "DB_MAX_CONNECTIONS")]
    pub max_connections: u32,

    #[arg(long, default_value_t = 1, env = "DB_MIN_CONNECTIONS")]
    pub min_connections: u32,

    /// 从连接池获取连接的超时时间（秒）
    #[arg(long, default_value_t = 30, env = "DB_ACQUIRE_TIMEOUT")]
    pub acquire_timeout: u64,

    #[arg(long, env = "SKIP_MIGRATION")]
    pub skip_migration: bool,
}

mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub fn version() -> Cow<'static, str> {
    if let (Some(git_version), Some(git_dirty)) = (built_info::GIT_VERSION, built_info::GIT_DIRTY) {
        Cow::Owned(format!("{}{}", git_version, if git_dirty { "-dirty" } else { "" }))
    } else {
        Cow::Borrowed(built_info::PKG_VERSION)
    }
}

fn detail_version() -> String {
    format!(
        "{}
Architecture: {}-{}
Author: {}
Built Time: {}
Rustc Version: {}",
        version(),
        built_info::CFG_OS,
        built_info::CFG_TARGET_ARCH,
        built_info::PKG_AUTHORS,
        built_info::BUILT_TIME_UTC,
        built_info::RUSTC_VERSION,
    )
}
