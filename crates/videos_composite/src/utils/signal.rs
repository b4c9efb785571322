use std::io;

use tokio::signal;

#[cfg(target_family = "windows")]
async fn terminate() -> io::Result<()> {
    signal::ctrl_c().await
}

/// ctrl + c 发送 SIGINT，容器停止时发送 SIGTERM，两者都视为退出信号
#[cfg(target_family = "unix")]
async fn terminate() -> io::Result<()> {
    use tokio::select;

    let mut term = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    let mut int = signal::unix::signal(signal::unix::SignalKind::interrupt())?;
    select! {
        _ = term.recv() => Ok(()),
        _ = int.recv() => Ok(()),
    }
}

/// 作为 axum 的 graceful shutdown 信号，返回后服务器不再接受新连接
pub async fn shutdown_signal() {
    if let Err(e) = terminate().await {
        error!("注册退出信号失败：{e}，服务将只能被强制终止");
        std::future::pending::<()>().await;
    }
    info!("收到退出信号，等待处理中的请求完成后关闭服务");
}
