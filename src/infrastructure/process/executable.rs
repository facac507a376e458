//! 定位 sonos-http-api-server 可执行文件

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// soco-cli 提供的 HTTP API 服务器命令名
pub const EXECUTABLE_NAME: &str = "sonos-http-api-server";

/// 解析可执行文件路径
///
/// 顺序：配置路径 → 常见安装位置（pip --user / pipx / 系统目录）→ PATH → 命令名本身
pub fn resolve_executable(configured: Option<&Path>) -> PathBuf {
    if let Some(path) = configured {
        if path.exists() {
            tracing::info!(path = %path.display(), "Using configured soco-cli executable");
            return path.to_path_buf();
        }
        tracing::warn!(
            path = %path.display(),
            "Configured soco-cli executable does not exist, searching"
        );
    }

    let home = std::env::var_os("HOME").map(PathBuf::from);
    let candidates = candidate_paths(home.as_deref());
    if let Some(found) = candidates.iter().find(|p| p.is_file()) {
        tracing::info!(path = %found.display(), "Found soco-cli executable");
        return found.clone();
    }

    if let Some(found) = search_path(EXECUTABLE_NAME, std::env::var_os("PATH")) {
        tracing::info!(path = %found.display(), "Resolved soco-cli executable from PATH");
        return found;
    }

    tracing::warn!(
        checked = ?candidates,
        "Could not find {}, using command name directly",
        EXECUTABLE_NAME
    );
    PathBuf::from(EXECUTABLE_NAME)
}

/// 常见安装位置
fn candidate_paths(home: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(home) = home {
        paths.push(home.join(".local/bin").join(EXECUTABLE_NAME));
        paths.push(
            home.join(".local/share/pipx/venvs/soco-cli/bin")
                .join(EXECUTABLE_NAME),
        );
    }

    paths.push(Path::new("/usr/local/bin").join(EXECUTABLE_NAME));
    paths.push(Path::new("/opt/homebrew/bin").join(EXECUTABLE_NAME));
    paths
}

/// 在 PATH 各目录中查找
fn search_path(name: &str, path_var: Option<OsString>) -> Option<PathBuf> {
    let path_var = path_var?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}
