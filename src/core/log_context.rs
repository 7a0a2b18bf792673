//! Per-message metadata: id, level, source location and thread info

use super::log_level::LogLevel;
use serde::Serialize;
use std::cell::OnceCell;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(0);

thread_local! {
    // Captured once per thread; the OS thread id and name never change.
    static CURRENT_THREAD: OnceCell<ThreadInfo> = const { OnceCell::new() };
}

/// Identity of the thread a message was produced on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadInfo {
    pub id: u64,
    pub name: Option<String>,
    pub is_main: bool,
}

impl ThreadInfo {
    pub fn new(id: u64, name: Option<String>, is_main: bool) -> Self {
        Self { id, name, is_main }
    }

    /// Thread info for the calling thread, cached per thread.
    pub fn current() -> Self {
        CURRENT_THREAD.with(|cell| cell.get_or_init(Self::capture).clone())
    }

    fn capture() -> Self {
        let thread = std::thread::current();
        let name = thread.name().map(String::from);
        let id = os_thread_id();
        let is_main = is_main_thread(id, name.as_deref());
        Self { id, name, is_main }
    }
}

#[cfg(target_os = "linux")]
fn os_thread_id() -> u64 {
    // SAFETY: gettid takes no arguments and cannot fail.
    unsafe { libc::syscall(libc::SYS_gettid) as u64 }
}

#[cfg(not(target_os = "linux"))]
fn os_thread_id() -> u64 {
    static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);
    thread_local! {
        static THREAD_ID: u64 = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
    }
    THREAD_ID.with(|id| *id)
}

/// The kernel gives the initial thread a tid equal to the process id.
#[cfg(target_os = "linux")]
fn is_main_thread(id: u64, _name: Option<&str>) -> bool {
    // SAFETY: getpid cannot fail.
    let pid = unsafe { libc::getpid() };
    id == pid as u64
}

/// The runtime names the initial thread "main".
#[cfg(not(target_os = "linux"))]
fn is_main_thread(_id: u64, name: Option<&str>) -> bool {
    name == Some("main")
}

/// Metadata attached to every log message.
#[derive(Debug, Clone, Serialize)]
pub struct LogContext {
    pub id: u64,
    pub level: LogLevel,
    pub file: String,
    pub line: u32,
    pub function: String,
    pub thread: ThreadInfo,
}

impl LogContext {
    /// Build a context for the calling thread and assign it the next id.
    pub fn new(level: LogLevel, file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        Self {
            id: NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed),
            level,
            file: file.into(),
            line,
            function: function.into(),
            thread: ThreadInfo::current(),
        }
    }

    /// Replace the captured thread info.
    #[must_use]
    pub fn with_thread(mut self, thread: ThreadInfo) -> Self {
        self.thread = thread;
        self
    }

    #[inline]
    pub fn is_main_thread(&self) -> bool {
        self.thread.is_main
    }
}

/// Strip the source-root prefix (and the separator after it) from `file`.
///
/// Windows paths are normalized to forward slashes first. Without a root,
/// or when the root does not occur in the path, the path is returned as is.
///
/// # Examples
///
/// ```
/// use rust_logger_facade::core::log_context::trim_file_path;
///
/// assert_eq!(trim_file_path("/work/app/src/main.rs", Some("/work/app")), "src/main.rs");
/// assert_eq!(trim_file_path("src/main.rs", None), "src/main.rs");
/// ```
pub fn trim_file_path(file: &str, source_root: Option<&str>) -> String {
    let (file, root) = if cfg!(windows) {
        (file.replace('\\', "/"), source_root.map(|r| r.replace('\\', "/")))
    } else {
        (file.to_string(), source_root.map(String::from))
    };

    let root = match root {
        Some(root) if !root.is_empty() => root,
        _ => return file,
    };

    match file.find(&root) {
        Some(pos) => {
            let rest = &file[pos + root.len()..];
            let rest = rest.strip_prefix('/').unwrap_or(rest);
            format!("{}{}", &file[..pos], rest)
        }
        None => file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase() {
        let first = LogContext::new(LogLevel::Info, "a.rs", 1, "f");
        let second = LogContext::new(LogLevel::Info, "a.rs", 2, "f");
        assert!(second.id > first.id);
    }

    #[test]
    fn test_context_fields() {
        let ctx = LogContext::new(LogLevel::Warning, "src/lib.rs", 42, "handler");
        assert_eq!(ctx.level, LogLevel::Warning);
        assert_eq!(ctx.file, "src/lib.rs");
        assert_eq!(ctx.line, 42);
        assert_eq!(ctx.function, "handler");
    }

    #[test]
    fn test_spawned_thread_is_not_main() {
        let info = std::thread::Builder::new()
            .name("worker".to_string())
            .spawn(ThreadInfo::current)
            .unwrap()
            .join()
            .unwrap();

        assert!(!info.is_main);
        assert_eq!(info.name.as_deref(), Some("worker"));
    }

    #[test]
    fn test_thread_info_is_stable_per_thread() {
        let a = ThreadInfo::current();
        let b = ThreadInfo::current();
        assert_eq!(a, b);

        let other = std::thread::spawn(ThreadInfo::current).join().unwrap();
        assert_ne!(a.id, other.id);
    }

    #[test]
    fn test_with_thread_override() {
        let ctx = LogContext::new(LogLevel::Info, "a.rs", 1, "f")
            .with_thread(ThreadInfo::new(1, None, true));
        assert!(ctx.is_main_thread());
    }

    #[test]
    fn test_trim_file_path() {
        assert_eq!(trim_file_path("/src/root/lib/a.rs", Some("/src/root")), "lib/a.rs");
        assert_eq!(trim_file_path("/other/a.rs", Some("/src/root")), "/other/a.rs");
        assert_eq!(trim_file_path("/src/root/a.rs", Some("")), "/src/root/a.rs");
    }
}
