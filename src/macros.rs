//! 调用位置捕获宏
//!
//! 这些宏在调用处展开，自动填充 `file!()`、所在函数名与 `line!()`。
//!
//! ```rust
//! use logprint::Logger;
//!
//! let logger = Logger::builder().output(Box::new(std::io::sink())).build();
//! logprint::info!(logger, vec!["service", "started"]);
//! logprint::warning!(logger, ["retry", "3"]);
//!
//! let log = &logger.logs()[0];
//! assert_eq!(log.content(), "service started");
//! assert!(log.file_info().is_some());
//! ```

/// 所在函数的名称（不含模块路径），闭包内返回外层函数名
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let path = __type_name_of(__here);
        let path = path.strip_suffix("::__here").unwrap_or(path);
        path.rsplit("::")
            .find(|segment| *segment != "{{closure}}")
            .unwrap_or(path)
    }};
}

/// 当前调用位置
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new(file!(), $crate::function_name!(), line!())
    };
}

/// 以指定级别记录日志，参数通过 `Payload::from` 转换
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr $(, $item:expr)* $(,)?) => {
        $logger.log(
            $level,
            &[$($crate::Payload::from($item)),*],
            $crate::call_site!(),
        )
    };
}

#[macro_export]
macro_rules! verbose {
    ($logger:expr $(, $item:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::Verbose $(, $item)*)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr $(, $item:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::Info $(, $item)*)
    };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr $(, $item:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::Warning $(, $item)*)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr $(, $item:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::Error $(, $item)*)
    };
}

/// 全局 print 钩子，见 [`print`](crate::print)
#[macro_export]
macro_rules! log_print {
    ($($item:expr),* $(,)?) => {
        $crate::print(&[$($crate::Payload::from($item)),*])
    };
}
