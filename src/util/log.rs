// ログ出力用マクロ 発生箇所(file:line)付きでstderrに出力する

#[macro_export]
macro_rules! log_at {
    ($level:expr, $($arg:tt)*) => {
        eprintln!(
            "[{}]({}:{}) {}",
            $level,
            file!(),
            line!(),
            format_args!($($arg)*)
        )
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { $crate::log_at!("ERROR", $($arg)*) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { $crate::log_at!("WARN", $($arg)*) };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { $crate::log_at!("INFO", $($arg)*) };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => { $crate::log_at!("DEBUG", $($arg)*) };
}

#[macro_export]
macro_rules! error_exit {
    ($($arg:tt)*) => {{
        $crate::log_at!("ERROR", $($arg)*);
        std::process::exit(1);
    }};
}
