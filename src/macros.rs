//! Logging macros for the process-wide facade.
//!
//! The `print`, `fatal` and `panic` macros take any number of `Display`
//! arguments; the `ln` forms separate them with spaces. The `f` forms take a
//! format string like `format!`.
//!
//! # Examples
//!
//! ```
//! use rust_logger_facade::{log_print, log_printf, log_println};
//!
//! let port = 8080;
//! log_print!("listening on ", port);
//! log_printf!("listening on port {}", port);
//! log_println!("listening", "on", port);
//! ```

/// Concatenate the arguments and log them at INFO.
#[macro_export]
macro_rules! log_print {
    ($($arg:expr),* $(,)?) => {
        $crate::facade::print(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Format the arguments and log them at INFO.
#[macro_export]
macro_rules! log_printf {
    ($($arg:tt)+) => {
        $crate::facade::printf(::std::format_args!($($arg)+))
    };
}

/// Log the space-separated arguments at INFO.
#[macro_export]
macro_rules! log_println {
    ($($arg:expr),* $(,)?) => {
        $crate::facade::println(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Log at FATAL and exit with status 1.
///
/// ```no_run
/// use rust_logger_facade::log_fatal;
///
/// log_fatal!("cannot bind ", "0.0.0.0:80");
/// ```
#[macro_export]
macro_rules! log_fatal {
    ($($arg:expr),* $(,)?) => {
        $crate::facade::fatal(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

#[macro_export]
macro_rules! log_fatalf {
    ($($arg:tt)+) => {
        $crate::facade::fatalf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_fatalln {
    ($($arg:expr),* $(,)?) => {
        $crate::facade::fatalln(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Log at PANIC and panic with the message.
///
/// ```should_panic
/// use rust_logger_facade::log_panicf;
///
/// log_panicf!("invariant broken: {} != {}", 1, 2);
/// ```
#[macro_export]
macro_rules! log_panic {
    ($($arg:expr),* $(,)?) => {
        $crate::facade::panic(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

#[macro_export]
macro_rules! log_panicf {
    ($($arg:tt)+) => {
        $crate::facade::panicf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_panicln {
    ($($arg:expr),* $(,)?) => {
        $crate::facade::panicln(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}
