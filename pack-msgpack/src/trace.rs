// Logging shims. With the `tracing` feature these forward to `tracing`,
// otherwise arguments are only borrowed so they don't turn into unused warnings.

#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)+) => { tracing::debug!($($arg)+) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{ $( let _ = &$arg; )* }};
}

#[cfg(feature = "tracing")]
macro_rules! trace_warn {
    ($($arg:tt)+) => { tracing::warn!($($arg)+) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_warn {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{ $( let _ = &$arg; )* }};
}
