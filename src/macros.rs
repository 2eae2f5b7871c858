/// Defines crate-local logging shims.
///
/// Each `name: level` pair becomes a `name!` macro that forwards to `tracing::level!` under
/// `target` when the invoking crate's `tracing` feature is enabled, and expands to nothing
/// otherwise. The leading `$` is passed through so the generated macros can take arguments.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_shims {
    ($d:tt $target:literal => $($name:ident: $level:ident),+ $(,)?) => {
        $(
            #[cfg(feature = "tracing")]
            #[allow(unused_macros)]
            macro_rules! $name {
                ($d($d tt:tt)*) => {
                    tracing::$level!(target: $target, $d($d tt)*)
                };
            }

            #[cfg(not(feature = "tracing"))]
            #[allow(unused_macros)]
            macro_rules! $name {
                ($d($d tt:tt)*) => {};
            }
        )+
    };
}

__log_shims!($ "filmstrip" => ftrace: trace, fdebug: debug, fwarn: warn);
