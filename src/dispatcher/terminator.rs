/// Exit status used when `fatal` terminates.
pub const FATAL_EXIT_STATUS: i32 = 1;

/// What happens after a fatal record has been logged.
///
/// The default ends the process. Hosts that need to flush their own state,
/// or tests, install a different implementation through
/// `DispatcherBuilder::terminator`. Implementations must not return.
pub trait Terminator: Send + Sync {
    fn terminate(&self, status: i32) -> !;
}

/// Ends the process with `std::process::exit`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self, status: i32) -> ! {
        std::process::exit(status)
    }
}
