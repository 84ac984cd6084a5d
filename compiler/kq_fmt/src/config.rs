//! Printer configuration.
//!
//! All switches are read once per formatting call. Nothing here is global.

use bitflags::bitflags;

/// Line terminator used unless configured otherwise.
pub const DEFAULT_NEWLINE: &str = "\n";

bitflags! {
    /// Output switches.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct PrintFlags: u8 {
        /// Print the width of every expression, booleans included.
        const ALL_WIDTHS = 1 << 0;
        /// Print widths as a separate argument (`(Add w32 ...)`) rather than
        /// glued to the kind (`(Add32 ...)`).
        const WIDTH_AS_ARG = 1 << 1;
        /// Prefix argument widths with `w`.
        const PREFIX_WIDTH = 1 << 2;
        /// Collapse concatenations of consecutive byte reads.
        const MULTIBYTE_READS = 1 << 3;
        /// Wrap every non-boolean constant with its width.
        const ALL_CONST_WIDTHS = 1 << 4;
    }
}

impl Default for PrintFlags {
    fn default() -> Self {
        PrintFlags::WIDTH_AS_ARG | PrintFlags::PREFIX_WIDTH | PrintFlags::MULTIBYTE_READS
    }
}

/// Configuration for one formatting session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintConfig {
    pub flags: PrintFlags,

    /// Emitted at every line break.
    pub newline: &'static str,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            flags: PrintFlags::default(),
            newline: DEFAULT_NEWLINE,
        }
    }
}

impl PrintConfig {
    /// Replace all flags.
    #[must_use]
    pub fn with_flags(mut self, flags: PrintFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Turn a single flag on or off.
    #[must_use]
    pub fn with_flag(mut self, flag: PrintFlags, enabled: bool) -> Self {
        self.flags.set(flag, enabled);
        self
    }

    #[must_use]
    pub fn with_newline(mut self, newline: &'static str) -> Self {
        self.newline = newline;
        self
    }

    #[inline]
    pub fn all_widths(&self) -> bool {
        self.flags.contains(PrintFlags::ALL_WIDTHS)
    }

    #[inline]
    pub fn width_as_arg(&self) -> bool {
        self.flags.contains(PrintFlags::WIDTH_AS_ARG)
    }

    #[inline]
    pub fn prefix_width(&self) -> bool {
        self.flags.contains(PrintFlags::PREFIX_WIDTH)
    }

    #[inline]
    pub fn multibyte_reads(&self) -> bool {
        self.flags.contains(PrintFlags::MULTIBYTE_READS)
    }

    #[inline]
    pub fn all_const_widths(&self) -> bool {
        self.flags.contains(PrintFlags::ALL_CONST_WIDTHS)
    }
}
