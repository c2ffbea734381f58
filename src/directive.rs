//! Completion directives: the bitmask the program sends back to the shell script
//! on the last line of every completion answer.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Post-processing instructions for the shell.
    ///
    /// The empty set is [`Directive::DEFAULT`]: the shell may fall back to its
    /// own file completion when no candidates are offered.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Directive: u32 {
        /// Abort; offer nothing.
        const ERROR = 1;
        /// Do not append a space after inserting the completion.
        const NO_SPACE = 1 << 1;
        /// Do not fall back to file completion when nothing matches.
        const NO_FILE_COMP = 1 << 2;
        /// Candidates are file extensions to filter file completion by.
        const FILTER_FILE_EXT = 1 << 3;
        /// Complete directory names only, optionally inside the first candidate.
        const FILTER_DIRS = 1 << 4;
    }
}

/// Names used in diagnostics, in bit order.
pub(crate) const NAMES: [(Directive, &str); 5] = [
    (Directive::ERROR, "Error"),
    (Directive::NO_SPACE, "NoSpace"),
    (Directive::NO_FILE_COMP, "NoFileComp"),
    (Directive::FILTER_FILE_EXT, "FilterFileExt"),
    (Directive::FILTER_DIRS, "FilterDirs"),
];

impl Directive {
    /// Defer entirely to the shell's default completion.
    pub const DEFAULT: Directive = Directive::empty();

    /// Combine two directives. `ERROR` on either side wins outright.
    pub fn merge(self, other: Directive) -> Directive {
        if self.contains(Directive::ERROR) || other.contains(Directive::ERROR) {
            Directive::ERROR
        } else {
            self | other
        }
    }

    pub fn is_error(self) -> bool {
        self.contains(Directive::ERROR)
    }

    /// True when the candidates are filter arguments rather than completions.
    pub fn is_filter(self) -> bool {
        self.intersects(Directive::FILTER_FILE_EXT | Directive::FILTER_DIRS)
    }

    /// Integer written after the colon on the directive line.
    pub fn to_wire(self) -> u32 {
        self.bits()
    }

    /// Parse the integer from a directive line (without the colon).
    ///
    /// Unknown bits are dropped; anything that is not a non-negative integer
    /// decodes as [`Directive::DEFAULT`].
    pub fn from_wire(text: &str) -> Directive {
        match text.trim().parse::<u64>() {
            Ok(value) => Directive::from_bits_truncate((value & u32::MAX as u64) as u32),
            Err(_) => Directive::DEFAULT,
        }
    }
}

impl Default for Directive {
    fn default() -> Self {
        Directive::DEFAULT
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Default");
        }
        let names: Vec<&str> = NAMES
            .iter()
            .filter(|(bit, _)| self.contains(*bit))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", names.join(", "))
    }
}
