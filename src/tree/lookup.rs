//! Tree walk: find the command a token sequence reaches and record the flags
//! and positional arguments seen on the way.

use crate::tree::command::{CommandSpec, CommandTree};
use crate::tree::flag::{FlagSpec, FlagState};
use tracing::debug;

/// Result of walking the tokens that precede the cursor.
#[derive(Debug, Clone)]
pub struct Lookup<'t> {
    /// Commands from the root down to the effective command
    pub path: Vec<&'t CommandSpec>,
    /// Positional arguments of the effective command
    pub args: Vec<String>,
    /// Flags supplied so far
    pub flags: FlagState,
    /// Value-taking flag that ended the token list without its value
    pub pending: Option<&'t FlagSpec>,
    /// A `--` terminator was seen; everything after it is positional
    pub after_terminator: bool,
}

impl<'t> Lookup<'t> {
    fn start(root: &'t CommandSpec) -> Self {
        Self {
            path: vec![root],
            args: Vec::new(),
            flags: FlagState::new(),
            pending: None,
            after_terminator: false,
        }
    }

    /// The command the tokens resolved to.
    pub fn command(&self) -> &'t CommandSpec {
        self.path[self.path.len() - 1]
    }

    /// Space-separated names from the root to the effective command.
    pub fn command_path(&self) -> String {
        self.path
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Flags usable on the effective command: its local flags plus the
    /// persistent flags of every command on the path. The nearest definition
    /// of a long name wins. Sorted by long name.
    pub fn available_flags(&self) -> Vec<&'t FlagSpec> {
        let mut flags: Vec<&'t FlagSpec> = Vec::new();
        let command = self.command();
        let nearest_first = command
            .flags
            .iter()
            .chain(self.path.iter().rev().flat_map(|c| c.persistent_flags.iter()));
        for flag in nearest_first {
            if !flags.iter().any(|f| f.long == flag.long) {
                flags.push(flag);
            }
        }
        flags.sort_by(|a, b| a.long.cmp(&b.long));
        flags
    }

    /// Required flags not yet supplied, sorted by long name.
    pub fn outstanding_required(&self) -> Vec<&'t FlagSpec> {
        self.available_flags()
            .into_iter()
            .filter(|f| f.required && !f.hidden && !self.flags.is_changed(&f.long))
            .collect()
    }

    pub fn find_long(&self, name: &str) -> Option<&'t FlagSpec> {
        self.available_flags().into_iter().find(|f| f.long == name)
    }

    pub fn find_short(&self, short: char) -> Option<&'t FlagSpec> {
        self.available_flags()
            .into_iter()
            .find(|f| f.short == Some(short))
    }
}

impl CommandTree {
    /// Walk `tokens` from the root.
    ///
    /// Sub-command names and aliases are followed until the first positional
    /// argument; flags are parsed against whatever is available at the current
    /// depth and unknown flags are skipped. After `--` every token is positional.
    pub fn lookup_path(&self, tokens: &[String]) -> Lookup<'_> {
        let mut lookup = Lookup::start(self.root());
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];
            i += 1;

            if lookup.after_terminator {
                lookup.args.push(token.clone());
                continue;
            }

            if token == "--" {
                lookup.after_terminator = true;
                continue;
            }

            if let Some(body) = token.strip_prefix("--") {
                let (name, inline) = match body.split_once('=') {
                    Some((name, value)) => (name, Some(value.to_string())),
                    None => (body, None),
                };
                match lookup.find_long(name) {
                    Some(flag) if flag.takes_value && inline.is_none() => {
                        if i < tokens.len() {
                            lookup.flags.mark(&flag.long, Some(tokens[i].clone()));
                            i += 1;
                        } else {
                            lookup.pending = Some(flag);
                        }
                    }
                    Some(flag) => lookup.flags.mark(&flag.long, inline),
                    None => debug!(flag = %token, "Skipping unknown flag"),
                }
                continue;
            }

            if token.len() > 1 && token.starts_with('-') {
                i = scan_shorthand(&mut lookup, &token[1..], tokens, i);
                continue;
            }

            if lookup.args.is_empty() {
                if let Some(sub) = lookup.command().find_subcommand(token) {
                    lookup.path.push(sub);
                    continue;
                }
            }
            lookup.args.push(token.clone());
        }

        lookup
    }
}

/// Parse a shorthand cluster such as `-v`, `-vf`, `-ffile`, `-f=file` or
/// `-f file`. Returns the index of the next unread token.
fn scan_shorthand(lookup: &mut Lookup<'_>, body: &str, tokens: &[String], mut next: usize) -> usize {
    let mut chars = body.char_indices();
    while let Some((offset, short)) = chars.next() {
        let flag = match lookup.find_short(short) {
            Some(flag) => flag,
            None => {
                debug!(flag = %short, "Skipping unknown shorthand flag");
                break;
            }
        };

        if !flag.takes_value {
            lookup.flags.mark(&flag.long, None);
            continue;
        }

        let rest = &body[offset + short.len_utf8()..];
        let rest = rest.strip_prefix('=').unwrap_or(rest);
        if !rest.is_empty() {
            lookup.flags.mark(&flag.long, Some(rest.to_string()));
        } else if next < tokens.len() {
            lookup.flags.mark(&flag.long, Some(tokens[next].clone()));
            next += 1;
        } else {
            lookup.pending = Some(flag);
        }
        break;
    }
    next
}
