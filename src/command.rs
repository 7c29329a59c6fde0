/// These are the commands that a client can issue against the variable store, one per line.
///
/// Classification is by case-sensitive prefix, checked in the same order the commands are
/// declared here. `list-vars` and `exit` match as whole-word prefixes, so trailing text
/// after them is tolerated and ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// list the names of all stored variables in insertion order
    ListVars,
    /// read the value of a single variable
    ReadVar {
        /// the name of the variable to read
        name: String,
    },
    /// create or overwrite a variable
    SetVar {
        /// the raw `name=value` assignment text, passed through unparsed to the store
        assignment: String,
    },
    /// close this session
    Exit,
    /// anything that matched none of the above; has no side effects
    Unknown,
}

impl Command {
    /// Classifies one input line (already stripped of its trailing line terminator) into
    /// a `Command`.
    ///
    /// This is a pure function: it performs no locking and touches no shared state, so it
    /// can be tested without a running store or socket.
    pub fn parse(line: &str) -> Command {
        if line.starts_with("list-vars") {
            Command::ListVars
        } else if let Some(rest) = line.strip_prefix("read ") {
            Command::ReadVar {
                name: rest.trim().to_string(),
            }
        } else if let Some(rest) = line.strip_prefix("set ") {
            Command::SetVar {
                assignment: rest.to_string(),
            }
        } else if line.starts_with("exit") {
            Command::Exit
        } else {
            Command::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Command;

    #[test]
    fn classifies_list_vars() {
        assert_eq!(Command::parse("list-vars"), Command::ListVars);
    }

    #[test]
    fn classifies_read_and_trims_the_name() {
        assert_eq!(
            Command::parse("read  counter "),
            Command::ReadVar {
                name: "counter".to_string()
            }
        );
    }

    #[test]
    fn classifies_set_and_passes_the_assignment_through_unparsed() {
        assert_eq!(
            Command::parse("set x = 5"),
            Command::SetVar {
                assignment: "x = 5".to_string()
            }
        );
    }

    #[test]
    fn classifies_exit() {
        assert_eq!(Command::parse("exit"), Command::Exit);
    }

    #[test]
    fn prefix_match_tolerates_trailing_text() {
        assert_eq!(Command::parse("list-vars please"), Command::ListVars);
        assert_eq!(Command::parse("exit now"), Command::Exit);
    }

    #[test]
    fn everything_else_is_unknown() {
        assert_eq!(Command::parse(""), Command::Unknown);
        assert_eq!(Command::parse("get x"), Command::Unknown);
        assert_eq!(Command::parse("READ x"), Command::Unknown);
        // the command prefixes require their trailing space
        assert_eq!(Command::parse("read"), Command::Unknown);
        assert_eq!(Command::parse("set"), Command::Unknown);
    }
}
