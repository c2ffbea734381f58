//! Flag-name completion: local, persistent, shorthand and `=` forms

use crate::integration::test_utils::{execute_request, lines};
use shellcomp::{CommandSpec, CommandTree, FlagSpec};

fn flag_tree() -> CommandTree {
    CommandTree::new(
        CommandSpec::new("root")
            .flag(FlagSpec::value_flag("first").short('f').usage("first flag"))
            .persistent_flag(FlagSpec::bool_flag("second").short('s').usage("second flag"))
            .subcommand(
                CommandSpec::new("childCmd")
                    .short("first command")
                    .flag(FlagSpec::value_flag("subFlag").usage("sub flag")),
            ),
    )
}

#[test]
fn test_flag_names_need_a_dash() {
    let tree = flag_tree();
    assert_eq!(
        execute_request(&tree, false, &[""]),
        lines(&["childCmd", ":0", "Completion ended with directive: Default"])
    );
    assert_eq!(
        execute_request(&tree, true, &[""]),
        lines(&["childCmd\tfirst command", ":0", "Completion ended with directive: Default"])
    );
}

#[test]
fn test_flag_names_completed() {
    let tree = flag_tree();
    assert_eq!(
        execute_request(&tree, false, &["-"]),
        lines(&[
            "--first",
            "--first=",
            "-f",
            "--second",
            "-s",
            ":0",
            "Completion ended with directive: Default",
        ])
    );
    assert_eq!(
        execute_request(&tree, false, &["--f"]),
        lines(&["--first", "--first=", ":0", "Completion ended with directive: Default"])
    );
}

#[test]
fn test_flag_names_with_descriptions() {
    let tree = flag_tree();
    assert_eq!(
        execute_request(&tree, true, &["-"]),
        lines(&[
            "--first\tfirst flag",
            "--first=\tfirst flag",
            "-f\tfirst flag",
            "--second\tsecond flag",
            "-s\tsecond flag",
            ":0",
            "Completion ended with directive: Default",
        ])
    );
}

#[test]
fn test_persistent_flags_reach_sub_commands() {
    let tree = flag_tree();
    assert_eq!(
        execute_request(&tree, false, &["childCmd", "-"]),
        lines(&[
            "--second",
            "-s",
            "--subFlag",
            "--subFlag=",
            ":0",
            "Completion ended with directive: Default",
        ])
    );
    assert_eq!(
        execute_request(&tree, true, &["childCmd", "-"]),
        lines(&[
            "--second\tsecond flag",
            "-s\tsecond flag",
            "--subFlag\tsub flag",
            "--subFlag=\tsub flag",
            ":0",
            "Completion ended with directive: Default",
        ])
    );
}

#[test]
fn test_supplied_flags_are_not_offered_again() {
    let tree = flag_tree();
    assert_eq!(
        execute_request(&tree, false, &["--second", "-"]),
        lines(&["--first", "--first=", "-f", ":0", "Completion ended with directive: Default"])
    );
    // Shorthand and inline values mark the flag as supplied too.
    assert_eq!(
        execute_request(&tree, false, &["-s", "--first=3", "-"]),
        lines(&[":0", "Completion ended with directive: Default"])
    );
}

#[test]
fn test_flag_value_position_is_not_a_flag_name() {
    let tree = flag_tree();
    // `--first` is waiting for its value and has no completion source.
    assert_eq!(
        execute_request(&tree, false, &["--first", ""]),
        lines(&[":0", "Completion ended with directive: Default"])
    );
    // A boolean flag does not consume the next word.
    assert_eq!(
        execute_request(&tree, false, &["--second", ""]),
        lines(&["childCmd", ":0", "Completion ended with directive: Default"])
    );
}
