//! Required flags are offered before anything else until supplied

use crate::integration::test_utils::{execute_request, lines};
use shellcomp::{CommandSpec, CommandTree, Completions, Directive, FlagSpec};

fn required_tree() -> CommandTree {
    CommandTree::new(
        CommandSpec::new("root")
            .valid_args(["realArg"])
            .flag(
                FlagSpec::value_flag("requiredFlag")
                    .short('r')
                    .usage("required flag")
                    .required(),
            )
            .persistent_flag(
                FlagSpec::value_flag("requiredPersistent")
                    .short('p')
                    .usage("required persistent")
                    .required(),
            )
            .flag(FlagSpec::value_flag("release").short('R').usage("Release name"))
            .subcommand(
                CommandSpec::new("childCmd")
                    .valid_args_fn(|_ctx, _args, _to_complete| {
                        Ok(Completions::new(["subArg"], Directive::NO_FILE_COMP))
                    })
                    .flag(
                        FlagSpec::bool_flag("subRequired")
                            .short('s')
                            .usage("sub required flag")
                            .required(),
                    )
                    .flag(
                        FlagSpec::bool_flag("subNotRequired")
                            .short('n')
                            .usage("sub not required flag"),
                    ),
            ),
    )
}

#[test]
fn test_required_flags_offered_without_dash() {
    let tree = required_tree();
    assert_eq!(
        execute_request(&tree, false, &[""]),
        lines(&[
            "childCmd",
            "--requiredFlag",
            "--requiredFlag=",
            "-r",
            "--requiredPersistent",
            "--requiredPersistent=",
            "-p",
            "realArg",
            ":4",
            "Completion ended with directive: NoFileComp",
        ])
    );
}

#[test]
fn test_required_flags_shadow_other_flags() {
    let tree = required_tree();
    assert_eq!(
        execute_request(&tree, false, &["-"]),
        lines(&[
            "--requiredFlag",
            "--requiredFlag=",
            "-r",
            "--requiredPersistent",
            "--requiredPersistent=",
            "-p",
            ":0",
            "Completion ended with directive: Default",
        ])
    );
}

#[test]
fn test_other_flags_when_no_required_flag_matches() {
    let tree = required_tree();
    assert_eq!(
        execute_request(&tree, false, &["--relea"]),
        lines(&["--release", "--release=", ":0", "Completion ended with directive: Default"])
    );
}

#[test]
fn test_required_flags_of_sub_commands() {
    let tree = required_tree();
    assert_eq!(
        execute_request(&tree, false, &["childCmd", ""]),
        lines(&[
            "--requiredPersistent",
            "--requiredPersistent=",
            "-p",
            "--subRequired",
            "-s",
            "subArg",
            ":4",
            "Completion ended with directive: NoFileComp",
        ])
    );
    assert_eq!(
        execute_request(&tree, false, &["childCmd", "-"]),
        lines(&[
            "--requiredPersistent",
            "--requiredPersistent=",
            "-p",
            "--subRequired",
            "-s",
            ":0",
            "Completion ended with directive: Default",
        ])
    );
    assert_eq!(
        execute_request(&tree, false, &["childCmd", "--subNot"]),
        lines(&["--subNotRequired", ":0", "Completion ended with directive: Default"])
    );
}

#[test]
fn test_supplied_required_flags_drop_out() {
    let tree = required_tree();
    assert_eq!(
        execute_request(&tree, false, &["--requiredFlag", "1", ""]),
        lines(&[
            "childCmd",
            "--requiredPersistent",
            "--requiredPersistent=",
            "-p",
            "realArg",
            ":4",
            "Completion ended with directive: NoFileComp",
        ])
    );
    assert_eq!(
        execute_request(&tree, false, &["--requiredPersistent", "1", ""]),
        lines(&[
            "childCmd",
            "--requiredFlag",
            "--requiredFlag=",
            "-r",
            "realArg",
            ":4",
            "Completion ended with directive: NoFileComp",
        ])
    );
    assert_eq!(
        execute_request(&tree, false, &["--requiredFlag", "1", "--requiredPersistent", "1", ""]),
        lines(&["childCmd", "realArg", ":4", "Completion ended with directive: NoFileComp"])
    );
}

#[test]
fn test_each_request_starts_fresh() {
    let tree = required_tree();
    let first = execute_request(&tree, false, &["--requiredFlag", "1", ""]);
    let again = execute_request(&tree, false, &[""]);
    assert_ne!(first, again);
    assert!(again.contains("--requiredFlag\n"));
}
