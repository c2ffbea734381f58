//! Dynamic positional and flag-value completion through the request protocol

use crate::integration::test_utils::{execute_request, lines};
use shellcomp::{CommandSpec, CommandTree, Completions, Directive, FlagSpec};

fn first_two(
    _ctx: &shellcomp::CompletionContext<'_>,
    args: &[String],
    to_complete: &str,
) -> anyhow::Result<Completions> {
    if !args.is_empty() {
        return Ok(Completions::directive_only(Directive::NO_FILE_COMP));
    }
    let values = ["one\tThe first", "two\tThe second"]
        .into_iter()
        .filter(|c| c.starts_with(to_complete));
    Ok(Completions::new(values, Directive::DEFAULT))
}

fn third_fourth(
    _ctx: &shellcomp::CompletionContext<'_>,
    args: &[String],
    to_complete: &str,
) -> anyhow::Result<Completions> {
    if !args.is_empty() {
        return Ok(Completions::directive_only(Directive::NO_FILE_COMP));
    }
    let values = ["three\tThe third", "four\tThe fourth"]
        .into_iter()
        .filter(|c| c.starts_with(to_complete));
    Ok(Completions::new(values, Directive::DEFAULT))
}

fn child_tree() -> CommandTree {
    CommandTree::new(
        CommandSpec::new("root")
            .no_args()
            .subcommand(
                CommandSpec::new("child1")
                    .short("first command")
                    .valid_args_fn(first_two),
            )
            .subcommand(
                CommandSpec::new("child2")
                    .short("second command")
                    .valid_args_fn(third_fourth),
            )
            .subcommand(
                CommandSpec::new("child3")
                    .alias("son")
                    .alias("daughter")
                    .valid_args_fn(first_two),
            ),
    )
}

#[test]
fn test_single_command_callback() {
    let tree = CommandTree::new(CommandSpec::new("root").valid_args_fn(first_two));

    assert_eq!(
        execute_request(&tree, false, &[""]),
        lines(&["one", "two", ":0", "Completion ended with directive: Default"])
    );
    assert_eq!(
        execute_request(&tree, false, &["t"]),
        lines(&["two", ":0", "Completion ended with directive: Default"])
    );
}

#[test]
fn test_callback_sees_previous_arguments() {
    let tree = CommandTree::new(CommandSpec::new("root").valid_args_fn(first_two));
    assert_eq!(
        execute_request(&tree, false, &["unexpectedArg", "t"]),
        lines(&[":4", "Completion ended with directive: NoFileComp"])
    );
}

#[test]
fn test_child_command_callbacks() {
    let tree = child_tree();

    assert_eq!(
        execute_request(&tree, false, &["child1", ""]),
        lines(&["one", "two", ":0", "Completion ended with directive: Default"])
    );
    assert_eq!(
        execute_request(&tree, false, &["child1", "t"]),
        lines(&["two", ":0", "Completion ended with directive: Default"])
    );
    assert_eq!(
        execute_request(&tree, false, &["child1", "unexpectedArg", "t"]),
        lines(&[":4", "Completion ended with directive: NoFileComp"])
    );
    assert_eq!(
        execute_request(&tree, false, &["child2", ""]),
        lines(&["three", "four", ":0", "Completion ended with directive: Default"])
    );
    assert_eq!(
        execute_request(&tree, false, &["child2", "t"]),
        lines(&["three", ":0", "Completion ended with directive: Default"])
    );
}

#[test]
fn test_child_command_callbacks_with_descriptions() {
    let tree = child_tree();

    assert_eq!(
        execute_request(&tree, true, &["child1", ""]),
        lines(&[
            "one\tThe first",
            "two\tThe second",
            ":0",
            "Completion ended with directive: Default",
        ])
    );
    assert_eq!(
        execute_request(&tree, true, &["ch"]),
        lines(&[
            "child1\tfirst command",
            "child2\tsecond command",
            "child3",
            ":4",
            "Completion ended with directive: NoFileComp",
        ])
    );
}

#[test]
fn test_aliases_reach_the_command() {
    let tree = child_tree();

    assert_eq!(
        execute_request(&tree, false, &["son", ""]),
        lines(&["one", "two", ":0", "Completion ended with directive: Default"])
    );
    assert_eq!(
        execute_request(&tree, false, &["daughter", "t"]),
        lines(&["two", ":0", "Completion ended with directive: Default"])
    );
    assert_eq!(
        execute_request(&tree, false, &["son", "unexpectedArg", "t"]),
        lines(&[":4", "Completion ended with directive: NoFileComp"])
    );
}

#[test]
fn test_aliases_offered_only_when_name_does_not_match() {
    let tree = child_tree();

    assert_eq!(
        execute_request(&tree, false, &["so"]),
        lines(&["son", ":4", "Completion ended with directive: NoFileComp"])
    );
    // An empty prefix lists primary names only; the root takes no arguments,
    // so there is no file fallback.
    assert_eq!(
        execute_request(&tree, false, &[""]),
        lines(&[
            "child1",
            "child2",
            "child3",
            ":4",
            "Completion ended with directive: NoFileComp",
        ])
    );
}

fn flag_value_tree() -> CommandTree {
    CommandTree::new(
        CommandSpec::new("root")
            .flag(
                FlagSpec::value_flag("introot")
                    .short('i')
                    .usage("help message for flag introot")
                    .value_fn(|_ctx, _args, to_complete| {
                        let values = ["1\tThe first", "2\tThe second", "10\tThe tenth"]
                            .into_iter()
                            .filter(|c| c.starts_with(to_complete));
                        Ok(Completions::new(values, Directive::DEFAULT))
                    }),
            )
            .flag(
                FlagSpec::value_flag("filename")
                    .usage("Enter a filename")
                    .value_fn(|_ctx, _args, to_complete| {
                        let values = [
                            "file.yaml\tYAML format",
                            "myfile.json\tJSON format",
                            "file.xml\tXML format",
                        ]
                        .into_iter()
                        .filter(|c| c.starts_with(to_complete));
                        Ok(Completions::new(
                            values,
                            Directive::NO_SPACE | Directive::NO_FILE_COMP,
                        ))
                    }),
            ),
    )
}

#[test]
fn test_flag_value_callbacks() {
    let tree = flag_value_tree();

    assert_eq!(
        execute_request(&tree, false, &["--introot", ""]),
        lines(&["1", "2", "10", ":0", "Completion ended with directive: Default"])
    );
    assert_eq!(
        execute_request(&tree, false, &["--introot", "1"]),
        lines(&["1", "10", ":0", "Completion ended with directive: Default"])
    );
    assert_eq!(
        execute_request(&tree, false, &["--filename", ""]),
        lines(&[
            "file.yaml",
            "myfile.json",
            "file.xml",
            ":6",
            "Completion ended with directive: NoSpace, NoFileComp",
        ])
    );
    assert_eq!(
        execute_request(&tree, false, &["--filename", "f"]),
        lines(&[
            "file.yaml",
            "file.xml",
            ":6",
            "Completion ended with directive: NoSpace, NoFileComp",
        ])
    );
}

#[test]
fn test_flag_value_forms() {
    let tree = flag_value_tree();

    // Shorthand and the inline `=` form reach the same callback.
    assert_eq!(
        execute_request(&tree, false, &["-i", "1"]),
        lines(&["1", "10", ":0", "Completion ended with directive: Default"])
    );
    assert_eq!(
        execute_request(&tree, true, &["--introot=1"]),
        lines(&[
            "1\tThe first",
            "10\tThe tenth",
            ":0",
            "Completion ended with directive: Default",
        ])
    );
}

#[test]
fn test_callback_fault_is_an_error_answer() {
    let tree = CommandTree::new(
        CommandSpec::new("root")
            .valid_args_fn(|_ctx, _args, _to_complete| anyhow::bail!("backend unavailable"))
            .flag(FlagSpec::value_flag("region").value_fn(|_ctx, _args, _to_complete| {
                panic!("callback bug")
            })),
    );

    assert_eq!(
        execute_request(&tree, false, &[""]),
        lines(&[":1", "Completion ended with directive: Error"])
    );
    assert_eq!(
        execute_request(&tree, false, &["--region", ""]),
        lines(&[":1", "Completion ended with directive: Error"])
    );
}

#[test]
fn test_filter_directives_pass_arguments_through() {
    let tree = CommandTree::new(
        CommandSpec::new("root")
            .flag(
                FlagSpec::value_flag("config")
                    .complete_with(shellcomp::source::file_extensions(["yaml", ".yml"])),
            )
            .flag(
                FlagSpec::value_flag("chart-dir")
                    .complete_with(shellcomp::source::directories(Some("charts"))),
            ),
    );

    // Filter arguments are not completions, so the typed prefix does not prune them.
    assert_eq!(
        execute_request(&tree, false, &["--config", "ma"]),
        lines(&["yaml", "yml", ":8", "Completion ended with directive: FilterFileExt"])
    );
    assert_eq!(
        execute_request(&tree, false, &["--chart-dir", "x"]),
        lines(&["charts", ":16", "Completion ended with directive: FilterDirs"])
    );
}

#[test]
fn test_double_dash_ends_flag_parsing() {
    let tree = CommandTree::new(
        CommandSpec::new("root")
            .flag(FlagSpec::bool_flag("force"))
            .valid_args_fn(|_ctx, args, _to_complete| {
                Ok(Completions::new(
                    args.iter().map(|a| format!("seen:{}", a)),
                    Directive::NO_FILE_COMP,
                ))
            }),
    );

    assert_eq!(
        execute_request(&tree, false, &["--", "--force", "seen"]),
        lines(&["seen:--force", ":4", "Completion ended with directive: NoFileComp"])
    );
}
