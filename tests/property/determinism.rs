//! Property-based tests for determinism guarantees

use proptest::prelude::*;
use shellcomp::config::LayoutConfig;
use shellcomp::protocol::{parse_response, write_response};
use shellcomp::render::{render, Rendered};
use shellcomp::{CommandSpec, CommandTree, CompletionRequest, CompletionResolver, Directive, FlagSpec};

fn word() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,8}"
}

fn tree_with_values(values: &[String]) -> CommandTree {
    CommandTree::new(
        CommandSpec::new("root")
            .valid_args(values)
            .flag(FlagSpec::value_flag("name").short('n'))
            .persistent_flag(FlagSpec::bool_flag("verbose").short('v'))
            .subcommand(CommandSpec::new("status").short("Show status"))
            .subcommand(CommandSpec::new("sync").alias("pull")),
    )
}

/// Positional answers are exactly the declared values carrying the typed
/// prefix, in declaration order.
#[test]
fn test_prefix_filter_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(prop::collection::vec(word(), 0..12), "[a-z]{0,3}"),
            |(values, prefix)| {
                let tree = CommandTree::new(CommandSpec::new("root").valid_args(&values));
                let out = CompletionResolver::new(&tree)
                    .resolve(&CompletionRequest::new(Vec::<String>::new(), prefix.clone()));

                let expected: Vec<&str> = values
                    .iter()
                    .map(String::as_str)
                    .filter(|v| v.starts_with(prefix.as_str()))
                    .collect();
                prop_assert_eq!(out.values(), expected);
                if !values.is_empty() {
                    prop_assert_eq!(out.directive, Directive::NO_FILE_COMP);
                }
                Ok(())
            },
        )
        .unwrap();
}

/// Resolving the same request twice gives the same answer.
#[test]
fn test_resolution_is_idempotent() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                prop::collection::vec(word(), 0..6),
                prop::collection::vec(
                    prop_oneof![
                        word(),
                        Just("--name".to_string()),
                        Just("-v".to_string()),
                        Just("--".to_string()),
                        Just("status".to_string()),
                    ],
                    0..5,
                ),
                "-{0,2}[a-z]{0,3}",
            ),
            |(values, args, to_complete)| {
                let tree = tree_with_values(&values);
                let request = CompletionRequest::new(args, to_complete);
                let resolver = CompletionResolver::new(&tree);
                prop_assert_eq!(resolver.resolve(&request), resolver.resolve(&request));
                Ok(())
            },
        )
        .unwrap();
}

/// Merging directives is order-independent and keeps the error absorbing.
#[test]
fn test_directive_merge_commutes() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(0u32..32, 0u32..32), |(a, b)| {
            let a = Directive::from_bits_truncate(a);
            let b = Directive::from_bits_truncate(b);
            prop_assert_eq!(a.merge(b), b.merge(a));
            if a.is_error() || b.is_error() {
                prop_assert_eq!(a.merge(b), Directive::ERROR);
            }
            Ok(())
        })
        .unwrap();
}

/// Whatever the resolver answers, the scripts' parser reads it back.
#[test]
fn test_answers_survive_the_wire() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(prop::collection::vec(word(), 0..8), "[a-z]{0,2}", any::<bool>()),
            |(values, prefix, descriptions)| {
                let tree = tree_with_values(&values);
                let out = CompletionResolver::new(&tree)
                    .include_descriptions(descriptions)
                    .resolve(&CompletionRequest::new(Vec::<String>::new(), prefix));
                let mut wire = Vec::new();
                write_response(&mut wire, &out).unwrap();
                let parsed = parse_response(&String::from_utf8(wire).unwrap());
                prop_assert_eq!(parsed, out);
                Ok(())
            },
        )
        .unwrap();
}

/// A lone match is inserted bare, whatever its description.
#[test]
fn test_single_match_collapses() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(word(), "[ -~]{1,40}", 20usize..200), |(value, description, columns)| {
            let out = shellcomp::Completions::new(
                [format!("{}\t{}", value, description)],
                Directive::NO_FILE_COMP,
            );
            let rendered = render(&out, &value, columns, &LayoutConfig::default());
            prop_assert_eq!(
                rendered,
                Rendered::Candidates {
                    entries: vec![value.clone()],
                    no_space: false,
                    file_fallback: false,
                }
            );
            Ok(())
        })
        .unwrap();
}
