//! Generated scripts agree with the request protocol

use shellcomp::config::LayoutConfig;
use shellcomp::script::DirectivePlan;
use shellcomp::{Directive, ScriptCompiler, ScriptOptions, Shell};

#[test]
fn test_scripts_declare_wire_values() {
    let compiler = ScriptCompiler::new(ScriptOptions::new("root"));
    let bash = compiler.compile(Shell::Bash);
    let fish = compiler.compile(Shell::Fish);
    let pwsh = compiler.compile(Shell::PowerShell);

    for (name, value) in [
        ("Error", Directive::ERROR),
        ("NoSpace", Directive::NO_SPACE),
        ("NoFileComp", Directive::NO_FILE_COMP),
        ("FilterFileExt", Directive::FILTER_FILE_EXT),
        ("FilterDirs", Directive::FILTER_DIRS),
    ] {
        let wire = value.to_wire();
        assert!(bash.contains(&format!("local shellCompDirective{}={}", name, wire)));
        assert!(fish.contains(&format!("set -l shellCompDirective{} {}", name, wire)));
        assert!(pwsh.contains(&format!("$shellCompDirective{}={}", name, wire)));
    }
    assert_eq!(DirectivePlan::standard().entries().len(), 5);
}

#[test]
fn test_bash_script_for_program() {
    let script = ScriptCompiler::new(ScriptOptions::new("root")).compile(Shell::Bash);
    assert!(script.contains("__start_root()"));
    assert!(script.contains("complete -o default -F __start_root root"));
    assert!(script.contains("${words[0]} __complete ${args[*]}"));
}

#[test]
fn test_no_description_request_in_every_shell() {
    let compiler = ScriptCompiler::new(ScriptOptions::new("root").include_descriptions(false));
    for shell in Shell::ALL {
        let script = compiler.compile(shell);
        assert!(
            script.contains("__completeNoDesc"),
            "{} script should ask without descriptions",
            shell
        );
    }
}

#[test]
fn test_fish_registration() {
    let script = ScriptCompiler::new(ScriptOptions::new("root")).compile(Shell::Fish);
    assert!(script.contains("complete -c root -e"));
    assert!(script.contains("complete -c root -n '__root_prepare_completions' -f -a '$__root_comp_results'"));
    assert!(script.contains("$args[1] __complete"));
}

#[test]
fn test_layout_settings_reach_the_scripts() {
    let layout = LayoutConfig {
        reserved_columns: 6,
        min_description_width: 12,
        ellipsis: "...".to_string(),
    };
    let compiler = ScriptCompiler::new(ScriptOptions::new("root").layout(layout));

    let bash = compiler.compile(Shell::Bash);
    assert!(bash.contains("COLUMNS - longest - 6"));
    assert!(bash.contains("-gt 12"));
    assert!(bash.contains("desc+=\"...\""));

    let pwsh = compiler.compile(Shell::PowerShell);
    assert!(pwsh.contains("$Columns - $Longest - 6"));
    assert!(pwsh.contains("-gt 12"));
}

#[test]
fn test_invoker_is_quoted_per_shell() {
    for shell in Shell::ALL {
        let invoker = shell.command_line(&["/opt/my tools/shellcomp", "--manifest", "/etc/cli.toml"]);
        let script = ScriptCompiler::new(ScriptOptions::new("tool").invoker(invoker.clone()))
            .compile(shell);
        assert!(script.contains(&invoker), "{} script lacks its invoker", shell);
    }
}

#[test]
fn test_write_to_matches_compile() {
    let compiler = ScriptCompiler::new(ScriptOptions::new("root"));
    let mut out = Vec::new();
    compiler.write_to(Shell::Zsh, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), compiler.compile(Shell::Zsh));
}
