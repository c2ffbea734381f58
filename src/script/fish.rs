//! Fish dialect.
//!
//! Fish renders `value<TAB>description` itself and cannot suppress the
//! trailing space, so a lone no-space candidate is paired with a longer twin
//! to stop fish from committing it.

use super::Dialect;

pub(crate) struct Fish;

impl Dialect for Fish {
    fn template(&self) -> &'static str {
        TEMPLATE
    }

    fn declare(&self, variable: &str, value: u32) -> String {
        format!("set -l {} {}", variable, value)
    }

    fn default_invoker(&self) -> &'static str {
        "$args[1]"
    }
}

const TEMPLATE: &str = r#"# fish completion for @@PROGRAM@@ -*- shell-script -*-

function __@@IDENT@@_debug
    set -l file "$BASH_COMP_DEBUG_FILE"
    if test -n "$file"
        echo "$argv" >> $file
    end
end

function __@@IDENT@@_perform_completion
    __@@IDENT@@_debug "Starting __@@IDENT@@_perform_completion"

    set -l args (commandline -opc)
    # Escaped so an empty or spaced token survives eval.
    set -l lastArg (string escape -- (commandline -ct))

    __@@IDENT@@_debug "args: $args"
    __@@IDENT@@_debug "last arg: $lastArg"

    set -l requestComp "@@INVOKER@@ @@REQUEST@@ $args[2..-1] $lastArg"

    __@@IDENT@@_debug "Calling $requestComp"
    set -l results (eval $requestComp 2> /dev/null)

    # Trailing blank lines would hide the directive line.
    for line in $results[-1..1]
        if test (string trim -- $line) = ""
            set results $results[1..-2]
        else
            break
        end
    end

    set -l comps $results[1..-2]
    set -l directiveLine $results[-1]

    __@@IDENT@@_debug "Comps: $comps"
    __@@IDENT@@_debug "DirectiveLine: $directiveLine"

    for comp in $comps
        printf "%s\n" "$comp"
    end

    printf "%s\n" "$directiveLine"
end

# Fills __@@IDENT@@_comp_results and sets __@@IDENT@@_comp_do_file_completion
# when fish should fall back to plain file completion.
function __@@IDENT@@_prepare_completions
    __@@IDENT@@_debug ""
    __@@IDENT@@_debug "========= starting completion logic =========="

    set --erase __@@IDENT@@_comp_results
    set --erase __@@IDENT@@_comp_do_file_completion

    set -l results (__@@IDENT@@_perform_completion)
    __@@IDENT@@_debug "Completion results: $results"

    if test -z "$results"
        __@@IDENT@@_debug "No completion, probably due to a failure"
        set --global __@@IDENT@@_comp_do_file_completion 1
        return 1
    end

@@DIRECTIVES@@

    set -l directive 0
    if string match -qr -- '^:[0-9]+$' "$results[-1]"
        set directive (string sub --start 2 -- $results[-1])
        set results $results[1..-2]
    end
    set --global __@@IDENT@@_comp_results $results

    __@@IDENT@@_debug "Completions are: $__@@IDENT@@_comp_results"
    __@@IDENT@@_debug "Directive is: $directive"

    set -l compErr (math --scale 0 "bitand($directive, $shellCompDirectiveError)")
    if test $compErr -ne 0
        __@@IDENT@@_debug "Received error directive: aborting."
        set --erase __@@IDENT@@_comp_results
        return 1
    end

    # Values of "--flag=value" are completed without the flag part and
    # offered with it.
    set -l token (commandline -ct)
    set -l flagPrefix (string match -r -- '^-[^=]*=' "$token")
    set -l value (string sub --start (math (string length -- "$flagPrefix") + 1) -- "$token")
    __@@IDENT@@_debug "flagPrefix: $flagPrefix"

    set -l filefilter (math --scale 0 "bitand($directive, $shellCompDirectiveFilterFileExt)")
    set -l dirfilter (math --scale 0 "bitand($directive, $shellCompDirectiveFilterDirs)")
    if test $filefilter -ne 0
        set -l exts $__@@IDENT@@_comp_results
        set --global __@@IDENT@@_comp_results
        for path in (__fish_complete_path "$value")
            set path (string split -f1 \t -- "$path")
            set -l keep 0
            if string match -q -- '*/' "$path"
                set keep 1
            end
            for ext in $exts
                if string match -q -- "*.$ext" "$path"
                    set keep 1
                end
            end
            if test $keep -ne 0
                set --append __@@IDENT@@_comp_results "$flagPrefix$path"
            end
        end
        __@@IDENT@@_debug "Filtered by extension: $__@@IDENT@@_comp_results"
        return 0
    end
    if test $dirfilter -ne 0
        set -l subdir $__@@IDENT@@_comp_results[1]
        set -l dirs
        if test -n "$subdir"
            pushd $subdir >/dev/null 2>&1; or return 1
            set dirs (__fish_complete_directories "$value")
            popd >/dev/null 2>&1
        else
            set dirs (__fish_complete_directories "$value")
        end
        set --global __@@IDENT@@_comp_results
        for dir in $dirs
            set --append __@@IDENT@@_comp_results "$flagPrefix"(string split -f1 \t -- "$dir")
        end
        return 0
    end

    if test -n "$flagPrefix"
        set -l prefixed
        for comp in $__@@IDENT@@_comp_results
            set --append prefixed "$flagPrefix$comp"
        end
        set --global __@@IDENT@@_comp_results $prefixed
    end

    set -l nospace (math --scale 0 "bitand($directive, $shellCompDirectiveNoSpace)")
    set -l nofiles (math --scale 0 "bitand($directive, $shellCompDirectiveNoFileComp)")

    set -l numComps (count $__@@IDENT@@_comp_results)
    __@@IDENT@@_debug "numComps: $numComps"

    if test $numComps -eq 1
        # A unique match is inserted as is, without its description.
        set --global __@@IDENT@@_comp_results (string split -f1 \t -- $__@@IDENT@@_comp_results[1])
        if test $nospace -ne 0
            __@@IDENT@@_debug "Adding second completion to perform nospace directive"
            set --global __@@IDENT@@_comp_results $__@@IDENT@@_comp_results[1] $__@@IDENT@@_comp_results[1].
        end
    end

    if test $numComps -eq 0; and test $nofiles -eq 0
        __@@IDENT@@_debug "Requesting file completion"
        set --global __@@IDENT@@_comp_do_file_completion 1
    end

    return 0
end

# Load any completions shipped elsewhere, then drop them: this script owns
# completion for @@PROGRAM@@.
complete --do-complete "@@PROGRAM@@ " > /dev/null 2>&1
complete -c @@PROGRAM@@ -e

# Entries run last-defined first, so the program is asked before the file
# fallback condition is checked.
complete -c @@PROGRAM@@ -n 'set --query __@@IDENT@@_comp_do_file_completion' -F
complete -c @@PROGRAM@@ -n '__@@IDENT@@_prepare_completions' -f -a '$__@@IDENT@@_comp_results'
"#;
