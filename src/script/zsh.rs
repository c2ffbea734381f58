//! Zsh dialect. Descriptions are laid out by `_describe` itself.

use super::Dialect;

pub(crate) struct Zsh;

impl Dialect for Zsh {
    fn template(&self) -> &'static str {
        TEMPLATE
    }

    fn declare(&self, variable: &str, value: u32) -> String {
        format!("local {}={}", variable, value)
    }

    fn default_invoker(&self) -> &'static str {
        "${words[1]}"
    }
}

const TEMPLATE: &str = r#"#compdef @@PROGRAM@@
compdef _@@IDENT@@ @@PROGRAM@@

# zsh completion for @@PROGRAM@@ -*- shell-script -*-

__@@IDENT@@_debug()
{
    local file="$BASH_COMP_DEBUG_FILE"
    if [[ -n ${file} ]]; then
        echo "$*" >> "${file}"
    fi
}

_@@IDENT@@()
{
@@DIRECTIVES@@

    local lastParam lastChar lastLine flagPrefix requestComp out directive comp noSpace
    local -a completions

    __@@IDENT@@_debug "\n========= starting completion logic =========="
    __@@IDENT@@_debug "CURRENT: ${CURRENT}, words[*]: ${words[*]}"

    # Complete at the cursor, not at the end of the line.
    words=("${=words[1,CURRENT]}")
    __@@IDENT@@_debug "Truncated words[*]: ${words[*]},"

    lastParam=${words[-1]}
    lastChar=${lastParam[-1]}
    __@@IDENT@@_debug "lastParam: ${lastParam}, lastChar: ${lastChar}"

    # Values of "--flag=value" must be offered with their flag prefix.
    setopt local_options BASH_REMATCH
    if [[ "${lastParam}" =~ '-.*=' ]]; then
        flagPrefix="-P ${BASH_REMATCH}"
    fi

    requestComp="@@INVOKER@@ @@REQUEST@@ ${words[2,-1]}"
    if [ "${lastChar}" = "" ]; then
        __@@IDENT@@_debug "Adding extra empty parameter"
        requestComp="${requestComp} \"\""
    fi

    __@@IDENT@@_debug "About to call: eval ${requestComp}"
    out=$(eval ${requestComp} 2>/dev/null)
    __@@IDENT@@_debug "completion output: ${out}"

    lastLine=${out##*$'\n'}
    if [[ "${lastLine}" =~ '^:[0-9]+$' ]]; then
        directive=${lastLine#:}
        out=${out%"${lastLine}"}
    else
        __@@IDENT@@_debug "No directive found. Setting to default"
        directive=0
    fi

    __@@IDENT@@_debug "directive: ${directive}"
    __@@IDENT@@_debug "completions: ${out}"
    __@@IDENT@@_debug "flagPrefix: ${flagPrefix}"

    if [ $((directive & shellCompDirectiveError)) -ne 0 ]; then
        __@@IDENT@@_debug "Completion received error. Ignoring completions."
        return
    fi

    local tab=$(printf '\t')
    while IFS='\n' read -r comp; do
        if [ -n "$comp" ]; then
            # _describe separates value and description with ':'.
            comp=${comp//:/\\:}
            comp=${comp//$tab/:}
            __@@IDENT@@_debug "Adding completion: ${comp}"
            completions+=("${comp}")
        fi
    done < <(printf "%s\n" "${out}")

    if [ $((directive & shellCompDirectiveNoSpace)) -ne 0 ]; then
        __@@IDENT@@_debug "Activating nospace."
        noSpace="-S ''"
    fi

    if [ $((directive & shellCompDirectiveFilterFileExt)) -ne 0 ]; then
        local filteringCmd filter
        filteringCmd='_files'
        for filter in ${completions[@]}; do
            if [ ${filter[1]} != '*' ]; then
                filter="\*.$filter"
            fi
            filteringCmd+=" -g $filter"
        done
        filteringCmd+=" ${flagPrefix}"

        __@@IDENT@@_debug "File filtering command: $filteringCmd"
        _arguments '*:filename:'"$filteringCmd"
    elif [ $((directive & shellCompDirectiveFilterDirs)) -ne 0 ]; then
        local subdir result
        subdir="${completions[1]}"
        if [ -n "$subdir" ]; then
            __@@IDENT@@_debug "Listing directories in $subdir"
            pushd "${subdir}" >/dev/null 2>&1
        else
            __@@IDENT@@_debug "Listing directories in ."
        fi

        _arguments '*:dirname:_files -/'" ${flagPrefix}"
        result=$?
        if [ -n "$subdir" ]; then
            popd >/dev/null 2>&1
        fi
        return $result
    else
        __@@IDENT@@_debug "Calling _describe"
        if eval _describe "completions" completions $flagPrefix $noSpace; then
            __@@IDENT@@_debug "_describe found some completions"
            return 0
        fi

        __@@IDENT@@_debug "_describe did not find completions."
        if [ $((directive & shellCompDirectiveNoFileComp)) -ne 0 ]; then
            __@@IDENT@@_debug "deactivating file completion"
            # Non-zero lets zsh try its other matchers.
            return 1
        fi

        __@@IDENT@@_debug "Activating file completion"
        _arguments '*:filename:_files'" ${flagPrefix}"
    fi
}

# Run only when autoloaded, not when sourced.
if [ "$funcstack[1]" = "_@@IDENT@@" ]; then
    _@@IDENT@@
fi
"#;
