//! Bash dialect.
//!
//! Needs bash-completion for `_get_comp_words_by_ref` and `_filedir`. Bash has
//! no native description display, so descriptions are aligned and truncated by
//! hand against `$COLUMNS`.

use super::Dialect;

pub(crate) struct Bash;

impl Dialect for Bash {
    fn template(&self) -> &'static str {
        TEMPLATE
    }

    fn declare(&self, variable: &str, value: u32) -> String {
        format!("local {}={}", variable, value)
    }

    fn default_invoker(&self) -> &'static str {
        "${words[0]}"
    }
}

const TEMPLATE: &str = r#"# bash completion for @@PROGRAM@@ -*- shell-script -*-

__@@IDENT@@_debug()
{
    if [[ -n ${BASH_COMP_DEBUG_FILE-} ]]; then
        echo "$*" >> "${BASH_COMP_DEBUG_FILE}"
    fi
}

__@@IDENT@@_perform_completion()
{
    __@@IDENT@@_debug
    __@@IDENT@@_debug "========= starting completion logic =========="
    __@@IDENT@@_debug "cur is ${cur}, words[*] is ${words[*]}, #words[@] is ${#words[@]}, cword is $cword"

    # Complete at the cursor, not at the end of the line.
    words=("${words[@]:0:$cword+1}")
    __@@IDENT@@_debug "Truncated words[*]: ${words[*]},"

@@DIRECTIVES@@

    local out requestComp lastParam lastChar lastLine comp directive args

    args=("${words[@]:1}")
    requestComp="@@INVOKER@@ @@REQUEST@@ ${args[*]}"

    lastParam=${words[$((${#words[@]}-1))]}
    lastChar=${lastParam:$((${#lastParam}-1)):1}
    __@@IDENT@@_debug "lastParam ${lastParam}, lastChar ${lastChar}"

    if [ -z "${cur}" ] && [ "${lastChar}" != "=" ]; then
        # Cursor is on fresh whitespace: complete an empty word.
        __@@IDENT@@_debug "Adding extra empty parameter"
        requestComp="${requestComp} \"\""
    fi

    # Bash completes only the part after '=' of "--flag=value".
    if [[ "${cur}" == -*=* ]]; then
        cur="${cur#*=}"
    fi

    __@@IDENT@@_debug "Calling ${requestComp}"
    out=$(eval "${requestComp}" 2>/dev/null)

    # The directive is the last line, ":<integer>".
    lastLine=${out##*$'\n'}
    if [[ "${lastLine}" =~ ^:[0-9]+$ ]]; then
        directive=${lastLine#:}
        out=${out%"${lastLine}"}
    else
        directive=0
    fi
    __@@IDENT@@_debug "The completion directive is: ${directive}"
    __@@IDENT@@_debug "The completions are: ${out}"

    if [ $((directive & shellCompDirectiveError)) -ne 0 ]; then
        __@@IDENT@@_debug "Received error directive; no completion"
        return
    fi
    if [ $((directive & shellCompDirectiveNoSpace)) -ne 0 ]; then
        if [[ $(type -t compopt) = "builtin" ]]; then
            __@@IDENT@@_debug "Activating no space"
            compopt -o nospace
        fi
    fi
    if [ $((directive & shellCompDirectiveNoFileComp)) -ne 0 ]; then
        if [[ $(type -t compopt) = "builtin" ]]; then
            __@@IDENT@@_debug "Activating no file completion"
            compopt +o default
        fi
    fi

    if [ $((directive & shellCompDirectiveFilterFileExt)) -ne 0 ]; then
        local fullFilter filter
        # Unquoted on purpose: one extension per word.
        for filter in ${out}; do
            fullFilter+="$filter|"
        done
        __@@IDENT@@_debug "File filtering command: _filedir ${fullFilter%|}"
        _filedir "${fullFilter%|}"
    elif [ $((directive & shellCompDirectiveFilterDirs)) -ne 0 ]; then
        local subdir
        subdir=$(printf "%s" "${out%%$'\n'*}")
        if [ -n "$subdir" ]; then
            __@@IDENT@@_debug "Listing directories in $subdir"
            pushd "$subdir" >/dev/null 2>&1 && _filedir -d && popd >/dev/null 2>&1 || return
        else
            __@@IDENT@@_debug "Listing directories in ."
            _filedir -d
        fi
    else
        local tab
        tab=$(printf '\t')
        local longest=0
        while IFS='' read -r comp; do
            comp=${comp%%$tab*}
            if ((${#comp}>longest)); then
                longest=${#comp}
            fi
        done < <(printf "%s\n" "${out}")

        local completions=()
        while IFS='' read -r comp; do
            if [ -z "$comp" ]; then
                continue
            fi
            __@@IDENT@@_debug "Original comp: $comp"
            comp="$(__@@IDENT@@_format_comp_descriptions "$comp" "$longest")"
            __@@IDENT@@_debug "Final comp: $comp"
            completions+=("$comp")
        done < <(printf "%s\n" "${out}")

        while IFS='' read -r comp; do
            COMPREPLY+=("$comp")
        done < <(compgen -W "${completions[*]}" -- "$cur")

        # A unique match is inserted as is, without its description.
        if [ ${#COMPREPLY[*]} -eq 1 ]; then
            comp="${COMPREPLY[0]%%  (*}"
            comp="${comp%"${comp##*[! ]}"}"
            __@@IDENT@@_debug "Single completion left: ${comp}"
            COMPREPLY=("$comp")
        fi
    fi

    __@@IDENT@@_handle_special_char "$cur" :
    __@@IDENT@@_handle_special_char "$cur" =
}

# Bash splits words on COMP_WORDBREAKS characters; drop what precedes the last
# one so it is not inserted twice.
__@@IDENT@@_handle_special_char()
{
    local comp="$1"
    local char=$2
    if [[ "$comp" == *${char}* && "$COMP_WORDBREAKS" == *${char}* ]]; then
        local word=${comp%"${comp##*${char}}"}
        local idx=${#COMPREPLY[*]}
        while [[ $((--idx)) -ge 0 ]]; do
            COMPREPLY[$idx]=${COMPREPLY[$idx]#"$word"}
        done
    fi
}

__@@IDENT@@_format_comp_descriptions()
{
    local tab
    tab=$(printf '\t')
    local comp="$1"
    local longest=$2

    if [[ "$comp" == *$tab* ]]; then
        local desc maxdesclength i
        desc=${comp#*$tab}
        comp=${comp%%$tab*}

        maxdesclength=$(( COLUMNS - longest - @@RESERVED@@ ))

        if [[ $maxdesclength -gt @@MINDESC@@ ]]; then
            for ((i = ${#comp} ; i < longest ; i++)); do
                comp+=" "
            done
        else
            # Too narrow to align: give the description the rest of the line.
            maxdesclength=$(( COLUMNS - ${#comp} - @@RESERVED@@ ))
        fi

        if [ $maxdesclength -gt 0 ]; then
            if [ ${#desc} -gt $maxdesclength ]; then
                desc=${desc:0:$(( maxdesclength - 1 ))}
                desc+="@@ELLIPSIS@@"
            fi
            comp+="  ($desc)"
        fi
    fi

    printf "%q" "${comp}"
}

__start_@@IDENT@@()
{
    local cur prev words cword

    COMPREPLY=()
    _get_comp_words_by_ref -n "=:" cur prev words cword

    __@@IDENT@@_perform_completion
}

if [[ $(type -t compopt) = "builtin" ]]; then
    complete -o default -F __start_@@IDENT@@ @@PROGRAM@@
else
    complete -o default -o nospace -F __start_@@IDENT@@ @@PROGRAM@@
fi

# ex: ts=4 sw=4 et filetype=sh
"#;
