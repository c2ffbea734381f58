//! PowerShell dialect. Works with every PSReadLine Tab mode; menu text is
//! aligned and truncated by hand in `Complete` mode.

use super::Dialect;

pub(crate) struct PowerShell;

impl Dialect for PowerShell {
    fn template(&self) -> &'static str {
        TEMPLATE
    }

    fn declare(&self, variable: &str, value: u32) -> String {
        format!("${}={}", variable, value)
    }

    fn default_invoker(&self) -> &'static str {
        "$Program"
    }
}

const TEMPLATE: &str = r#"# powershell completion for @@PROGRAM@@ -*- shell-script -*-

function __@@IDENT@@_debug {
    if ($env:BASH_COMP_DEBUG_FILE) {
        "$args" | Out-File -Append -FilePath "$env:BASH_COMP_DEBUG_FILE"
    }
}

filter __@@IDENT@@_escapeStringWithSpecialChars {
    $_ -replace '\s|#|@|\$|;|,|''|\{|\}|\(|\)|"|`|\||<|>|&','`$&'
}

Register-ArgumentCompleter -CommandName '@@PROGRAM@@' -ScriptBlock {
    param(
        $WordToComplete,
        $CommandAst,
        $CursorPosition
    )

    $Command = "$($CommandAst.CommandElements)"

    __@@IDENT@@_debug ""
    __@@IDENT@@_debug "========= starting completion logic =========="
    __@@IDENT@@_debug "WordToComplete: $WordToComplete Command: $Command CursorPosition: $CursorPosition"

    # Complete at the cursor, not at the end of the line.
    if ($Command.Length -gt $CursorPosition) {
        $Command = $Command.Substring(0, $CursorPosition)
    }
    __@@IDENT@@_debug "Truncated command: $Command"

@@DIRECTIVES@@

    $Program, $Arguments = $Command.Split(" ", 2)
    $RequestComp = "@@INVOKER@@ @@REQUEST@@ $Arguments"
    __@@IDENT@@_debug "RequestComp: $RequestComp"

    # $WordToComplete is stale when the cursor moved; use the last argument.
    if ($WordToComplete -ne "") {
        $WordToComplete = $Arguments.Split(" ")[-1]
    }

    $IsEqualFlag = ($WordToComplete -Like "--*=*")
    if ($IsEqualFlag) {
        __@@IDENT@@_debug "Completing equal sign flag"
        $Flag, $WordToComplete = $WordToComplete.Split("=", 2)
    }

    if ($WordToComplete -eq "" -And (-Not $IsEqualFlag)) {
        __@@IDENT@@_debug "Adding extra empty parameter"
        # An empty argument only survives Invoke-Expression as `"`".
        $RequestComp = "$RequestComp" + ' `"`"'
    }

    __@@IDENT@@_debug "Calling $RequestComp"
    Invoke-Expression -OutVariable out "$RequestComp" 2>$null | Out-Null

    $Directive = 0
    while ($Out.Count -gt 0 -And -Not "$($Out[-1])".Trim()) {
        $Out = $Out[0..($Out.Count - 2)]
    }
    if ($Out.Count -gt 0 -And "$($Out[-1])" -match '^:[0-9]+$') {
        [int]$Directive = "$($Out[-1])".TrimStart(':')
        if ($Out.Count -gt 1) { $Out = $Out[0..($Out.Count - 2)] } else { $Out = @() }
    }
    __@@IDENT@@_debug "The completion directive is: $Directive"
    __@@IDENT@@_debug "The completions are: $Out"

    if (($Directive -band $shellCompDirectiveError) -ne 0) {
        __@@IDENT@@_debug "Received error directive; no completion"
        return
    }

    $FlagPrefix = ""
    if ($IsEqualFlag) { $FlagPrefix = $Flag + "=" }

    if (($Directive -band $shellCompDirectiveFilterFileExt) -ne 0) {
        $Patterns = $Out | ForEach-Object { "$WordToComplete*.$_" }
        # -Include only applies to the children of a wildcard path.
        return Get-ChildItem -File -Path "./*" -Include $Patterns -Name | ForEach-Object {
            [System.Management.Automation.CompletionResult]::new($FlagPrefix + ($_ | __@@IDENT@@_escapeStringWithSpecialChars), "$_", 'ProviderItem', "$_")
        }
    }
    if (($Directive -band $shellCompDirectiveFilterDirs) -ne 0) {
        $Base = "."
        if ($Out.Count -gt 0 -And $Out[0]) { $Base = $Out[0] }
        return Get-ChildItem -Directory -Path $Base -Filter "$WordToComplete*" -Name | ForEach-Object {
            [System.Management.Automation.CompletionResult]::new($FlagPrefix + ($_ | __@@IDENT@@_escapeStringWithSpecialChars), "$_", 'ProviderContainer', "$_")
        }
    }

    $Longest = 0
    $Values = $Out | ForEach-Object {
        $Name, $Description = "$_".Split("`t", 2)
        if ($Longest -lt $Name.Length) {
            $Longest = $Name.Length
        }
        # CompletionResult rejects an empty tooltip.
        if (-Not $Description) {
            $Description = " "
        }
        @{Name = "$Name"; Description = "$Description"}
    }

    $Space = " "
    if (($Directive -band $shellCompDirectiveNoSpace) -ne 0) {
        __@@IDENT@@_debug "ShellCompDirectiveNoSpace is set"
        $Space = ""
    }

    $Values = @($Values | Where-Object { $_.Name -like "$WordToComplete*" })
    if ($IsEqualFlag) {
        $Values | ForEach-Object { $_.Name = $Flag + "=" + $_.Name }
    }

    if (($Directive -band $shellCompDirectiveNoFileComp) -ne 0) {
        if ($Values.Length -eq 0) {
            # An empty string keeps PowerShell from completing paths.
            ""
            return
        }
    }

    $Mode = (Get-PSReadLineKeyHandler | Where-Object { $_.Key -eq "Tab" }).Function
    __@@IDENT@@_debug "Mode: $Mode"

    $Columns = $Host.UI.RawUI.WindowSize.Width
    $Values | ForEach-Object {
        $comp = $_
        switch ($Mode) {
            "Complete" {
                if ($Values.Length -eq 1) {
                    [System.Management.Automation.CompletionResult]::new(($comp.Name | __@@IDENT@@_escapeStringWithSpecialChars) + $Space, "$($comp.Name)", 'ParameterValue', "$($comp.Description)")
                } else {
                    $Text = $comp.Name
                    $Desc = $comp.Description
                    if ($Desc -ne " ") {
                        $MaxDesc = $Columns - $Longest - @@RESERVED@@
                        if ($MaxDesc -gt @@MINDESC@@) {
                            $Text = $Text.PadRight($Longest)
                        } else {
                            $MaxDesc = $Columns - $Text.Length - @@RESERVED@@
                        }
                        if ($MaxDesc -gt 0) {
                            if ($Desc.Length -gt $MaxDesc) {
                                $Desc = $Desc.Substring(0, $MaxDesc - 1) + "@@ELLIPSIS@@"
                            }
                            $Text = "$Text  ($Desc)"
                        }
                    }
                    [System.Management.Automation.CompletionResult]::new("$Text", "$Text", 'ParameterValue', "$($comp.Description)")
                }
            }
            "MenuComplete" {
                # The menu shows the tooltip of the highlighted entry.
                [System.Management.Automation.CompletionResult]::new(($comp.Name | __@@IDENT@@_escapeStringWithSpecialChars) + $Space, "$($comp.Name)", 'ParameterValue', "$($comp.Description)")
            }
            Default {
                # TabCompleteNext cycles entries; the user types the space.
                [System.Management.Automation.CompletionResult]::new(($comp.Name | __@@IDENT@@_escapeStringWithSpecialChars), "$($comp.Name)", 'ParameterValue', "$($comp.Description)")
            }
        }
    }
}
"#;
