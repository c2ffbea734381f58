//! CLI route: single route table and run context. Dispatches to the engine and presentation.

use crate::cli::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_preview_json, format_preview_text, format_validate_result_text,
};
use crate::config::{ConfigLoader, ShellcompConfig};
use crate::error::ApiError;
use crate::protocol::{self, RequestMode};
use crate::render::render;
use crate::resolver::{CompletionRequest, CompletionResolver};
use crate::script::{ScriptCompiler, ScriptOptions, Shell};
use crate::tree::{load_manifest, CommandTree};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};

/// Runtime context for CLI execution: project directory, layered config and
/// the manifest to serve.
pub struct RunContext {
    project_root: PathBuf,
    config: ShellcompConfig,
    manifest: Option<PathBuf>,
}

impl RunContext {
    /// Load and validate configuration. `manifest` overrides the configured one.
    pub fn new(
        project_root: PathBuf,
        config_path: Option<PathBuf>,
        manifest: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let config = ConfigLoader::load_with(&project_root, config_path.as_deref())?;
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        let manifest = manifest.or_else(|| config.completion.manifest.clone());
        Ok(Self {
            project_root,
            config,
            manifest,
        })
    }

    /// Build a context from an already assembled configuration.
    pub fn with_config(project_root: PathBuf, config: ShellcompConfig) -> Self {
        let manifest = config.completion.manifest.clone();
        Self {
            project_root,
            config,
            manifest,
        }
    }

    pub fn config(&self) -> &ShellcompConfig {
        &self.config
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Execute a CLI command via the single route table.
    ///
    /// The returned text goes to stdout as is; for request commands it is the
    /// protocol answer.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = match command {
            Commands::Completion {
                shell,
                no_descriptions,
                invoker,
            } => self.handle_completion(*shell, *no_descriptions, invoker.as_deref()),
            Commands::Preview {
                columns,
                no_descriptions,
                format,
                args,
            } => self.handle_preview(*columns, *no_descriptions, format, args),
            Commands::Validate => self.handle_validate(),
            Commands::Complete { args } => Ok(self.handle_request(RequestMode::WithDescriptions, args)),
            Commands::CompleteNoDesc { args } => {
                Ok(self.handle_request(RequestMode::NoDescriptions, args))
            }
        };
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn manifest_path(&self) -> Result<&Path, ApiError> {
        self.manifest
            .as_deref()
            .ok_or(ApiError::ManifestNotConfigured)
    }

    fn load_tree(&self) -> Result<CommandTree, ApiError> {
        Ok(load_manifest(self.manifest_path()?)?)
    }

    fn handle_completion(
        &self,
        shell: Option<Shell>,
        no_descriptions: bool,
        invoker: Option<&str>,
    ) -> Result<String, ApiError> {
        let shell = shell
            .or(self.config.completion.default_shell)
            .ok_or_else(|| {
                ApiError::UnsupportedShell("none given and completion.default_shell unset".to_string())
            })?;
        let tree = self.load_tree()?;
        let invoker = match invoker {
            Some(invoker) => invoker.to_string(),
            None => self.default_invoker(shell)?,
        };

        let options = ScriptOptions::new(tree.program_name())
            .include_descriptions(self.config.completion.include_descriptions && !no_descriptions)
            .invoker(invoker)
            .layout(self.config.layout.clone());
        Ok(ScriptCompiler::new(options).compile(shell))
    }

    /// The generated script asks this binary, with this manifest, for answers.
    fn default_invoker(&self, shell: Shell) -> Result<String, ApiError> {
        let exe = std::env::current_exe()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "shellcomp".to_string());
        let manifest = self.manifest_path()?;
        let manifest = manifest
            .canonicalize()
            .unwrap_or_else(|_| manifest.to_path_buf());
        let manifest = manifest.to_string_lossy();
        Ok(shell.command_line(&[exe.as_str(), "--manifest", manifest.as_ref()]))
    }

    fn handle_preview(
        &self,
        columns: usize,
        no_descriptions: bool,
        format: &str,
        args: &[String],
    ) -> Result<String, ApiError> {
        let tree = self.load_tree()?;
        let request = CompletionRequest::from_tokens(args);
        let completions = CompletionResolver::new(&tree)
            .include_descriptions(self.config.completion.include_descriptions && !no_descriptions)
            .resolve(&request);
        let current_word = args.last().map(String::as_str).unwrap_or("");
        let rendered = render(&completions, current_word, columns, &self.config.layout);

        match format {
            "json" => format_preview_json(&request, &completions, &rendered)
                .map_err(|e| ApiError::ConfigError(format!("Failed to serialize preview: {}", e))),
            "text" => Ok(format_preview_text(&completions, &rendered)),
            other => Err(ApiError::ConfigError(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }

    fn handle_validate(&self) -> Result<String, ApiError> {
        let path = self.manifest_path()?;
        let tree = load_manifest(path)?;
        Ok(format_validate_result_text(
            tree.program_name(),
            tree.command_count(),
            &path.display().to_string(),
        ))
    }

    /// Never fails: a broken manifest answers with the error directive so the
    /// shell simply offers nothing.
    fn handle_request(&self, mode: RequestMode, args: &[String]) -> String {
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(mode.command_name().to_string());
        argv.extend(args.iter().cloned());

        let mut out = Vec::new();
        let mut err = std::io::stderr();
        let served = self
            .load_tree()
            .and_then(|tree| protocol::serve(&tree, &argv, &mut out, &mut err));
        match served {
            Ok(_) => String::from_utf8_lossy(&out).into_owned(),
            Err(e) => {
                error!(error = %e, "Completion request failed");
                let mut fallback = Vec::new();
                let answer = crate::candidate::Completions::error();
                // Writes to a Vec cannot fail.
                let _ = protocol::write_response(&mut fallback, &answer);
                let _ = protocol::write_diagnostic(&mut err, answer.directive);
                String::from_utf8_lossy(&fallback).into_owned()
            }
        }
    }
}
