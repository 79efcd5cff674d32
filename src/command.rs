//! Command table and dispatch.
//!
//! A [`Router`] turns `(command, filename, args)` into one pipeline run:
//! it validates the request before touching the filesystem, owns the byte
//! source for the duration of the run and writes results to the streams it is
//! given.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use colored::Colorize;

use crate::address::ObjectAddress;
use crate::error::{Error, Result};
use crate::extract::{self, Extraction, ObjectOutcome};
use crate::parser::PdfDocument;
use crate::render::{to_json, JsonFormat};
use crate::source::{FileSource, Source};

/// An extraction command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Plain text
    Text,
    /// Bibliographic structure as JSON
    Paper,
    /// Trailer as JSON
    Metadata,
    /// Cross-reference table as JSON
    Xref,
    /// Individual objects by address
    Objects,
}

impl Command {
    /// Every command, in usage order.
    pub const ALL: [Command; 5] = [
        Command::Text,
        Command::Paper,
        Command::Metadata,
        Command::Xref,
        Command::Objects,
    ];

    /// Identifier used on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Command::Text => "text",
            Command::Paper => "paper",
            Command::Metadata => "metadata",
            Command::Xref => "xref",
            Command::Objects => "objects",
        }
    }

    /// One-line description for the usage text.
    pub fn description(self) -> &'static str {
        match self {
            Command::Text => "Extract text",
            Command::Paper => "Extract text as a paper (JSON format)",
            Command::Metadata => "Print trailer as JSON",
            Command::Xref => "Print cross references as JSON",
            Command::Objects => "Print specific objects",
        }
    }

    /// Minimum number of arguments after the filename.
    pub fn min_args(self) -> usize {
        match self {
            Command::Objects => 1,
            _ => 0,
        }
    }

    /// Example invocation and what it does.
    pub fn example(self) -> Option<(&'static str, &'static str)> {
        match self {
            Command::Objects => Some((
                "pdfi objects Sci.pdf 1 14:0 106",
                "print objects \"1:0\", \"14:0\", and \"106:0\"",
            )),
            _ => None,
        }
    }

    /// Fail with [`Error::MissingArguments`] if `count` is below [`Command::min_args`].
    pub fn check_arity(self, count: usize) -> Result<()> {
        if count < self.min_args() {
            return Err(Error::MissingArguments {
                command: self.id(),
                expected: self.min_args(),
            });
        }
        Ok(())
    }
}

impl FromStr for Command {
    type Err = Error;

    /// Exact, case-sensitive lookup.
    fn from_str(s: &str) -> Result<Self> {
        Command::ALL
            .into_iter()
            .find(|c| c.id() == s)
            .ok_or_else(|| Error::UnknownCommand(s.to_string()))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Usage text listing every command.
pub fn usage() -> String {
    let mut lines = vec![
        "Usage: pdfi <command> <filename> [<args>]".to_string(),
        String::new(),
        "Commands:".to_string(),
    ];
    lines.extend(
        Command::ALL
            .iter()
            .map(|c| format!("  {}: {}", c.id(), c.description())),
    );

    let examples: Vec<String> = Command::ALL
        .iter()
        .filter_map(|c| c.example())
        .map(|(cmd, desc)| format!("  {}  # {}", cmd, desc))
        .collect();
    if !examples.is_empty() {
        lines.push(String::new());
        lines.push("Examples:".to_string());
        lines.extend(examples);
    }
    lines.join("\n")
}

/// Presentation settings, fixed for the life of a [`Router`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouterConfig {
    /// Write extra diagnostic lines
    pub verbose: bool,
    /// Colour diagnostic lines
    pub colorize: bool,
}

impl RouterConfig {
    /// Create a config with everything off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable verbose diagnostics.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enable or disable coloured diagnostics.
    pub fn with_colorize(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }
}

/// Per-invocation flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchFlags {
    /// Emit decoded bytes for content streams (`objects` only)
    pub decode: bool,
    /// JSON layout for JSON results
    pub json_format: JsonFormat,
}

/// Dispatches commands to their pipelines.
#[derive(Debug, Clone, Default)]
pub struct Router {
    config: RouterConfig,
}

impl Router {
    /// Create a router.
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    /// The router's configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Run `command_id` on `filename`.
    ///
    /// The command, its arity and any address tokens are validated before
    /// the file is opened. Payloads go to `out`, diagnostics to `err`.
    pub fn dispatch(
        &self,
        command_id: &str,
        filename: &Path,
        args: &[String],
        flags: &DispatchFlags,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<()> {
        let command: Command = command_id.parse()?;
        command.check_arity(args.len())?;

        let addresses = match command {
            Command::Objects => ObjectAddress::parse_all(args)?,
            _ => {
                if !args.is_empty() {
                    log::warn!("{} ignores {} extra argument(s)", command, args.len());
                }
                Vec::new()
            }
        };

        let mut source = FileSource::open(filename)?;
        log::debug!("{} {}", command, source.path().display());
        let extraction = self.extract(command, &source, &addresses, flags, err);
        source.close()?;

        self.write(extraction?, flags, out, err)
    }

    fn extract(
        &self,
        command: Command,
        source: &dyn Source,
        addresses: &[ObjectAddress],
        flags: &DispatchFlags,
        err: &mut dyn Write,
    ) -> Result<Extraction> {
        let doc = PdfDocument::load(source)?;
        if self.config.verbose {
            let mut line = format!(
                "{}: {}, {} page(s), {} xref entries",
                command,
                doc.format(),
                doc.page_count(),
                doc.cross_references().entries.len()
            );
            if doc.is_encrypted() {
                line.push_str(", encrypted");
            }
            self.diagnostic(err, &line)?;
        }
        extract::run(command, &doc, addresses, flags.decode)
    }

    fn write(
        &self,
        extraction: Extraction,
        flags: &DispatchFlags,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<()> {
        let format = flags.json_format;
        match extraction {
            Extraction::Text(text) => writeln!(out, "{}", text)?,
            Extraction::Paper(paper) => writeln!(out, "{}", to_json(&paper, format)?)?,
            Extraction::Metadata(trailer) => writeln!(out, "{}", to_json(&trailer, format)?)?,
            Extraction::Xref(table) => writeln!(out, "{}", to_json(&table, format)?)?,
            Extraction::Objects(outcomes) => return self.write_objects(&outcomes, format, out, err),
        }
        out.flush()?;
        Ok(())
    }

    /// One diagnostic line per object, then its payload or its error.
    fn write_objects(
        &self,
        outcomes: &[ObjectOutcome],
        format: JsonFormat,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<()> {
        let mut failed = 0;
        for outcome in outcomes {
            self.diagnostic(err, &outcome.diagnostic())?;
            match &outcome.result {
                Ok(rendered) => {
                    rendered.write_to(out, format)?;
                    out.flush()?;
                }
                Err(e) => {
                    log::debug!("{}: {}", outcome.address, e);
                    writeln!(err, "Error: {}", e)?;
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            return Err(Error::Incomplete {
                failed,
                total: outcomes.len(),
            });
        }
        Ok(())
    }

    fn diagnostic(&self, err: &mut dyn Write, line: &str) -> Result<()> {
        if self.config.colorize {
            writeln!(err, "{}", line.magenta())?;
        } else {
            writeln!(err, "{}", line)?;
        }
        err.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_lookup_is_exact() {
        for command in Command::ALL {
            assert_eq!(command.id().parse::<Command>().unwrap(), command);
        }
        for id in ["frobnicate", "Text", "OBJECTS", " text", ""] {
            assert!(matches!(id.parse::<Command>(), Err(Error::UnknownCommand(s)) if s == id));
        }
    }

    #[test]
    fn test_arity() {
        assert!(Command::Text.check_arity(0).is_ok());
        assert!(Command::Objects.check_arity(1).is_ok());
        assert!(matches!(
            Command::Objects.check_arity(0),
            Err(Error::MissingArguments {
                command: "objects",
                expected: 1
            })
        ));
    }

    #[test]
    fn test_usage_lists_commands() {
        let text = usage();
        assert!(text.starts_with("Usage: pdfi <command> <filename> [<args>]"));
        for command in Command::ALL {
            assert!(text.contains(&format!("  {}: {}", command.id(), command.description())));
        }
        assert!(text.contains("pdfi objects Sci.pdf 1 14:0 106"));
    }

    #[test]
    fn test_unknown_command_fails_before_io() {
        let router = Router::default();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let result = router.dispatch(
            "frobnicate",
            Path::new("/nonexistent/file.pdf"),
            &[],
            &DispatchFlags::default(),
            &mut out,
            &mut err,
        );
        assert!(matches!(result, Err(Error::UnknownCommand(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_objects_validation_fails_before_io() {
        let router = Router::default();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let missing = Path::new("/nonexistent/file.pdf");
        let flags = DispatchFlags::default();

        let result = router.dispatch("objects", missing, &[], &flags, &mut out, &mut err);
        assert!(matches!(result, Err(Error::MissingArguments { .. })));

        let args = vec!["1".to_string(), "1:x".to_string()];
        let result = router.dispatch("objects", missing, &args, &flags, &mut out, &mut err);
        assert!(matches!(result, Err(Error::MalformedAddress(t)) if t == "1:x"));

        // Valid request reaches the filesystem
        let args = vec!["1".to_string()];
        let result = router.dispatch("objects", missing, &args, &flags, &mut out, &mut err);
        assert!(matches!(result, Err(Error::NotFound(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_config_builder() {
        let config = RouterConfig::new().with_verbose(true).with_colorize(false);
        assert!(config.verbose);
        assert!(!config.colorize);
        assert_eq!(Router::new(config).config(), &config);
    }
}
