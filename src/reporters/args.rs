// Command-line flags contributed by choices

use crate::error::{ErrorTag, ReportError, Result};
use crate::reporters::choice::Choice;
use crate::reporters::enums::{FlagType, Target};
use clap::builder::PossibleValuesParser;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};

static FLAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^--[A-Za-z0-9\-_.]+$").expect("invalid flag regex"));

/// Whether `flag` is a well-formed long flag (`--name`, `--name.part`)
pub fn is_valid_flag(flag: &str) -> bool {
    FLAG_PATTERN.is_match(flag)
}

/// Argument key for a flag: leading `--` removed, `-` replaced by `_`.
///
/// `--rich-table.ops` becomes `rich_table.ops`.
pub fn flag_to_arg(flag: &str) -> String {
    flag.strip_prefix("--").unwrap_or(flag).replace('-', "_")
}

/// Long name registered with clap (`--csv.ops` → `csv.ops`)
fn long_name(flag: &str) -> &str {
    flag.strip_prefix("--").unwrap_or(flag)
}

/// Parsed value of one choice flag
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// Presence flag
    Flag(bool),
    /// One entry per occurrence of the flag, each holding the tokens given with it
    TargetLists(Vec<Vec<String>>),
}

impl ArgValue {
    /// A flag selects its choice when it is set or occurred at least once
    pub fn is_set(&self) -> bool {
        match self {
            ArgValue::Flag(set) => *set,
            ArgValue::TargetLists(occurrences) => !occurrences.is_empty(),
        }
    }
}

/// Choice flags parsed from the command line, keyed by argument key
#[derive(Debug, Clone, Default)]
pub struct ParsedArgs {
    values: HashMap<String, ArgValue>,
}

impl ParsedArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a presence flag
    pub fn set_flag(&mut self, flag: &str, present: bool) {
        self.values.insert(flag_to_arg(flag), ArgValue::Flag(present));
    }

    /// Record one occurrence of a target-list flag
    pub fn push_targets<I, S>(&mut self, flag: &str, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let occurrence: Vec<String> = tokens.into_iter().map(Into::into).collect();
        match self
            .values
            .entry(flag_to_arg(flag))
            .or_insert_with(|| ArgValue::TargetLists(Vec::new()))
        {
            ArgValue::TargetLists(occurrences) => occurrences.push(occurrence),
            other => *other = ArgValue::TargetLists(vec![occurrence]),
        }
    }

    /// Builder form of `set_flag(flag, true)`
    pub fn with_flag(mut self, flag: &str) -> Self {
        self.set_flag(flag, true);
        self
    }

    /// Builder form of `push_targets`
    pub fn with_targets(mut self, flag: &str, tokens: &[&str]) -> Self {
        self.push_targets(flag, tokens.iter().copied());
        self
    }

    pub fn get(&self, arg: &str) -> Option<&ArgValue> {
        self.values.get(arg)
    }

    pub fn is_set(&self, arg: &str) -> bool {
        self.values.get(arg).is_some_and(ArgValue::is_set)
    }

    /// Extract the flags of `choices` from clap matches
    pub fn from_matches<'a>(matches: &ArgMatches, choices: impl IntoIterator<Item = &'a Choice>) -> Self {
        let mut parsed = Self::new();
        for choice in choices {
            for flag in choice.flags() {
                let key = flag_to_arg(flag);
                match choice.flag_type() {
                    FlagType::Boolean => {
                        if matches.get_flag(&key) {
                            parsed.set_flag(flag, true);
                        }
                    }
                    FlagType::TargetList => {
                        if matches.value_source(&key) != Some(ValueSource::CommandLine) {
                            continue;
                        }
                        let mut recorded = false;
                        if let Some(occurrences) = matches.get_occurrences::<String>(&key) {
                            for occurrence in occurrences {
                                parsed.push_targets(flag, occurrence.cloned());
                                recorded = true;
                            }
                        }
                        if !recorded {
                            parsed.push_targets(flag, Vec::<String>::new());
                        }
                    }
                }
            }
        }
        parsed
    }
}

/// All tokens given for `flag`, flattened across occurrences.
///
/// Absent and presence-only flags yield an empty list.
pub fn collect_arg_list(args: &ParsedArgs, flag: &str) -> Result<Vec<String>> {
    if !is_valid_flag(flag) {
        return Err(ReportError::value(
            ErrorTag::ArgsInvalidFlag,
            format!("invalid flag '{}': expected --name made of letters, digits, '-', '_' or '.'", flag),
        ));
    }

    match args.get(&flag_to_arg(flag)) {
        Some(ArgValue::TargetLists(occurrences)) => {
            Ok(occurrences.iter().flatten().cloned().collect())
        }
        _ => Ok(Vec::new()),
    }
}

/// Targets requested on the command line for `choice`.
///
/// Tokens may be repeated or comma separated. When no flag of the choice names
/// a target, `default_targets` is returned unchanged; otherwise only the named
/// targets are returned and the defaults are discarded.
pub fn select_targets_from_args(
    args: &ParsedArgs,
    choice: &Choice,
    default_targets: &BTreeSet<Target>,
) -> Result<BTreeSet<Target>> {
    let mut selected = BTreeSet::new();

    for flag in choice.flags() {
        for token in collect_arg_list(args, flag)? {
            for part in token.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                let target: Target = part.parse().map_err(|_| {
                    ReportError::value(
                        ErrorTag::ArgsUnknownTarget,
                        format!("unknown target '{}' for {}", part, flag),
                    )
                })?;
                if !choice.targets().contains(&target) {
                    return Err(ReportError::value(
                        ErrorTag::ArgsUnsupportedTarget,
                        format!(
                            "target '{}' is not supported by {} (supported: {})",
                            target,
                            flag,
                            join_targets(choice.targets())
                        ),
                    ));
                }
                selected.insert(target);
            }
        }
    }

    if selected.is_empty() {
        return Ok(default_targets.clone());
    }
    Ok(selected)
}

fn join_targets(targets: &BTreeSet<Target>) -> String {
    targets
        .iter()
        .map(Target::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Register the flags of `choice` on a clap command
pub fn add_choice_flags(mut command: Command, choice: &Choice) -> Command {
    for flag in choice.flags() {
        let arg = Arg::new(flag_to_arg(flag))
            .long(long_name(flag).to_string())
            .help(choice.description().to_string());

        let arg = match choice.flag_type() {
            FlagType::Boolean => arg.action(ArgAction::SetTrue),
            FlagType::TargetList => {
                let tokens: Vec<&'static str> =
                    choice.targets().iter().map(Target::as_str).collect();
                arg.action(ArgAction::Append)
                    .num_args(0..)
                    .value_delimiter(',')
                    .value_name("TARGET")
                    .value_parser(PossibleValuesParser::new(tokens))
            }
        };
        command = command.arg(arg);
    }
    command
}
